//! Error types for Hyprland IPC operations

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when communicating with the Hyprland compositor
#[derive(Debug, Error)]
pub enum HyprError {
    /// The HYPRLAND_INSTANCE_SIGNATURE environment variable is not set
    #[error("HYPRLAND_INSTANCE_SIGNATURE environment variable not set - is Hyprland running?")]
    InstanceSignatureNotSet,

    /// Failed to connect to a Hyprland socket
    #[error("Failed to connect to Hyprland socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to send request to Hyprland
    #[error("Failed to send request to Hyprland: {0}")]
    SendFailed(#[source] std::io::Error),

    /// The socket accepted fewer bytes than the request contained
    #[error("Short write to Hyprland socket: expected {expected} bytes, wrote {written}")]
    ShortWrite { expected: usize, written: usize },

    /// Failed to receive data from Hyprland
    #[error("Failed to receive response from Hyprland: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The peer closed the connection
    #[error("Connection to Hyprland closed unexpectedly")]
    ConnectionClosed,

    /// The channel was closed locally before use
    #[error("Hyprland socket is not connected")]
    NotConnected,

    /// A request was sent without any commands
    #[error("Request has no commands")]
    EmptyRequest,

    /// A command string did not match any known command grammar
    #[error("Invalid command {input:?}: {reason}")]
    InvalidCommand { input: String, reason: String },

    /// The batched reply did not have one segment per command
    ///
    /// `reply` holds the undecoded reply text verbatim.
    #[error("Expected {expected} response segment(s) from Hyprland, got {actual}: {reply:?}")]
    SegmentCountMismatch {
        expected: usize,
        actual: usize,
        reply: String,
    },

    /// Failed to deserialize a JSON reply
    #[error("Failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),

    /// One or more commands in a request were rejected by Hyprland
    #[error("{0}")]
    CommandsFailed(CommandFailures),

    /// The event loop observed cancellation
    #[error("Event listener cancelled")]
    Cancelled,
}

impl HyprError {
    /// True for errors caused by missing environment configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, HyprError::InstanceSignatureNotSet)
    }

    /// True for dial, read, write and connection-state failures
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HyprError::ConnectionFailed { .. }
                | HyprError::SendFailed(_)
                | HyprError::ShortWrite { .. }
                | HyprError::ReceiveFailed(_)
                | HyprError::ConnectionClosed
                | HyprError::NotConnected
        )
    }
}

/// A single command rejected by Hyprland
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Position of the command in its request
    pub index: usize,
    /// Command kind, e.g. `dispatch`
    pub kind: &'static str,
    /// Reply text returned by Hyprland, verbatim
    pub message: String,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error running command #{} ({}): {}",
            self.index, self.kind, self.message
        )
    }
}

/// Every failure from one request, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFailures(pub Vec<CommandFailure>);

impl CommandFailures {
    pub fn iter(&self) -> std::slice::Iter<'_, CommandFailure> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommandFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(HyprError::InstanceSignatureNotSet.is_configuration());
        assert!(!HyprError::InstanceSignatureNotSet.is_transport());

        let short = HyprError::ShortWrite {
            expected: 10,
            written: 4,
        };
        assert!(short.is_transport());
        assert!(!short.is_configuration());

        assert!(HyprError::NotConnected.is_transport());
        assert!(!HyprError::Cancelled.is_transport());
        assert!(!HyprError::EmptyRequest.is_transport());
    }

    #[test]
    fn test_command_failures_display_lists_every_failure() {
        let failures = CommandFailures(vec![
            CommandFailure {
                index: 0,
                kind: "dispatch",
                message: "Invalid dispatcher".to_string(),
            },
            CommandFailure {
                index: 2,
                kind: "keyword",
                message: "config option <foo> does not exist.".to_string(),
            },
        ]);

        let message = HyprError::CommandsFailed(failures).to_string();
        assert!(message.contains("#0 (dispatch): Invalid dispatcher"));
        assert!(message.contains("#2 (keyword): config option <foo> does not exist."));
        assert_eq!(message.lines().count(), 2);
    }
}
