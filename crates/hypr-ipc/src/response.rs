//! Batched reply demultiplexing

use tracing::debug;

use super::command::Command;
use super::error::{CommandFailure, CommandFailures};
use super::HyprError;

/// Separator between per-command replies in a batched response
pub const RESPONSE_DELIMITER: &str = "\n\n\n";

/// Reply text for a command that succeeded
pub const RESPONSE_OK: &str = "ok";

/// Split a control-socket reply into per-command results
///
/// Segments are matched to `commands` by position. Every segment other than
/// `ok` becomes a `CommandFailure`; all of them are returned together.
///
/// # Errors
///
/// Returns `HyprError::SegmentCountMismatch` if the reply does not contain
/// exactly one segment per command, or `HyprError::CommandsFailed` if any
/// command was rejected.
pub fn demux(raw: &[u8], commands: &[Command]) -> Result<(), HyprError> {
    let decoded = String::from_utf8_lossy(raw);
    let text = decoded
        .strip_suffix(RESPONSE_DELIMITER)
        .unwrap_or(decoded.as_ref());
    let segments: Vec<&str> = text.split(RESPONSE_DELIMITER).collect();

    if segments.len() != commands.len() {
        return Err(HyprError::SegmentCountMismatch {
            expected: commands.len(),
            actual: segments.len(),
            reply: decoded.to_string(),
        });
    }

    let failures: Vec<CommandFailure> = segments
        .iter()
        .zip(commands)
        .enumerate()
        .filter(|(_, (segment, _))| **segment != RESPONSE_OK)
        .map(|(index, (segment, command))| CommandFailure {
            index,
            kind: command.kind(),
            message: segment.to_string(),
        })
        .collect();

    if failures.is_empty() {
        return Ok(());
    }

    debug!(
        failed = failures.len(),
        total = commands.len(),
        "Hyprland rejected command(s)"
    );

    Err(HyprError::CommandsFailed(CommandFailures(failures)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands() -> Vec<Command> {
        vec![
            Command::Dispatch {
                dispatcher: "workspace".to_string(),
                args: vec!["1".to_string()],
            },
            Command::Keyword {
                text: "general:gaps_in 4".to_string(),
            },
            Command::Reload,
        ]
    }

    #[test]
    fn test_all_ok() {
        assert!(demux(b"ok\n\n\nok\n\n\nok", &commands()).is_ok());
    }

    #[test]
    fn test_single_ok() {
        assert!(demux(b"ok", &[Command::Reload]).is_ok());
    }

    #[test]
    fn test_trailing_delimiter_tolerated() {
        assert!(demux(b"ok\n\n\nok\n\n\nok\n\n\n", &commands()).is_ok());
    }

    #[test]
    fn test_failure_names_kind_and_verbatim_text() {
        let raw = b"ok\n\n\nconfig option <general:gaps_inn> does not exist.\n\n\nok";

        match demux(raw, &commands()) {
            Err(HyprError::CommandsFailed(failures)) => {
                assert_eq!(failures.len(), 1);
                let failure = &failures.0[0];
                assert_eq!(failure.index, 1);
                assert_eq!(failure.kind, "keyword");
                assert_eq!(
                    failure.message,
                    "config option <general:gaps_inn> does not exist."
                );
            }
            other => panic!("Expected CommandsFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_every_failure_collected() {
        let raw = b"Invalid dispatcher\n\n\nok\n\n\nreload failed";

        let err = demux(raw, &commands()).unwrap_err();
        let HyprError::CommandsFailed(failures) = &err else {
            panic!("Expected CommandsFailed, got: {:?}", err);
        };

        let indexes: Vec<usize> = failures.iter().map(|f| f.index).collect();
        assert_eq!(indexes, vec![0, 2]);

        let message = err.to_string();
        assert!(message.contains("dispatch"));
        assert!(message.contains("Invalid dispatcher"));
        assert!(message.contains("reload failed"));
    }

    #[test]
    fn test_single_command_failure_reported_the_same_way() {
        let err = demux(b"Invalid dispatcher", &[commands()[0].clone()]).unwrap_err();

        match err {
            HyprError::CommandsFailed(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures.0[0].kind, "dispatch");
                assert_eq!(failures.0[0].message, "Invalid dispatcher");
            }
            other => panic!("Expected CommandsFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_segment_count_mismatch_is_protocol_error() {
        match demux(b"ok\n\n\nok", &commands()) {
            Err(HyprError::SegmentCountMismatch {
                expected,
                actual,
                reply,
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
                assert_eq!(reply, "ok\n\n\nok");
            }
            other => panic!("Expected SegmentCountMismatch, got: {:?}", other),
        }

        assert!(matches!(
            demux(b"ok\n\n\nok", &[Command::Reload]),
            Err(HyprError::SegmentCountMismatch {
                expected: 1,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_segment_count_mismatch_keeps_reply_text() {
        let err = demux(b"bad\n\n\nthing", &[Command::Reload]).unwrap_err();

        match &err {
            HyprError::SegmentCountMismatch { reply, .. } => {
                assert_eq!(reply, "bad\n\n\nthing");
            }
            other => panic!("Expected SegmentCountMismatch, got: {:?}", other),
        }
        assert!(err.to_string().contains("bad"));
        assert!(err.to_string().contains("thing"));
    }
}
