//! Event socket client
//!
//! Holds one long-lived connection to `.socket2.sock` and fans every record
//! out to the registered listeners, in registration order, on the task that
//! calls `listen()`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::UnixStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::parser::parse;
use super::types::Event;
use crate::socket::SocketConfig;
use crate::HyprError;

/// How long one read may block before cancellation is checked again
pub const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(1);

/// Size of each read from the event socket
pub const EVENT_READ_BUFFER_SIZE: usize = 4096;

/// Callback invoked for every event
pub type Listener = Box<dyn FnMut(&Event) + Send + 'static>;

/// Client for Hyprland's event socket
///
/// # Example
///
/// ```ignore
/// let mut events = EventClient::connect_from_env().await?;
/// events.register_listener(|event| println!("{:?}", event));
///
/// let cancel = CancellationToken::new();
/// events.listen(&cancel).await?;
/// ```
pub struct EventClient {
    stream: Option<UnixStream>,
    socket_path: PathBuf,
    listeners: Vec<Listener>,
    read_deadline: Duration,
    framer: RecordFramer,
}

impl EventClient {
    /// Open the event socket of the given instance
    ///
    /// # Errors
    ///
    /// Returns `HyprError::ConnectionFailed` if the socket cannot be reached.
    pub async fn connect(config: &SocketConfig) -> Result<Self, HyprError> {
        let socket_path = config.event_socket_path();

        let stream =
            UnixStream::connect(&socket_path)
                .await
                .map_err(|e| HyprError::ConnectionFailed {
                    path: socket_path.clone(),
                    source: e,
                })?;

        info!(path = %socket_path.display(), "Connected to Hyprland event socket");

        Ok(Self {
            stream: Some(stream),
            socket_path,
            listeners: Vec::new(),
            read_deadline: DEFAULT_READ_DEADLINE,
            framer: RecordFramer::default(),
        })
    }

    /// Open the event socket of the instance named by the environment
    ///
    /// # Errors
    ///
    /// Returns `HyprError::InstanceSignatureNotSet` before attempting to
    /// connect if the signature is missing, otherwise any error from
    /// `connect()`.
    pub async fn connect_from_env() -> Result<Self, HyprError> {
        let config = SocketConfig::from_env()?;
        Self::connect(&config).await
    }

    /// Bound how long a single read may block
    ///
    /// This is also the worst-case delay between cancelling and `listen()`
    /// returning.
    pub fn with_read_deadline(mut self, deadline: Duration) -> Self {
        self.read_deadline = deadline;
        self
    }

    pub fn read_deadline(&self) -> Duration {
        self.read_deadline
    }

    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Add a listener; listeners are called in the order they were added
    pub fn register_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&Event) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Read and dispatch events until cancelled or the connection fails
    ///
    /// Cancellation is checked before every read, so it is observed within
    /// one read deadline. Records that fail to decode are delivered as
    /// `Event::Malformed` and the loop carries on.
    ///
    /// # Errors
    ///
    /// - `HyprError::NotConnected` if `close()` was called
    /// - `HyprError::Cancelled` once `cancel` is triggered
    /// - `HyprError::ConnectionClosed` if Hyprland closes the socket
    /// - `HyprError::ReceiveFailed` for any other read error
    pub async fn listen(&mut self, cancel: &CancellationToken) -> Result<(), HyprError> {
        if self.stream.is_none() {
            return Err(HyprError::NotConnected);
        }

        let mut buf = [0u8; EVENT_READ_BUFFER_SIZE];

        loop {
            if cancel.is_cancelled() {
                debug!("Event listener observed cancellation");
                return Err(HyprError::Cancelled);
            }

            let stream = self.stream.as_mut().ok_or(HyprError::NotConnected)?;

            let n = match timeout(self.read_deadline, stream.read(&mut buf)).await {
                Err(_) => continue,
                Ok(Ok(0)) => {
                    warn!(path = %self.socket_path.display(), "Hyprland closed the event socket");
                    return Err(HyprError::ConnectionClosed);
                }
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(HyprError::ReceiveFailed(e)),
            };

            let records = self.framer.push(&buf[..n], n == buf.len());
            for record in records {
                self.dispatch(&record);
            }
        }
    }

    fn dispatch(&mut self, record: &str) {
        let event = parse(record);

        if let Event::Malformed { raw, reason } = &event {
            warn!(record = %raw, reason = %reason, "Malformed event record");
        }

        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Drop the connection; later `listen()` calls return `NotConnected`
    ///
    /// Closing an already closed client is a no-op. Dropping the socket
    /// cannot fail, so this currently always returns `Ok(())`.
    pub fn close(&mut self) -> Result<(), HyprError> {
        if self.stream.take().is_some() {
            debug!(path = %self.socket_path.display(), "Closed Hyprland event socket");
        }
        self.framer = RecordFramer::default();
        Ok(())
    }
}

impl fmt::Debug for EventClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventClient")
            .field("socket_path", &self.socket_path)
            .field("connected", &self.stream.is_some())
            .field("listeners", &self.listeners.len())
            .field("read_deadline", &self.read_deadline)
            .finish()
    }
}

/// Splits the byte stream into newline-terminated records
///
/// When a read fills the whole buffer the text after the last newline is
/// assumed to be cut off and is held until the next read. After a short read
/// everything is treated as complete.
#[derive(Debug, Default)]
struct RecordFramer {
    pending: Vec<u8>,
}

impl RecordFramer {
    fn push(&mut self, bytes: &[u8], buffer_filled: bool) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let data = std::mem::take(&mut self.pending);

        let mut parts: Vec<&[u8]> = data.split(|b| *b == b'\n').collect();
        if buffer_filled {
            if let Some(partial) = parts.pop() {
                self.pending = partial.to_vec();
            }
        }

        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(|part| String::from_utf8_lossy(part).into_owned())
            .collect()
    }
}
