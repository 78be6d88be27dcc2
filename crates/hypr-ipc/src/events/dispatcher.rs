//! Channel-based event dispatch
//!
//! ```text
//! +-------------+      +-----------+      +-----------+
//! | EventClient | ---> | mpsc      | ---> | consumer  |
//! | (task)      |      | unbounded |      | loop      |
//! +-------------+      +-----------+      +-----------+
//! ```
//!
//! The `EventDispatcher` registers a forwarding listener on an `EventClient`
//! and runs its read loop on a spawned task, so consumers can `recv()` events
//! (or treat them as a `Stream`) instead of supplying callbacks.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::client::EventClient;
use super::types::Event;
use crate::HyprError;

/// Handle to a spawned event reader task
///
/// The task completes with `Ok(())` when cancelled or when the receiver is
/// dropped, and with the error otherwise (e.g. `ConnectionClosed`).
pub type EventReaderHandle = JoinHandle<Result<(), HyprError>>;

/// Receiving end of the event channel
#[derive(Debug)]
pub struct EventReceiver {
    inner: mpsc::UnboundedReceiver<Event>,
}

impl EventReceiver {
    /// Wait for the next event; `None` once the reader task has ended
    pub async fn recv(&mut self) -> Option<Event> {
        self.inner.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    pub fn into_stream(self) -> UnboundedReceiverStream<Event> {
        UnboundedReceiverStream::new(self.inner)
    }
}

/// Forwards events from an `EventClient` into a channel
///
/// # Example
///
/// ```ignore
/// let client = EventClient::connect_from_env().await?;
/// let cancel = CancellationToken::new();
///
/// let (dispatcher, mut rx) = EventDispatcher::new();
/// let handle = dispatcher.spawn_reader(client, &cancel);
///
/// while let Some(event) = rx.recv().await {
///     if let Event::Workspace(e) = event {
///         println!("now on {}", e.name);
///     }
/// }
///
/// handle.await??;
/// ```
#[derive(Debug)]
pub struct EventDispatcher {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventDispatcher {
    pub fn new() -> (Self, EventReceiver) {
        let (sender, inner) = mpsc::unbounded_channel();
        (Self { sender }, EventReceiver { inner })
    }

    /// Convenience for `new()` followed by `spawn_reader()`
    pub fn spawn(
        client: EventClient,
        cancel: &CancellationToken,
    ) -> (EventReaderHandle, EventReceiver) {
        let (dispatcher, receiver) = Self::new();
        (dispatcher.spawn_reader(client, cancel), receiver)
    }

    /// Run `client`'s read loop on a new task, forwarding every event
    ///
    /// The reader stops when `cancel` is triggered or the receiver is
    /// dropped. Cancelling the reader never cancels `cancel` itself.
    pub fn spawn_reader(
        self,
        mut client: EventClient,
        cancel: &CancellationToken,
    ) -> EventReaderHandle {
        let stop = cancel.child_token();
        let receiver_gone = stop.clone();
        let sender = self.sender;

        client.register_listener(move |event| {
            if sender.send(event.clone()).is_err() && !receiver_gone.is_cancelled() {
                debug!("Event receiver dropped, shutting down event reader");
                receiver_gone.cancel();
            }
        });

        tokio::spawn(async move {
            match client.listen(&stop).await {
                Err(HyprError::Cancelled) => {
                    info!("Event reader stopped");
                    Ok(())
                }
                Err(e) => {
                    warn!(error = %e, "Event reader ended with an error");
                    Err(e)
                }
                Ok(()) => Ok(()),
            }
        })
    }

    /// A sender for injecting synthetic events
    #[cfg(test)]
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}
