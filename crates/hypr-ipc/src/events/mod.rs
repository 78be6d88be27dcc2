//! Hyprland event socket
//!
//! ## Protocol
//!
//! After connecting to `.socket2.sock` the compositor pushes one record per
//! line, `<tag>>><comma separated args>`, until the connection closes.
//! Nothing is ever written by the client.
//!
//! ## Architecture
//!
//! - `parse`: static tag table decoding records into `Event`s
//! - `EventClient`: owns the connection and runs the cancellable read loop,
//!   calling listeners synchronously
//! - `EventDispatcher`: runs an `EventClient` on its own task and forwards
//!   events through a channel

mod client;
mod dispatcher;
mod parser;
mod types;

pub use client::{EventClient, Listener, DEFAULT_READ_DEADLINE, EVENT_READ_BUFFER_SIZE};
pub use dispatcher::{EventDispatcher, EventReaderHandle, EventReceiver};
pub use parser::{known_tags, parse, TAG_SEPARATOR};
pub use types::*;
