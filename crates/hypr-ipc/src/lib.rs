//! Hyprland IPC client
//!
//! This crate talks to a running Hyprland compositor over its two Unix
//! sockets:
//!
//! - The control socket (`.socket.sock`) takes one request per connection and
//!   replies with plain text, or JSON for `j/` queries.
//! - The event socket (`.socket2.sock`) pushes newline-delimited event records
//!   for as long as the connection stays open.
//!
//! ## Architecture
//!
//! - `Command` / `Request`: typed commands and their wire encoding
//! - `ControlClient`: connection-per-call request/response transport
//! - `demux`: splits batched replies and aggregates per-command failures
//! - `events::parse`: dispatch table turning records into typed `Event`s
//! - `EventClient`: cancellable read loop fanning events out to listeners
//! - `EventDispatcher`: runs the read loop on a task and forwards events
//!   through a channel
//!
//! ## Socket discovery
//!
//! Both sockets live under `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/`.
//! `XDG_RUNTIME_DIR` falls back to `/tmp`; the instance signature is required.

mod client;
mod command;
mod error;
pub mod events;
mod request;
mod response;
mod socket;
mod types;

pub use client::{ControlClient, CONTROL_READ_BUFFER_SIZE, JSON_PREFIX};
pub use command::{Command, NotifyIcon, OutputBackend};
pub use error::{CommandFailure, CommandFailures, HyprError};
pub use events::{
    Event, EventClient, EventDispatcher, EventParseError, EventReaderHandle, EventReceiver,
    WindowAddress,
};
pub use request::{encode, Request, BATCH_PREFIX, BATCH_SEPARATOR};
pub use response::{demux, RESPONSE_DELIMITER, RESPONSE_OK};
pub use socket::{SocketConfig, INSTANCE_SIGNATURE_ENV, RUNTIME_DIR_ENV};
pub use types::{
    DeviceTable, Hid, Keyboard, Monitor, Mouse, Switch, Tablet, Touch, Window, Workspace,
    WorkspaceRef,
};
