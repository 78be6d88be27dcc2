//! Control socket client
//!
//! Every call opens a fresh connection to `.socket.sock`, writes one request,
//! reads the reply and drops the connection. The client itself holds only
//! the socket location, so it can be shared freely between tasks.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::debug;

use super::request::Request;
use super::response::demux;
use super::socket::SocketConfig;
use super::types::{DeviceTable, Monitor, Window, Workspace};
use super::HyprError;

/// Size of each read from the control socket
///
/// A read returning fewer bytes than this is taken as the end of the reply.
pub const CONTROL_READ_BUFFER_SIZE: usize = 4096;

/// Prefix requesting a JSON reply
pub const JSON_PREFIX: &str = "j/";

/// Client for Hyprland's control socket
///
/// # Example
///
/// ```ignore
/// let client = ControlClient::from_env()?;
/// client.execute(&Request::new().dispatch("workspace", ["3"])).await?;
/// for monitor in client.monitors().await? {
///     println!("{} {}x{}", monitor.name, monitor.width, monitor.height);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ControlClient {
    config: SocketConfig,
}

impl ControlClient {
    pub fn new(config: SocketConfig) -> Self {
        Self { config }
    }

    /// Create a client for the instance named by the environment
    ///
    /// # Errors
    ///
    /// Returns `HyprError::InstanceSignatureNotSet` if
    /// `$HYPRLAND_INSTANCE_SIGNATURE` is unset or empty. No connection is
    /// attempted.
    pub fn from_env() -> Result<Self, HyprError> {
        SocketConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &SocketConfig {
        &self.config
    }

    /// Send raw wire text and return the raw reply
    ///
    /// The request goes out in a single write. The reply is read in
    /// `CONTROL_READ_BUFFER_SIZE` chunks until a read comes back short, which
    /// includes the zero-length read at end of stream.
    ///
    /// # Errors
    ///
    /// Returns `HyprError::ConnectionFailed` if the socket cannot be reached,
    /// `HyprError::SendFailed` or `HyprError::ShortWrite` if the request
    /// cannot be written whole, and `HyprError::ReceiveFailed` if reading the
    /// reply fails.
    pub async fn send_raw(&self, request: &str) -> Result<Vec<u8>, HyprError> {
        let path = self.config.control_socket_path();

        let mut stream =
            UnixStream::connect(&path)
                .await
                .map_err(|e| HyprError::ConnectionFailed {
                    path: path.clone(),
                    source: e,
                })?;

        debug!(path = %path.display(), request = request, "Sending control request");

        let payload = request.as_bytes();
        let written = stream
            .write(payload)
            .await
            .map_err(HyprError::SendFailed)?;
        if written != payload.len() {
            return Err(HyprError::ShortWrite {
                expected: payload.len(),
                written,
            });
        }

        let mut response = Vec::new();
        let mut buf = [0u8; CONTROL_READ_BUFFER_SIZE];
        loop {
            let n = stream
                .read(&mut buf)
                .await
                .map_err(HyprError::ReceiveFailed)?;
            response.extend_from_slice(&buf[..n]);

            if n < CONTROL_READ_BUFFER_SIZE {
                break;
            }
        }

        debug!(bytes = response.len(), "Received control reply");

        Ok(response)
    }

    /// Run a query with the `j/` prefix and decode its JSON reply
    ///
    /// # Errors
    ///
    /// Returns any error from `send_raw()`, or `HyprError::DeserializeFailed`
    /// if the reply is not the expected JSON.
    pub async fn send_json<T: DeserializeOwned>(&self, query: &str) -> Result<T, HyprError> {
        let raw = self.send_raw(&format!("{}{}", JSON_PREFIX, query)).await?;
        serde_json::from_slice(&raw).map_err(HyprError::DeserializeFailed)
    }

    /// Send a request and check the reply of every command in it
    ///
    /// # Errors
    ///
    /// Returns `HyprError::EmptyRequest` without connecting if the request has
    /// no commands. Otherwise returns any error from `send_raw()` or `demux()`.
    pub async fn execute(&self, request: &Request) -> Result<(), HyprError> {
        if request.is_empty() {
            return Err(HyprError::EmptyRequest);
        }

        let wire = request.encode();
        let raw = self.send_raw(&wire).await?;

        demux(&raw, request.commands())
    }

    pub async fn monitors(&self) -> Result<Vec<Monitor>, HyprError> {
        self.send_json("monitors").await
    }

    pub async fn workspaces(&self) -> Result<Vec<Workspace>, HyprError> {
        self.send_json("workspaces").await
    }

    pub async fn clients(&self) -> Result<Vec<Window>, HyprError> {
        self.send_json("clients").await
    }

    pub async fn active_workspace(&self) -> Result<Workspace, HyprError> {
        self.send_json("activeworkspace").await
    }

    /// Query the focused window
    ///
    /// Hyprland answers `{}` when nothing is focused, which is returned as
    /// `None`.
    pub async fn active_window(&self) -> Result<Option<Window>, HyprError> {
        let window: Window = self.send_json("activewindow").await?;

        if window.address.is_empty() {
            Ok(None)
        } else {
            Ok(Some(window))
        }
    }

    pub async fn devices(&self) -> Result<DeviceTable, HyprError> {
        self.send_json("devices").await
    }
}
