//! Socket discovery
//!
//! Hyprland creates its sockets under
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/`.

use std::path::{Path, PathBuf};

use super::HyprError;

/// Environment variable naming the runtime directory root
pub const RUNTIME_DIR_ENV: &str = "XDG_RUNTIME_DIR";

/// Environment variable naming the running Hyprland instance
pub const INSTANCE_SIGNATURE_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

/// Runtime directory used when `XDG_RUNTIME_DIR` is unset
const FALLBACK_RUNTIME_DIR: &str = "/tmp";

const CONTROL_SOCKET_NAME: &str = ".socket.sock";
const EVENT_SOCKET_NAME: &str = ".socket2.sock";

/// Location of one Hyprland instance's sockets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConfig {
    /// Runtime directory root (`$XDG_RUNTIME_DIR`)
    pub runtime_dir: PathBuf,
    /// Instance signature (`$HYPRLAND_INSTANCE_SIGNATURE`)
    pub instance_signature: String,
}

impl SocketConfig {
    pub fn new(runtime_dir: impl Into<PathBuf>, instance_signature: impl Into<String>) -> Self {
        Self {
            runtime_dir: runtime_dir.into(),
            instance_signature: instance_signature.into(),
        }
    }

    /// Discover the socket location from the environment
    ///
    /// # Errors
    ///
    /// Returns `HyprError::InstanceSignatureNotSet` if
    /// `$HYPRLAND_INSTANCE_SIGNATURE` is unset or empty.
    pub fn from_env() -> Result<Self, HyprError> {
        Self::resolve(None, None)
    }

    /// Discover the socket location, preferring explicit values over the
    /// environment
    ///
    /// Empty overrides and empty environment values count as unset.
    pub fn resolve(
        runtime_dir: Option<PathBuf>,
        instance_signature: Option<String>,
    ) -> Result<Self, HyprError> {
        let runtime_dir = runtime_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .or_else(|| non_empty_env(RUNTIME_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_RUNTIME_DIR));

        let instance_signature = instance_signature
            .filter(|sig| !sig.is_empty())
            .or_else(|| non_empty_env(INSTANCE_SIGNATURE_ENV))
            .ok_or(HyprError::InstanceSignatureNotSet)?;

        Ok(Self {
            runtime_dir,
            instance_signature,
        })
    }

    /// Directory holding this instance's sockets
    pub fn instance_dir(&self) -> PathBuf {
        self.runtime_dir
            .join("hypr")
            .join(Path::new(&self.instance_signature))
    }

    /// Path of the request/response control socket
    pub fn control_socket_path(&self) -> PathBuf {
        self.instance_dir().join(CONTROL_SOCKET_NAME)
    }

    /// Path of the push-only event socket
    pub fn event_socket_path(&self) -> PathBuf {
        self.instance_dir().join(EVENT_SOCKET_NAME)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
