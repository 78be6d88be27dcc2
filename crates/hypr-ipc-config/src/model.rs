//! Configuration data model

use std::path::PathBuf;

use hypr_ipc::{Command, HyprError, Request, SocketConfig};

/// Root configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub global: GlobalConfig,
    pub batches: Vec<Batch>,
}

impl Config {
    pub fn batch(&self, name: &str) -> Option<&Batch> {
        self.batches.iter().find(|batch| batch.name == name)
    }

    /// Socket location, with configured overrides taking precedence over
    /// the environment
    pub fn socket_config(&self) -> Result<SocketConfig, HyprError> {
        SocketConfig::resolve(
            self.global.runtime_dir.clone(),
            self.global.instance_signature.clone(),
        )
    }
}

/// Global settings
#[derive(Debug, Clone, Default)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
    /// Overrides `$XDG_RUNTIME_DIR`
    pub runtime_dir: Option<PathBuf>,
    /// Overrides `$HYPRLAND_INSTANCE_SIGNATURE`
    pub instance_signature: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// A named sequence of commands sent as one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub name: String,
    pub request: Request,
}

impl Batch {
    pub fn commands(&self) -> &[Command] {
        self.request.commands()
    }
}
