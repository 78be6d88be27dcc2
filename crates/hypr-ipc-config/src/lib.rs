//! Configuration parsing for hypr-ipc
//!
//! This crate reads the KDL configuration file: global settings (log level,
//! socket overrides) and named command batches that can be sent to Hyprland
//! as a single request.

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{
    default_config_path, load_config, parse_config, parse_config_str, DEFAULT_CONFIG_PATH,
};
