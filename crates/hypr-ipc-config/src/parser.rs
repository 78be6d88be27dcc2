//! KDL configuration parser

use std::path::{Path, PathBuf};

use hypr_ipc::{Command, NotifyIcon, OutputBackend, Request};
use kdl::{KdlNode, KdlValue};

use crate::error::ConfigError;
use crate::model::*;

/// Configuration file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/hypr-ipc/config.kdl";

/// Notification timeout used when a `notify` entry has no `timeout=`
const DEFAULT_NOTIFY_TIMEOUT_MS: u32 = 5000;

pub fn default_config_path() -> PathBuf {
    shellexpand::tilde(DEFAULT_CONFIG_PATH).into_owned().into()
}

/// Parse a configuration file, or return the defaults if it does not exist
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        return Ok(Config::default());
    }
    parse_config(path)
}

/// Parse a configuration file from the given path
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        // kdl depends on an older miette, so rebuild the span from offset/len
        let offset = e.span.offset();
        let len = e.span.len();
        let span = miette::SourceSpan::from((offset, len));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = Config::default();

    for node in doc.nodes() {
        match node.name().value() {
            "global" => {
                config.global = parse_global(node)?;
            }
            "batch" => {
                let batch = parse_batch(node)?;
                if config.batch(&batch.name).is_some() {
                    return Err(ConfigError::DuplicateBatch { name: batch.name });
                }
                config.batches.push(batch);
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

fn parse_global(node: &KdlNode) -> Result<GlobalConfig, ConfigError> {
    let mut global = GlobalConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            let value = child.entries().first().and_then(|e| e.value().as_string());

            match child.name().value() {
                "log-level" => {
                    if let Some(val) = value {
                        global.log_level =
                            val.parse().map_err(|e| ConfigError::Invalid { message: e })?;
                    }
                }
                "runtime-dir" => {
                    if let Some(val) = value {
                        global.runtime_dir = Some(shellexpand::tilde(val).into_owned().into());
                    }
                }
                "instance-signature" => {
                    global.instance_signature = value.map(str::to_string);
                }
                name => {
                    tracing::warn!("Unknown global config option: {}", name);
                }
            }
        }
    }

    Ok(global)
}

fn parse_batch(node: &KdlNode) -> Result<Batch, ConfigError> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingField {
            field: "batch name (e.g., `batch \"focus-mode\" { ... }`)".to_string(),
        })?;

    let mut request = Request::new();
    if let Some(children) = node.children() {
        for child in children.nodes() {
            request = add_entry(request, &Entry::new(&name, child))?;
        }
    }

    if request.is_empty() {
        return Err(ConfigError::EmptyBatch { name });
    }

    Ok(Batch { name, request })
}

fn add_entry(request: Request, entry: &Entry<'_>) -> Result<Request, ConfigError> {
    let request = match entry.command {
        "dispatch" => {
            let dispatcher = entry.arg(0, "dispatcher")?;
            let args: Vec<String> = entry.args.iter().skip(1).filter_map(|v| text(v)).collect();
            request.dispatch(dispatcher, args)
        }
        "keyword" => {
            entry.arg(0, "keyword text")?;
            let words: Vec<String> = entry.args.iter().filter_map(|v| text(v)).collect();
            request.keyword(words.join(" "))
        }
        "reload" => request.reload(),
        "kill" => request.kill(),
        "setcursor" => {
            let theme = entry.arg(0, "cursor theme")?;
            let size = entry.number(entry.args.get(1).copied(), "cursor size")?;
            request.set_cursor(theme, size)
        }
        "output-create" => {
            let backend: OutputBackend = entry
                .arg(0, "output backend")?
                .parse()
                .map_err(|message| ConfigError::Invalid { message })?;
            request.create_output(backend, entry.optional_arg(1))
        }
        "output-remove" => request.remove_output(entry.arg(0, "output name")?),
        "switchxkblayout" => {
            request.switch_xkb_layout(entry.arg(0, "device")?, entry.arg(1, "layout command")?)
        }
        "seterror" => request.set_error(entry.arg(0, "color")?, entry.arg(1, "message")?),
        "seterror-disable" => request.disable_error(),
        "notify" => {
            let message = entry.arg(0, "message")?;
            let icon = match entry.property("icon").and_then(text) {
                Some(icon) => icon
                    .parse::<NotifyIcon>()
                    .map_err(|message| ConfigError::Invalid { message })?,
                None => NotifyIcon::default(),
            };
            let timeout_ms = match entry.property("timeout") {
                Some(value) => entry.number(Some(value), "notify timeout")?,
                None => DEFAULT_NOTIFY_TIMEOUT_MS,
            };
            let color = entry.property("color").and_then(text);
            request.notify(icon, timeout_ms, color, message)
        }
        "dismissnotify" => {
            let count = match entry.args.first() {
                Some(value) => entry.number(Some(*value), "notification count")?,
                None => 0,
            };
            request.dismiss_notify(count)
        }
        "raw" => {
            let wire = entry.arg(0, "wire command")?;
            let command: Command = wire.parse().map_err(|e| ConfigError::Invalid {
                message: format!("batch \"{}\": {}", entry.batch, e),
            })?;
            request.add_command(command)
        }
        name => {
            return Err(ConfigError::UnknownCommand {
                batch: entry.batch.to_string(),
                name: name.to_string(),
            })
        }
    };

    Ok(request)
}

/// One command node inside a `batch` block
struct Entry<'a> {
    batch: &'a str,
    command: &'a str,
    node: &'a KdlNode,
    args: Vec<&'a KdlValue>,
}

impl<'a> Entry<'a> {
    fn new(batch: &'a str, node: &'a KdlNode) -> Self {
        let args = node
            .entries()
            .iter()
            .filter(|e| e.name().is_none())
            .map(|e| e.value())
            .collect();

        Self {
            batch,
            command: node.name().value(),
            node,
            args,
        }
    }

    fn missing(&self, what: &str) -> ConfigError {
        ConfigError::MissingField {
            field: format!("{} for `{}` in batch \"{}\"", what, self.command, self.batch),
        }
    }

    fn arg(&self, index: usize, what: &str) -> Result<String, ConfigError> {
        self.optional_arg(index).ok_or_else(|| self.missing(what))
    }

    fn optional_arg(&self, index: usize) -> Option<String> {
        self.args.get(index).and_then(|v| text(v))
    }

    fn property(&self, key: &str) -> Option<&'a KdlValue> {
        self.node
            .entries()
            .iter()
            .rev()
            .find(|e| e.name().map(|n| n.value()) == Some(key))
            .map(|e| e.value())
    }

    fn number<T: TryFrom<i64>>(
        &self,
        value: Option<&KdlValue>,
        what: &str,
    ) -> Result<T, ConfigError> {
        let value = value.ok_or_else(|| self.missing(what))?;
        value
            .as_i64()
            .and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| ConfigError::Invalid {
                message: format!(
                    "{} for `{}` in batch \"{}\" must be a whole number in range, got {}",
                    what, self.command, self.batch, value
                ),
            })
    }
}

/// Render a scalar KDL value as command text
fn text(value: &KdlValue) -> Option<String> {
    if let Some(s) = value.as_string() {
        return Some(s.to_string());
    }
    if let Some(n) = value.as_i64() {
        return Some(n.to_string());
    }
    if let Some(f) = value.as_f64() {
        return Some(f.to_string());
    }
    value.as_bool().map(|b| b.to_string())
}
