//! Control commands and their wire grammar
//!
//! Each `Command` renders (via `Display`) to the exact text Hyprland expects
//! on the control socket, and `FromStr` parses that same text back.

use std::fmt;
use std::str::FromStr;

use super::HyprError;

/// Backend for virtual outputs created with `output create`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputBackend {
    Wayland,
    Headless,
    Auto,
}

impl OutputBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputBackend::Wayland => "wayland",
            OutputBackend::Headless => "headless",
            OutputBackend::Auto => "auto",
        }
    }
}

impl fmt::Display for OutputBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wayland" => Ok(Self::Wayland),
            "headless" => Ok(Self::Headless),
            "auto" => Ok(Self::Auto),
            _ => Err(format!("Unknown output backend: {}", s)),
        }
    }
}

/// Icon shown next to a notification
///
/// The discriminants are the numeric values Hyprland expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotifyIcon {
    #[default]
    None = -1,
    Warning = 0,
    Info = 1,
    Hint = 2,
    Error = 3,
    Confused = 4,
    Ok = 5,
}

impl NotifyIcon {
    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::None),
            0 => Some(Self::Warning),
            1 => Some(Self::Info),
            2 => Some(Self::Hint),
            3 => Some(Self::Error),
            4 => Some(Self::Confused),
            5 => Some(Self::Ok),
            _ => None,
        }
    }
}

impl FromStr for NotifyIcon {
    type Err = String;

    /// Accepts icon names (`info`, `ok`, ...) or their numeric codes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code).ok_or_else(|| format!("Unknown notify icon: {}", s));
        }

        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "hint" => Ok(Self::Hint),
            "error" => Ok(Self::Error),
            "confused" => Ok(Self::Confused),
            "ok" => Ok(Self::Ok),
            _ => Err(format!("Unknown notify icon: {}", s)),
        }
    }
}

/// A single control-socket command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Call a keybind dispatcher with arguments
    Dispatch { dispatcher: String, args: Vec<String> },

    /// Set a config keyword at runtime, e.g. `general:gaps_in 4`
    Keyword { text: String },

    /// Force a config reload
    Reload,

    /// Enter kill mode (click a window to kill it, Escape to leave)
    Kill,

    /// Set the hyprcursor theme and size
    SetCursor { theme: String, size: u32 },

    /// Create a virtual output, optionally with an explicit name
    CreateOutput {
        backend: OutputBackend,
        name: Option<String>,
    },

    /// Remove a virtual output by name
    RemoveOutput { name: String },

    /// Switch the xkb layout of a keyboard
    ///
    /// `command` is `next`, `prev` or a layout index; `device` may also be
    /// `current` or `all`.
    SwitchXkbLayout { device: String, command: String },

    /// Show the error banner until the next config reload
    SetError { color: String, message: String },

    /// Hide the error banner
    DisableError,

    /// Show a notification through the built-in notification system
    ///
    /// A `color` of `None`, `""` or `"0"` selects the icon's default color.
    Notify {
        icon: NotifyIcon,
        timeout_ms: u32,
        color: Option<String>,
        message: String,
    },

    /// Dismiss up to `count` notifications; 0 or -1 dismisses all of them
    DismissNotify { count: i32 },
}

impl Command {
    /// Short name of the command kind, used in error reports
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Dispatch { .. } => "dispatch",
            Command::Keyword { .. } => "keyword",
            Command::Reload => "reload",
            Command::Kill => "kill",
            Command::SetCursor { .. } => "setcursor",
            Command::CreateOutput { .. } => "output create",
            Command::RemoveOutput { .. } => "output remove",
            Command::SwitchXkbLayout { .. } => "switchxkblayout",
            Command::SetError { .. } => "seterror",
            Command::DisableError => "seterror disable",
            Command::Notify { .. } => "notify",
            Command::DismissNotify { .. } => "dismissnotify",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Dispatch { dispatcher, args } => {
                write!(f, "dispatch {} {}", dispatcher, args.join(" "))
            }
            Command::Keyword { text } => write!(f, "keyword {}", text),
            Command::Reload => f.write_str("reload"),
            Command::Kill => f.write_str("kill"),
            Command::SetCursor { theme, size } => write!(f, "setcursor {} {}", theme, size),
            Command::CreateOutput { backend, name } => match name.as_deref() {
                Some(name) if !name.is_empty() => write!(f, "output create {} {}", backend, name),
                _ => write!(f, "output create {}", backend),
            },
            Command::RemoveOutput { name } => write!(f, "output remove {}", name),
            Command::SwitchXkbLayout { device, command } => {
                write!(f, "switchxkblayout {} {}", device, command)
            }
            Command::SetError { color, message } => write!(f, "seterror '{}' {}", color, message),
            Command::DisableError => f.write_str("seterror disable"),
            Command::Notify {
                icon,
                timeout_ms,
                color,
                message,
            } => {
                let color = match color.as_deref() {
                    None | Some("") => "0",
                    Some(color) => color,
                };
                write!(
                    f,
                    "notify {} {} {} \"{}\"",
                    icon.code(),
                    timeout_ms,
                    color,
                    message
                )
            }
            Command::DismissNotify { count } => {
                let count = if *count == 0 { -1 } else { *count };
                write!(f, "dismissnotify {}", count)
            }
        }
    }
}

impl FromStr for Command {
    type Err = HyprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (name, rest) = match input.split_once(' ') {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (input, ""),
        };
        let invalid = |reason: &str| HyprError::InvalidCommand {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        match name {
            "dispatch" => {
                let (dispatcher, args) = rest.split_once(' ').unwrap_or((rest, ""));
                if dispatcher.is_empty() {
                    return Err(invalid("missing dispatcher"));
                }
                Ok(Command::Dispatch {
                    dispatcher: dispatcher.to_string(),
                    args: args.split(' ').filter(|a| !a.is_empty()).map(String::from).collect(),
                })
            }
            "keyword" => {
                if rest.is_empty() {
                    return Err(invalid("missing keyword text"));
                }
                Ok(Command::Keyword {
                    text: rest.to_string(),
                })
            }
            "reload" | "kill" if !rest.is_empty() => Err(invalid("unexpected arguments")),
            "reload" => Ok(Command::Reload),
            "kill" => Ok(Command::Kill),
            "setcursor" => {
                let mut parts = rest.split_whitespace();
                let (Some(theme), Some(size), None) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(invalid("expected `setcursor <theme> <size>`"));
                };
                let size = size.parse().map_err(|_| invalid("cursor size must be a number"))?;
                Ok(Command::SetCursor {
                    theme: theme.to_string(),
                    size,
                })
            }
            "output" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some("create"), Some(backend), name, None) => Ok(Command::CreateOutput {
                        backend: backend.parse().map_err(|e: String| invalid(&e))?,
                        name: name.map(String::from),
                    }),
                    (Some("remove"), Some(name), None, None) => Ok(Command::RemoveOutput {
                        name: name.to_string(),
                    }),
                    _ => Err(invalid(
                        "expected `output create <backend> [name]` or `output remove <name>`",
                    )),
                }
            }
            "switchxkblayout" => {
                let mut parts = rest.split_whitespace();
                let (Some(device), Some(command), None) = (parts.next(), parts.next(), parts.next())
                else {
                    return Err(invalid("expected `switchxkblayout <device> <command>`"));
                };
                Ok(Command::SwitchXkbLayout {
                    device: device.to_string(),
                    command: command.to_string(),
                })
            }
            "seterror" if rest == "disable" => Ok(Command::DisableError),
            "seterror" => {
                let quoted = rest
                    .strip_prefix('\'')
                    .ok_or_else(|| invalid("color must be single-quoted"))?;
                let (color, message) = quoted
                    .split_once('\'')
                    .ok_or_else(|| invalid("unterminated color quote"))?;
                Ok(Command::SetError {
                    color: color.to_string(),
                    message: message.strip_prefix(' ').unwrap_or(message).to_string(),
                })
            }
            "notify" => {
                let mut parts = rest.splitn(4, ' ');
                let (Some(icon), Some(timeout), Some(color), Some(message)) =
                    (parts.next(), parts.next(), parts.next(), parts.next())
                else {
                    return Err(invalid("expected `notify <icon> <timeout> <color> <message>`"));
                };
                let icon = icon
                    .parse::<i32>()
                    .ok()
                    .and_then(NotifyIcon::from_code)
                    .ok_or_else(|| invalid("unknown icon code"))?;
                let timeout_ms = timeout
                    .parse()
                    .map_err(|_| invalid("timeout must be a number"))?;
                let color = unquote(color);
                Ok(Command::Notify {
                    icon,
                    timeout_ms,
                    color: (color != "0" && !color.is_empty()).then(|| color.to_string()),
                    message: unquote(message).to_string(),
                })
            }
            "dismissnotify" => {
                let count = rest
                    .parse()
                    .map_err(|_| invalid("count must be a number"))?;
                Ok(Command::DismissNotify { count })
            }
            "" => Err(invalid("empty command")),
            _ => Err(invalid("unknown command")),
        }
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
