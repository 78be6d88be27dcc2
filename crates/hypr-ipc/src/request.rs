//! Request building and batch encoding

use super::command::{Command, NotifyIcon, OutputBackend};
use super::{ControlClient, HyprError};

/// Prefix marking a request that carries more than one command
pub const BATCH_PREFIX: &str = "[[BATCH]]";

/// Separator between commands in a batch
pub const BATCH_SEPARATOR: &str = " ; ";

/// Encode commands into the text sent over the control socket
///
/// One command is sent as-is; several are sent as a `[[BATCH]]` request,
/// executed by Hyprland in order.
pub fn encode(commands: &[Command]) -> String {
    let rendered: Vec<String> = commands.iter().map(Command::to_string).collect();

    if rendered.len() > 1 {
        format!("{}{}", BATCH_PREFIX, rendered.join(BATCH_SEPARATOR))
    } else {
        rendered.concat()
    }
}

/// An ordered list of commands sent as one request
///
/// # Example
///
/// ```ignore
/// Request::new()
///     .keyword("animations:enabled 0")
///     .dispatch("workspace", ["5"])
///     .send(&ControlClient::from_env()?)
///     .await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    commands: Vec<Command>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn add_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Call a keybind dispatcher
    ///
    /// Hyprland requires an argument, so a dispatcher given none is sent with
    /// the placeholder `unused`.
    pub fn dispatch<I, S>(self, dispatcher: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            args.push("unused".to_string());
        }

        self.add_command(Command::Dispatch {
            dispatcher: dispatcher.into(),
            args,
        })
    }

    pub fn keyword(self, text: impl Into<String>) -> Self {
        self.add_command(Command::Keyword { text: text.into() })
    }

    pub fn reload(self) -> Self {
        self.add_command(Command::Reload)
    }

    pub fn kill(self) -> Self {
        self.add_command(Command::Kill)
    }

    pub fn set_cursor(self, theme: impl Into<String>, size: u32) -> Self {
        self.add_command(Command::SetCursor {
            theme: theme.into(),
            size,
        })
    }

    pub fn create_output(self, backend: OutputBackend, name: Option<String>) -> Self {
        self.add_command(Command::CreateOutput { backend, name })
    }

    pub fn remove_output(self, name: impl Into<String>) -> Self {
        self.add_command(Command::RemoveOutput { name: name.into() })
    }

    pub fn switch_xkb_layout(self, device: impl Into<String>, command: impl Into<String>) -> Self {
        self.add_command(Command::SwitchXkbLayout {
            device: device.into(),
            command: command.into(),
        })
    }

    pub fn set_error(self, color: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_command(Command::SetError {
            color: color.into(),
            message: message.into(),
        })
    }

    pub fn disable_error(self) -> Self {
        self.add_command(Command::DisableError)
    }

    pub fn notify(
        self,
        icon: NotifyIcon,
        timeout_ms: u32,
        color: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        self.add_command(Command::Notify {
            icon,
            timeout_ms,
            color,
            message: message.into(),
        })
    }

    pub fn dismiss_notify(self, count: i32) -> Self {
        self.add_command(Command::DismissNotify { count })
    }

    /// Wire text for this request
    pub fn encode(&self) -> String {
        encode(&self.commands)
    }

    /// Send the request and check every command's reply
    ///
    /// # Errors
    ///
    /// Returns `HyprError::EmptyRequest` without connecting if no commands
    /// were added, otherwise any error from `ControlClient::execute()`.
    pub async fn send(&self, client: &ControlClient) -> Result<(), HyprError> {
        client.execute(self).await
    }
}

impl From<Vec<Command>> for Request {
    fn from(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

impl FromIterator<Command> for Request {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
