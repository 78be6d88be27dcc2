//! Typed event values
//!
//! Each known tag maps to one `Event` variant wrapping a payload struct.
//! Records that cannot be decoded are kept as `Event::Unhandled` (unknown tag)
//! or `Event::Malformed` (known tag, bad arguments) so a listener always sees
//! every record in order.

use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Opaque window identifier as printed by Hyprland (hex, without `0x` in
/// most events)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowAddress(String);

impl WindowAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowAddress {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

impl From<String> for WindowAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl fmt::Display for WindowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a record with a known tag could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    /// The record has no `>>` between tag and arguments
    #[error("record has no '>>' separator")]
    MissingSeparator,

    /// Fewer comma-separated fields than the event defines
    #[error("missing field {index} of {expected}")]
    MissingField { index: usize, expected: usize },

    #[error("field {field} is not a number: {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("field {field} has unexpected value {value:?}")]
    UnexpectedValue { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenMode {
    Enter,
    Exit,
}

/// What a screencast is capturing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreencastOwner {
    Monitor,
    Window,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceV2Event {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedMonitorEvent {
    pub monitor: String,
    pub workspace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedMonitorV2Event {
    pub monitor: String,
    pub workspace_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindowEvent {
    pub class: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindowV2Event {
    pub address: WindowAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenEvent {
    pub mode: FullscreenMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRemovedEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRemovedV2Event {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorAddedEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorAddedV2Event {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkspaceEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkspaceV2Event {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyWorkspaceEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyWorkspaceV2Event {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveWorkspaceEvent {
    pub name: String,
    pub monitor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveWorkspaceV2Event {
    pub id: i64,
    pub name: String,
    pub monitor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameWorkspaceEvent {
    pub id: i64,
    pub new_name: String,
}

/// The special workspace shown on a monitor changed
///
/// `name` is empty when the special workspace was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSpecialEvent {
    pub name: String,
    pub monitor: String,
}

/// Like `ActiveSpecialEvent`, with the workspace id
///
/// `id` is `None` when the special workspace was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSpecialV2Event {
    pub id: Option<i64>,
    pub name: String,
    pub monitor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLayoutEvent {
    pub keyboard: String,
    pub layout: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWindowEvent {
    pub address: WindowAddress,
    pub workspace: String,
    pub class: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseWindowEvent {
    pub address: WindowAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveWindowEvent {
    pub address: WindowAddress,
    pub workspace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveWindowV2Event {
    pub address: WindowAddress,
    pub workspace_id: i64,
    pub workspace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLayerEvent {
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseLayerEvent {
    pub namespace: String,
}

/// The active keybind submap changed; empty `name` is the default map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmapEvent {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeFloatingModeEvent {
    pub address: WindowAddress,
    pub floating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgentEvent {
    pub address: WindowAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreencastEvent {
    pub active: bool,
    pub owner: ScreencastOwner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTitleEvent {
    pub address: WindowAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTitleV2Event {
    pub address: WindowAddress,
    pub title: String,
}

/// A group was toggled; `addresses` lists its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleGroupEvent {
    pub active: bool,
    pub addresses: Vec<WindowAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntoGroupEvent {
    pub address: WindowAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutOfGroupEvent {
    pub address: WindowAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreGroupLockEvent {
    pub ignored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockGroupsEvent {
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinEvent {
    pub address: WindowAddress,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizedEvent {
    pub address: WindowAddress,
    pub minimized: bool,
}

/// A window requested the bell; `address` is `None` when no window is
/// associated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BellEvent {
    pub address: Option<WindowAddress>,
}

/// One record from the event socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Workspace(WorkspaceEvent),
    WorkspaceV2(WorkspaceV2Event),
    FocusedMonitor(FocusedMonitorEvent),
    FocusedMonitorV2(FocusedMonitorV2Event),
    ActiveWindow(ActiveWindowEvent),
    ActiveWindowV2(ActiveWindowV2Event),
    Fullscreen(FullscreenEvent),
    MonitorRemoved(MonitorRemovedEvent),
    MonitorRemovedV2(MonitorRemovedV2Event),
    MonitorAdded(MonitorAddedEvent),
    MonitorAddedV2(MonitorAddedV2Event),
    CreateWorkspace(CreateWorkspaceEvent),
    CreateWorkspaceV2(CreateWorkspaceV2Event),
    DestroyWorkspace(DestroyWorkspaceEvent),
    DestroyWorkspaceV2(DestroyWorkspaceV2Event),
    MoveWorkspace(MoveWorkspaceEvent),
    MoveWorkspaceV2(MoveWorkspaceV2Event),
    RenameWorkspace(RenameWorkspaceEvent),
    ActiveSpecial(ActiveSpecialEvent),
    ActiveSpecialV2(ActiveSpecialV2Event),
    ActiveLayout(ActiveLayoutEvent),
    OpenWindow(OpenWindowEvent),
    CloseWindow(CloseWindowEvent),
    MoveWindow(MoveWindowEvent),
    MoveWindowV2(MoveWindowV2Event),
    OpenLayer(OpenLayerEvent),
    CloseLayer(CloseLayerEvent),
    Submap(SubmapEvent),
    ChangeFloatingMode(ChangeFloatingModeEvent),
    Urgent(UrgentEvent),
    Screencast(ScreencastEvent),
    WindowTitle(WindowTitleEvent),
    WindowTitleV2(WindowTitleV2Event),
    ToggleGroup(ToggleGroupEvent),
    MoveIntoGroup(MoveIntoGroupEvent),
    MoveOutOfGroup(MoveOutOfGroupEvent),
    IgnoreGroupLock(IgnoreGroupLockEvent),
    LockGroups(LockGroupsEvent),
    ConfigReloaded,
    Pin(PinEvent),
    Minimized(MinimizedEvent),
    Bell(BellEvent),

    /// A record whose tag is not known; kept verbatim
    Unhandled { raw: String },

    /// A record with a known tag whose arguments failed to decode
    Malformed {
        raw: String,
        reason: EventParseError,
    },
}

impl Event {
    /// The record tag this event was decoded from
    ///
    /// For `Unhandled` and `Malformed` this is the text before `>>` in the raw
    /// record.
    pub fn tag(&self) -> &str {
        match self {
            Event::Workspace(_) => "workspace",
            Event::WorkspaceV2(_) => "workspacev2",
            Event::FocusedMonitor(_) => "focusedmon",
            Event::FocusedMonitorV2(_) => "focusedmonv2",
            Event::ActiveWindow(_) => "activewindow",
            Event::ActiveWindowV2(_) => "activewindowv2",
            Event::Fullscreen(_) => "fullscreen",
            Event::MonitorRemoved(_) => "monitorremoved",
            Event::MonitorRemovedV2(_) => "monitorremovedv2",
            Event::MonitorAdded(_) => "monitoradded",
            Event::MonitorAddedV2(_) => "monitoraddedv2",
            Event::CreateWorkspace(_) => "createworkspace",
            Event::CreateWorkspaceV2(_) => "createworkspacev2",
            Event::DestroyWorkspace(_) => "destroyworkspace",
            Event::DestroyWorkspaceV2(_) => "destroyworkspacev2",
            Event::MoveWorkspace(_) => "moveworkspace",
            Event::MoveWorkspaceV2(_) => "moveworkspacev2",
            Event::RenameWorkspace(_) => "renameworkspace",
            Event::ActiveSpecial(_) => "activespecial",
            Event::ActiveSpecialV2(_) => "activespecialv2",
            Event::ActiveLayout(_) => "activelayout",
            Event::OpenWindow(_) => "openwindow",
            Event::CloseWindow(_) => "closewindow",
            Event::MoveWindow(_) => "movewindow",
            Event::MoveWindowV2(_) => "movewindowv2",
            Event::OpenLayer(_) => "openlayer",
            Event::CloseLayer(_) => "closelayer",
            Event::Submap(_) => "submap",
            Event::ChangeFloatingMode(_) => "changefloatingmode",
            Event::Urgent(_) => "urgent",
            Event::Screencast(_) => "screencast",
            Event::WindowTitle(_) => "windowtitle",
            Event::WindowTitleV2(_) => "windowtitlev2",
            Event::ToggleGroup(_) => "togglegroup",
            Event::MoveIntoGroup(_) => "moveintogroup",
            Event::MoveOutOfGroup(_) => "moveoutofgroup",
            Event::IgnoreGroupLock(_) => "ignoregrouplock",
            Event::LockGroups(_) => "lockgroups",
            Event::ConfigReloaded => "configreloaded",
            Event::Pin(_) => "pin",
            Event::Minimized(_) => "minimized",
            Event::Bell(_) => "bell",
            Event::Unhandled { raw } | Event::Malformed { raw, .. } => raw_tag(raw),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Event::Malformed { .. })
    }

    pub fn is_unhandled(&self) -> bool {
        matches!(self, Event::Unhandled { .. })
    }
}

fn raw_tag(raw: &str) -> &str {
    raw.split_once(">>").map_or(raw, |(tag, _)| tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_address_is_opaque() {
        let address = WindowAddress::from("55d1e3a0b2c0");

        assert_eq!(address.as_str(), "55d1e3a0b2c0");
        assert_eq!(address.to_string(), "55d1e3a0b2c0");
        assert_eq!(address, WindowAddress::new(String::from("55d1e3a0b2c0")));
    }

    #[test]
    fn test_tag_of_unrecognised_records() {
        let unhandled = Event::Unhandled {
            raw: "newfeature>>a,b".to_string(),
        };
        assert_eq!(unhandled.tag(), "newfeature");
        assert!(unhandled.is_unhandled());

        let malformed = Event::Malformed {
            raw: "configreloaded".to_string(),
            reason: EventParseError::MissingSeparator,
        };
        assert_eq!(malformed.tag(), "configreloaded");
        assert!(malformed.is_malformed());
    }

    #[test]
    fn test_parse_error_messages() {
        let err = EventParseError::MissingField {
            index: 1,
            expected: 2,
        };
        assert_eq!(err.to_string(), "missing field 1 of 2");

        let source = "x".parse::<i64>().unwrap_err();
        let err = EventParseError::InvalidNumber {
            field: "id",
            value: "x".to_string(),
            source,
        };
        assert!(err.to_string().contains("id"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
