//! Snapshot types decoded from `j/` query replies
//!
//! Only the fields Hyprland has reported consistently across releases are
//! modelled. Unknown fields are ignored and missing ones fall back to their
//! defaults, so older and newer compositors decode alike.

use serde::{Deserialize, Serialize};

/// A connected monitor (`j/monitors`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Monitor {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub make: String,
    pub model: String,
    pub serial: String,
    pub width: i32,
    pub height: i32,
    #[serde(rename = "refreshRate")]
    pub refresh_rate: f64,
    pub x: i32,
    pub y: i32,
    pub active_workspace: WorkspaceRef,
    pub special_workspace: WorkspaceRef,
    pub reserved: Vec<i32>,
    pub scale: f64,
    pub transform: i32,
    pub focused: bool,
    pub dpms_status: bool,
    pub vrr: bool,
    pub actively_tearing: bool,
    pub disabled: bool,
    pub current_format: String,
    pub available_modes: Vec<String>,
}

/// The `{id, name}` pair Hyprland embeds wherever it references a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceRef {
    pub id: i64,
    pub name: String,
}

/// A workspace (`j/workspaces`, `j/activeworkspace`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub monitor: String,
    #[serde(rename = "monitorID")]
    pub monitor_id: i64,
    pub windows: u32,
    #[serde(rename = "hasfullscreen")]
    pub has_fullscreen: bool,
    #[serde(rename = "lastwindow")]
    pub last_window: String,
    #[serde(rename = "lastwindowtitle")]
    pub last_window_title: String,
    #[serde(rename = "ispersistent")]
    pub is_persistent: bool,
}

/// A client window (`j/clients`, `j/activewindow`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Window {
    pub address: String,
    pub mapped: bool,
    pub hidden: bool,
    pub at: Vec<i32>,
    pub size: Vec<i32>,
    pub workspace: WorkspaceRef,
    pub floating: bool,
    #[serde(rename = "pseudo")]
    pub pseudo_tiled: bool,
    #[serde(rename = "monitor")]
    pub monitor_id: i64,
    pub class: String,
    pub title: String,
    pub initial_class: String,
    pub initial_title: String,
    pub pid: i64,
    pub xwayland: bool,
    pub pinned: bool,
    pub fullscreen: i32,
    pub fullscreen_client: i32,
    pub grouped: Vec<String>,
    pub tags: Vec<String>,
    pub swallowing: String,
    #[serde(rename = "focusHistoryID")]
    pub focus_history_id: i32,
    pub inhibiting_idle: bool,
}

/// All input devices (`j/devices`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTable {
    pub mice: Vec<Mouse>,
    pub keyboards: Vec<Keyboard>,
    pub tablets: Vec<Tablet>,
    pub touch: Vec<Touch>,
    pub switches: Vec<Switch>,
}

/// Fields shared by every input device
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Hid {
    pub address: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mouse {
    #[serde(flatten)]
    pub hid: Hid,
    pub default_speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyboard {
    #[serde(flatten)]
    pub hid: Hid,
    pub rules: String,
    pub model: String,
    pub layout: String,
    pub variant: String,
    pub options: String,
    pub active_keymap: String,
    pub caps_lock: bool,
    pub num_lock: bool,
    pub main: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tablet {
    #[serde(flatten)]
    pub hid: Hid,
    #[serde(rename = "type")]
    pub kind: String,
    pub belongs_to: Option<Hid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Touch {
    #[serde(flatten)]
    pub hid: Hid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Switch {
    #[serde(flatten)]
    pub hid: Hid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_decodes_hyprland_json() {
        let json = r#"[{
            "id": 0,
            "name": "DP-1",
            "description": "Dell Inc. DELL U2720Q",
            "make": "Dell Inc.",
            "model": "DELL U2720Q",
            "serial": "ABC123",
            "width": 3840,
            "height": 2160,
            "refreshRate": 59.997,
            "x": 0,
            "y": 0,
            "activeWorkspace": {"id": 1, "name": "1"},
            "specialWorkspace": {"id": 0, "name": ""},
            "reserved": [0, 32, 0, 0],
            "scale": 1.5,
            "transform": 0,
            "focused": true,
            "dpmsStatus": true,
            "vrr": false,
            "solitary": "0",
            "activelyTearing": false,
            "directScanoutTo": "0",
            "disabled": false,
            "currentFormat": "XRGB8888",
            "mirrorOf": "none",
            "availableModes": ["3840x2160@60.00Hz"]
        }]"#;

        let monitors: Vec<Monitor> = serde_json::from_str(json).unwrap();

        assert_eq!(monitors.len(), 1);
        let monitor = &monitors[0];
        assert_eq!(monitor.name, "DP-1");
        assert_eq!(monitor.width, 3840);
        assert!((monitor.refresh_rate - 59.997).abs() < f64::EPSILON);
        assert_eq!(monitor.active_workspace.id, 1);
        assert_eq!(monitor.reserved, vec![0, 32, 0, 0]);
        assert!(monitor.focused);
        assert!(monitor.dpms_status);
        assert_eq!(monitor.current_format, "XRGB8888");
    }

    #[test]
    fn test_window_decodes_with_renamed_fields() {
        let json = r#"{
            "address": "0x5a2f1c3e",
            "mapped": true,
            "hidden": false,
            "at": [10, 40],
            "size": [1900, 1030],
            "workspace": {"id": 2, "name": "2"},
            "floating": false,
            "pseudo": false,
            "monitor": 0,
            "class": "kitty",
            "title": "~",
            "initialClass": "kitty",
            "initialTitle": "kitty",
            "pid": 4242,
            "xwayland": false,
            "pinned": false,
            "fullscreen": 0,
            "fullscreenClient": 0,
            "grouped": [],
            "tags": [],
            "swallowing": "0x0",
            "focusHistoryID": 0,
            "inhibitingIdle": false
        }"#;

        let window: Window = serde_json::from_str(json).unwrap();

        assert_eq!(window.address, "0x5a2f1c3e");
        assert_eq!(window.workspace.name, "2");
        assert_eq!(window.initial_class, "kitty");
        assert_eq!(window.pid, 4242);
        assert_eq!(window.at, vec![10, 40]);
    }

    #[test]
    fn test_missing_fields_default() {
        let window: Window = serde_json::from_str("{}").unwrap();
        assert_eq!(window, Window::default());

        let workspace: Workspace =
            serde_json::from_str(r#"{"id": 3, "name": "3", "monitorID": 1}"#).unwrap();
        assert_eq!(workspace.id, 3);
        assert_eq!(workspace.monitor_id, 1);
        assert_eq!(workspace.monitor, "");
    }

    #[test]
    fn test_device_table_flattens_hid() {
        let json = r#"{
            "mice": [{"address": "0x1", "name": "logitech-mouse", "defaultSpeed": 0.0}],
            "keyboards": [{
                "address": "0x2",
                "name": "at-translated-set-2-keyboard",
                "rules": "", "model": "", "layout": "us,de", "variant": "",
                "options": "", "active_keymap": "English (US)",
                "caps_lock": false, "num_lock": true, "main": true
            }],
            "tablets": [],
            "touch": [],
            "switches": [{"address": "0x3", "name": "Lid Switch"}]
        }"#;

        let devices: DeviceTable = serde_json::from_str(json).unwrap();

        assert_eq!(devices.mice[0].hid.name, "logitech-mouse");
        assert_eq!(devices.keyboards[0].hid.address, "0x2");
        assert_eq!(devices.keyboards[0].active_keymap, "English (US)");
        assert!(devices.keyboards[0].main);
        assert_eq!(devices.switches[0].hid.name, "Lid Switch");
    }
}
