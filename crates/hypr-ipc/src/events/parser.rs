//! Event record decoding
//!
//! A record is `<tag>>><args>`. The tag selects a decoder from a static
//! table; the decoder splits `args` on commas into exactly the number of
//! fields the event defines, leaving any further commas in the last field.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::*;

/// Separator between a record's tag and its arguments
pub const TAG_SEPARATOR: &str = ">>";

type Decoder = fn(&str) -> Result<Event, EventParseError>;

static DECODERS: LazyLock<HashMap<&'static str, Decoder>> = LazyLock::new(|| {
    let table: [(&'static str, Decoder); 42] = [
        ("workspace", workspace),
        ("workspacev2", workspace_v2),
        ("focusedmon", focused_monitor),
        ("focusedmonv2", focused_monitor_v2),
        ("activewindow", active_window),
        ("activewindowv2", active_window_v2),
        ("fullscreen", fullscreen),
        ("monitorremoved", monitor_removed),
        ("monitorremovedv2", monitor_removed_v2),
        ("monitoradded", monitor_added),
        ("monitoraddedv2", monitor_added_v2),
        ("createworkspace", create_workspace),
        ("createworkspacev2", create_workspace_v2),
        ("destroyworkspace", destroy_workspace),
        ("destroyworkspacev2", destroy_workspace_v2),
        ("moveworkspace", move_workspace),
        ("moveworkspacev2", move_workspace_v2),
        ("renameworkspace", rename_workspace),
        ("activespecial", active_special),
        ("activespecialv2", active_special_v2),
        ("activelayout", active_layout),
        ("openwindow", open_window),
        ("closewindow", close_window),
        ("movewindow", move_window),
        ("movewindowv2", move_window_v2),
        ("openlayer", open_layer),
        ("closelayer", close_layer),
        ("submap", submap),
        ("changefloatingmode", change_floating_mode),
        ("urgent", urgent),
        ("screencast", screencast),
        ("windowtitle", window_title),
        ("windowtitlev2", window_title_v2),
        ("togglegroup", toggle_group),
        ("moveintogroup", move_into_group),
        ("moveoutofgroup", move_out_of_group),
        ("ignoregrouplock", ignore_group_lock),
        ("lockgroups", lock_groups),
        ("configreloaded", config_reloaded),
        ("pin", pin),
        ("minimized", minimized),
        ("bell", bell),
    ];
    table.into_iter().collect()
});

/// Decode one record into an `Event`
///
/// Never fails: unknown tags become `Event::Unhandled` and decoding errors
/// become `Event::Malformed`, both carrying the record verbatim.
///
/// # Example
///
/// ```ignore
/// let event = parse("workspacev2>>3,coding");
/// assert_eq!(event.tag(), "workspacev2");
/// ```
pub fn parse(record: &str) -> Event {
    let (tag, args) = match record.split_once(TAG_SEPARATOR) {
        Some((tag, args)) => (tag, Some(args)),
        None => (record, None),
    };

    let Some(decode) = DECODERS.get(tag) else {
        return Event::Unhandled {
            raw: record.to_string(),
        };
    };

    let decoded = match args {
        Some(args) => decode(args),
        None => Err(EventParseError::MissingSeparator),
    };

    decoded.unwrap_or_else(|reason| Event::Malformed {
        raw: record.to_string(),
        reason,
    })
}

/// Tags with a registered decoder, sorted
pub fn known_tags() -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = DECODERS.keys().copied().collect();
    tags.sort_unstable();
    tags
}

/// Split `args` into exactly `N` fields; the last keeps any remaining commas
fn fields<const N: usize>(args: &str) -> Result<[&str; N], EventParseError> {
    let mut out = [""; N];
    let mut count = 0;
    for (slot, field) in out.iter_mut().zip(args.splitn(N, ',')) {
        *slot = field;
        count += 1;
    }

    if count < N {
        return Err(EventParseError::MissingField {
            index: count,
            expected: N,
        });
    }
    Ok(out)
}

fn number(field: &'static str, value: &str) -> Result<i64, EventParseError> {
    value
        .parse()
        .map_err(|source| EventParseError::InvalidNumber {
            field,
            value: value.to_string(),
            source,
        })
}

/// `1` is true, any other integer is false
fn flag(field: &'static str, value: &str) -> Result<bool, EventParseError> {
    number(field, value).map(|n| n == 1)
}

fn workspace(args: &str) -> Result<Event, EventParseError> {
    let [name] = fields(args)?;
    Ok(Event::Workspace(WorkspaceEvent {
        name: name.to_string(),
    }))
}

fn workspace_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name] = fields(args)?;
    Ok(Event::WorkspaceV2(WorkspaceV2Event {
        id: number("id", id)?,
        name: name.to_string(),
    }))
}

fn focused_monitor(args: &str) -> Result<Event, EventParseError> {
    let [monitor, workspace] = fields(args)?;
    Ok(Event::FocusedMonitor(FocusedMonitorEvent {
        monitor: monitor.to_string(),
        workspace: workspace.to_string(),
    }))
}

fn focused_monitor_v2(args: &str) -> Result<Event, EventParseError> {
    let [monitor, workspace_id] = fields(args)?;
    Ok(Event::FocusedMonitorV2(FocusedMonitorV2Event {
        monitor: monitor.to_string(),
        workspace_id: number("workspace_id", workspace_id)?,
    }))
}

fn active_window(args: &str) -> Result<Event, EventParseError> {
    let [class, title] = fields(args)?;
    Ok(Event::ActiveWindow(ActiveWindowEvent {
        class: class.to_string(),
        title: title.to_string(),
    }))
}

fn active_window_v2(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    Ok(Event::ActiveWindowV2(ActiveWindowV2Event {
        address: address.into(),
    }))
}

fn fullscreen(args: &str) -> Result<Event, EventParseError> {
    let [state] = fields(args)?;
    let mode = if flag("state", state)? {
        FullscreenMode::Enter
    } else {
        FullscreenMode::Exit
    };
    Ok(Event::Fullscreen(FullscreenEvent { mode }))
}

fn monitor_removed(args: &str) -> Result<Event, EventParseError> {
    let [name] = fields(args)?;
    Ok(Event::MonitorRemoved(MonitorRemovedEvent {
        name: name.to_string(),
    }))
}

fn monitor_removed_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name, description] = fields(args)?;
    Ok(Event::MonitorRemovedV2(MonitorRemovedV2Event {
        id: number("id", id)?,
        name: name.to_string(),
        description: description.to_string(),
    }))
}

fn monitor_added(args: &str) -> Result<Event, EventParseError> {
    let [name] = fields(args)?;
    Ok(Event::MonitorAdded(MonitorAddedEvent {
        name: name.to_string(),
    }))
}

fn monitor_added_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name, description] = fields(args)?;
    Ok(Event::MonitorAddedV2(MonitorAddedV2Event {
        id: number("id", id)?,
        name: name.to_string(),
        description: description.to_string(),
    }))
}

fn create_workspace(args: &str) -> Result<Event, EventParseError> {
    let [name] = fields(args)?;
    Ok(Event::CreateWorkspace(CreateWorkspaceEvent {
        name: name.to_string(),
    }))
}

fn create_workspace_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name] = fields(args)?;
    Ok(Event::CreateWorkspaceV2(CreateWorkspaceV2Event {
        id: number("id", id)?,
        name: name.to_string(),
    }))
}

fn destroy_workspace(args: &str) -> Result<Event, EventParseError> {
    let [name] = fields(args)?;
    Ok(Event::DestroyWorkspace(DestroyWorkspaceEvent {
        name: name.to_string(),
    }))
}

fn destroy_workspace_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name] = fields(args)?;
    Ok(Event::DestroyWorkspaceV2(DestroyWorkspaceV2Event {
        id: number("id", id)?,
        name: name.to_string(),
    }))
}

fn move_workspace(args: &str) -> Result<Event, EventParseError> {
    let [name, monitor] = fields(args)?;
    Ok(Event::MoveWorkspace(MoveWorkspaceEvent {
        name: name.to_string(),
        monitor: monitor.to_string(),
    }))
}

fn move_workspace_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name, monitor] = fields(args)?;
    Ok(Event::MoveWorkspaceV2(MoveWorkspaceV2Event {
        id: number("id", id)?,
        name: name.to_string(),
        monitor: monitor.to_string(),
    }))
}

fn rename_workspace(args: &str) -> Result<Event, EventParseError> {
    let [id, new_name] = fields(args)?;
    Ok(Event::RenameWorkspace(RenameWorkspaceEvent {
        id: number("id", id)?,
        new_name: new_name.to_string(),
    }))
}

fn active_special(args: &str) -> Result<Event, EventParseError> {
    let [name, monitor] = fields(args)?;
    Ok(Event::ActiveSpecial(ActiveSpecialEvent {
        name: name.to_string(),
        monitor: monitor.to_string(),
    }))
}

fn active_special_v2(args: &str) -> Result<Event, EventParseError> {
    let [id, name, monitor] = fields(args)?;
    let id = if id.is_empty() {
        None
    } else {
        Some(number("id", id)?)
    };
    Ok(Event::ActiveSpecialV2(ActiveSpecialV2Event {
        id,
        name: name.to_string(),
        monitor: monitor.to_string(),
    }))
}

fn active_layout(args: &str) -> Result<Event, EventParseError> {
    let [keyboard, layout] = fields(args)?;
    Ok(Event::ActiveLayout(ActiveLayoutEvent {
        keyboard: keyboard.to_string(),
        layout: layout.to_string(),
    }))
}

fn open_window(args: &str) -> Result<Event, EventParseError> {
    let [address, workspace, class, title] = fields(args)?;
    Ok(Event::OpenWindow(OpenWindowEvent {
        address: address.into(),
        workspace: workspace.to_string(),
        class: class.to_string(),
        title: title.to_string(),
    }))
}

fn close_window(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    Ok(Event::CloseWindow(CloseWindowEvent {
        address: address.into(),
    }))
}

fn move_window(args: &str) -> Result<Event, EventParseError> {
    let [address, workspace] = fields(args)?;
    Ok(Event::MoveWindow(MoveWindowEvent {
        address: address.into(),
        workspace: workspace.to_string(),
    }))
}

fn move_window_v2(args: &str) -> Result<Event, EventParseError> {
    let [address, workspace_id, workspace] = fields(args)?;
    Ok(Event::MoveWindowV2(MoveWindowV2Event {
        address: address.into(),
        workspace_id: number("workspace_id", workspace_id)?,
        workspace: workspace.to_string(),
    }))
}

fn open_layer(args: &str) -> Result<Event, EventParseError> {
    let [namespace] = fields(args)?;
    Ok(Event::OpenLayer(OpenLayerEvent {
        namespace: namespace.to_string(),
    }))
}

fn close_layer(args: &str) -> Result<Event, EventParseError> {
    let [namespace] = fields(args)?;
    Ok(Event::CloseLayer(CloseLayerEvent {
        namespace: namespace.to_string(),
    }))
}

fn submap(args: &str) -> Result<Event, EventParseError> {
    let [name] = fields(args)?;
    Ok(Event::Submap(SubmapEvent {
        name: name.to_string(),
    }))
}

fn change_floating_mode(args: &str) -> Result<Event, EventParseError> {
    let [address, floating] = fields(args)?;
    Ok(Event::ChangeFloatingMode(ChangeFloatingModeEvent {
        address: address.into(),
        floating: flag("floating", floating)?,
    }))
}

fn urgent(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    Ok(Event::Urgent(UrgentEvent {
        address: address.into(),
    }))
}

fn screencast(args: &str) -> Result<Event, EventParseError> {
    let [state, owner] = fields(args)?;
    let owner = match owner {
        "0" => ScreencastOwner::Monitor,
        "1" => ScreencastOwner::Window,
        other => {
            return Err(EventParseError::UnexpectedValue {
                field: "owner",
                value: other.to_string(),
            })
        }
    };
    Ok(Event::Screencast(ScreencastEvent {
        active: flag("state", state)?,
        owner,
    }))
}

fn window_title(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    Ok(Event::WindowTitle(WindowTitleEvent {
        address: address.into(),
    }))
}

fn window_title_v2(args: &str) -> Result<Event, EventParseError> {
    let [address, title] = fields(args)?;
    Ok(Event::WindowTitleV2(WindowTitleV2Event {
        address: address.into(),
        title: title.to_string(),
    }))
}

fn toggle_group(args: &str) -> Result<Event, EventParseError> {
    let mut parts = args.split(',');
    let state = parts.next().unwrap_or_default();
    Ok(Event::ToggleGroup(ToggleGroupEvent {
        active: flag("state", state)?,
        addresses: parts
            .filter(|address| !address.is_empty())
            .map(WindowAddress::from)
            .collect(),
    }))
}

fn move_into_group(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    Ok(Event::MoveIntoGroup(MoveIntoGroupEvent {
        address: address.into(),
    }))
}

fn move_out_of_group(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    Ok(Event::MoveOutOfGroup(MoveOutOfGroupEvent {
        address: address.into(),
    }))
}

fn ignore_group_lock(args: &str) -> Result<Event, EventParseError> {
    let [state] = fields(args)?;
    Ok(Event::IgnoreGroupLock(IgnoreGroupLockEvent {
        ignored: flag("state", state)?,
    }))
}

fn lock_groups(args: &str) -> Result<Event, EventParseError> {
    let [state] = fields(args)?;
    Ok(Event::LockGroups(LockGroupsEvent {
        locked: flag("state", state)?,
    }))
}

fn config_reloaded(_args: &str) -> Result<Event, EventParseError> {
    Ok(Event::ConfigReloaded)
}

fn pin(args: &str) -> Result<Event, EventParseError> {
    let [address, pinned] = fields(args)?;
    Ok(Event::Pin(PinEvent {
        address: address.into(),
        pinned: flag("pinned", pinned)?,
    }))
}

fn minimized(args: &str) -> Result<Event, EventParseError> {
    let [address, minimized] = fields(args)?;
    Ok(Event::Minimized(MinimizedEvent {
        address: address.into(),
        minimized: flag("minimized", minimized)?,
    }))
}

fn bell(args: &str) -> Result<Event, EventParseError> {
    let [address] = fields(args)?;
    let address = (!address.is_empty()).then(|| WindowAddress::from(address));
    Ok(Event::Bell(BellEvent { address }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> WindowAddress {
        WindowAddress::from(s)
    }

    #[test]
    fn test_registry_has_every_tag() {
        let tags = known_tags();

        assert_eq!(tags.len(), 42);
        for tag in ["workspace", "monitoraddedv2", "togglegroup", "bell", "configreloaded"] {
            assert!(tags.contains(&tag), "missing {}", tag);
        }
    }

    #[test]
    fn test_workspace() {
        assert_eq!(
            parse("workspace>>main"),
            Event::Workspace(WorkspaceEvent {
                name: "main".to_string()
            })
        );
    }

    #[test]
    fn test_monitor_added_v2() {
        assert_eq!(
            parse("monitoraddedv2>>1,DP-1,Description"),
            Event::MonitorAddedV2(MonitorAddedV2Event {
                id: 1,
                name: "DP-1".to_string(),
                description: "Description".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_tag_is_unhandled() {
        assert_eq!(
            parse("unknowntag>>a,b"),
            Event::Unhandled {
                raw: "unknowntag>>a,b".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_id_is_malformed() {
        let event = parse("workspacev2>>notanumber,x");

        match event {
            Event::Malformed { raw, reason } => {
                assert_eq!(raw, "workspacev2>>notanumber,x");
                assert!(matches!(
                    reason,
                    EventParseError::InvalidNumber { field: "id", .. }
                ));
            }
            other => panic!("Expected Malformed, got: {:?}", other),
        }
    }

    #[test]
    fn test_known_tag_without_separator_is_malformed() {
        assert_eq!(
            parse("openwindow"),
            Event::Malformed {
                raw: "openwindow".to_string(),
                reason: EventParseError::MissingSeparator,
            }
        );
        assert_eq!(
            parse("garbage"),
            Event::Unhandled {
                raw: "garbage".to_string()
            }
        );
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        assert_eq!(
            parse("openwindow>>abc,2,kitty"),
            Event::Malformed {
                raw: "openwindow>>abc,2,kitty".to_string(),
                reason: EventParseError::MissingField {
                    index: 3,
                    expected: 4
                },
            }
        );
    }

    #[test]
    fn test_last_field_keeps_commas() {
        assert_eq!(
            parse("openwindow>>80e62df0,2,jetbrains-goland,win430,Hello, World"),
            Event::OpenWindow(OpenWindowEvent {
                address: addr("80e62df0"),
                workspace: "2".to_string(),
                class: "jetbrains-goland".to_string(),
                title: "win430,Hello, World".to_string(),
            })
        );
        assert_eq!(
            parse("activewindow>>firefox,Inbox (3), Mail"),
            Event::ActiveWindow(ActiveWindowEvent {
                class: "firefox".to_string(),
                title: "Inbox (3), Mail".to_string(),
            })
        );
        assert_eq!(
            parse("monitorremovedv2>>2,HDMI-A-1,LG Electronics, 27GL850"),
            Event::MonitorRemovedV2(MonitorRemovedV2Event {
                id: 2,
                name: "HDMI-A-1".to_string(),
                description: "LG Electronics, 27GL850".to_string(),
            })
        );
    }

    #[test]
    fn test_workspace_events() {
        assert_eq!(
            parse("workspacev2>>3,coding"),
            Event::WorkspaceV2(WorkspaceV2Event {
                id: 3,
                name: "coding".to_string()
            })
        );
        assert_eq!(
            parse("createworkspace>>4"),
            Event::CreateWorkspace(CreateWorkspaceEvent {
                name: "4".to_string()
            })
        );
        assert_eq!(
            parse("createworkspacev2>>4,4"),
            Event::CreateWorkspaceV2(CreateWorkspaceV2Event {
                id: 4,
                name: "4".to_string()
            })
        );
        assert_eq!(
            parse("destroyworkspace>>special:scratch"),
            Event::DestroyWorkspace(DestroyWorkspaceEvent {
                name: "special:scratch".to_string()
            })
        );
        assert_eq!(
            parse("destroyworkspacev2>>-98,special:scratch"),
            Event::DestroyWorkspaceV2(DestroyWorkspaceV2Event {
                id: -98,
                name: "special:scratch".to_string()
            })
        );
        assert_eq!(
            parse("moveworkspace>>2,DP-2"),
            Event::MoveWorkspace(MoveWorkspaceEvent {
                name: "2".to_string(),
                monitor: "DP-2".to_string()
            })
        );
        assert_eq!(
            parse("moveworkspacev2>>2,2,DP-2"),
            Event::MoveWorkspaceV2(MoveWorkspaceV2Event {
                id: 2,
                name: "2".to_string(),
                monitor: "DP-2".to_string()
            })
        );
        assert_eq!(
            parse("renameworkspace>>5,music"),
            Event::RenameWorkspace(RenameWorkspaceEvent {
                id: 5,
                new_name: "music".to_string()
            })
        );
    }

    #[test]
    fn test_monitor_events() {
        assert_eq!(
            parse("focusedmon>>DP-1,3"),
            Event::FocusedMonitor(FocusedMonitorEvent {
                monitor: "DP-1".to_string(),
                workspace: "3".to_string()
            })
        );
        assert_eq!(
            parse("focusedmonv2>>DP-1,3"),
            Event::FocusedMonitorV2(FocusedMonitorV2Event {
                monitor: "DP-1".to_string(),
                workspace_id: 3
            })
        );
        assert_eq!(
            parse("monitorremoved>>HDMI-A-1"),
            Event::MonitorRemoved(MonitorRemovedEvent {
                name: "HDMI-A-1".to_string()
            })
        );
        assert_eq!(
            parse("monitoradded>>HDMI-A-1"),
            Event::MonitorAdded(MonitorAddedEvent {
                name: "HDMI-A-1".to_string()
            })
        );
    }

    #[test]
    fn test_special_workspace_events() {
        assert_eq!(
            parse("activespecial>>special:term,DP-1"),
            Event::ActiveSpecial(ActiveSpecialEvent {
                name: "special:term".to_string(),
                monitor: "DP-1".to_string()
            })
        );
        assert_eq!(
            parse("activespecialv2>>-98,special:term,DP-1"),
            Event::ActiveSpecialV2(ActiveSpecialV2Event {
                id: Some(-98),
                name: "special:term".to_string(),
                monitor: "DP-1".to_string()
            })
        );
        assert_eq!(
            parse("activespecialv2>>,,DP-1"),
            Event::ActiveSpecialV2(ActiveSpecialV2Event {
                id: None,
                name: String::new(),
                monitor: "DP-1".to_string()
            })
        );
    }

    #[test]
    fn test_window_events() {
        assert_eq!(
            parse("activewindowv2>>55d1e3a0b2c0"),
            Event::ActiveWindowV2(ActiveWindowV2Event {
                address: addr("55d1e3a0b2c0")
            })
        );
        assert_eq!(
            parse("closewindow>>55d1e3a0b2c0"),
            Event::CloseWindow(CloseWindowEvent {
                address: addr("55d1e3a0b2c0")
            })
        );
        assert_eq!(
            parse("movewindow>>55d1e3a0b2c0,4"),
            Event::MoveWindow(MoveWindowEvent {
                address: addr("55d1e3a0b2c0"),
                workspace: "4".to_string()
            })
        );
        assert_eq!(
            parse("movewindowv2>>55d1e3a0b2c0,4,web"),
            Event::MoveWindowV2(MoveWindowV2Event {
                address: addr("55d1e3a0b2c0"),
                workspace_id: 4,
                workspace: "web".to_string()
            })
        );
        assert_eq!(
            parse("changefloatingmode>>55d1e3a0b2c0,1"),
            Event::ChangeFloatingMode(ChangeFloatingModeEvent {
                address: addr("55d1e3a0b2c0"),
                floating: true
            })
        );
        assert_eq!(
            parse("urgent>>55d1e3a0b2c0"),
            Event::Urgent(UrgentEvent {
                address: addr("55d1e3a0b2c0")
            })
        );
        assert_eq!(
            parse("windowtitle>>55d1e3a0b2c0"),
            Event::WindowTitle(WindowTitleEvent {
                address: addr("55d1e3a0b2c0")
            })
        );
        assert_eq!(
            parse("windowtitlev2>>55d1e3a0b2c0,vim, main.rs"),
            Event::WindowTitleV2(WindowTitleV2Event {
                address: addr("55d1e3a0b2c0"),
                title: "vim, main.rs".to_string()
            })
        );
        assert_eq!(
            parse("pin>>55d1e3a0b2c0,0"),
            Event::Pin(PinEvent {
                address: addr("55d1e3a0b2c0"),
                pinned: false
            })
        );
        assert_eq!(
            parse("minimized>>55d1e3a0b2c0,1"),
            Event::Minimized(MinimizedEvent {
                address: addr("55d1e3a0b2c0"),
                minimized: true
            })
        );
    }

    #[test]
    fn test_flags_treat_only_one_as_true() {
        assert_eq!(
            parse("fullscreen>>1"),
            Event::Fullscreen(FullscreenEvent {
                mode: FullscreenMode::Enter
            })
        );
        assert_eq!(
            parse("fullscreen>>0"),
            Event::Fullscreen(FullscreenEvent {
                mode: FullscreenMode::Exit
            })
        );
        assert_eq!(
            parse("lockgroups>>2"),
            Event::LockGroups(LockGroupsEvent { locked: false })
        );
        assert_eq!(
            parse("ignoregrouplock>>1"),
            Event::IgnoreGroupLock(IgnoreGroupLockEvent { ignored: true })
        );
        assert!(parse("pin>>abc,yes").is_malformed());
    }

    #[test]
    fn test_layer_submap_and_layout_events() {
        assert_eq!(
            parse("openlayer>>waybar"),
            Event::OpenLayer(OpenLayerEvent {
                namespace: "waybar".to_string()
            })
        );
        assert_eq!(
            parse("closelayer>>rofi"),
            Event::CloseLayer(CloseLayerEvent {
                namespace: "rofi".to_string()
            })
        );
        assert_eq!(
            parse("submap>>"),
            Event::Submap(SubmapEvent {
                name: String::new()
            })
        );
        assert_eq!(
            parse("activelayout>>at-translated-set-2-keyboard,English (US)"),
            Event::ActiveLayout(ActiveLayoutEvent {
                keyboard: "at-translated-set-2-keyboard".to_string(),
                layout: "English (US)".to_string()
            })
        );
    }

    #[test]
    fn test_screencast() {
        assert_eq!(
            parse("screencast>>1,0"),
            Event::Screencast(ScreencastEvent {
                active: true,
                owner: ScreencastOwner::Monitor
            })
        );
        assert_eq!(
            parse("screencast>>0,1"),
            Event::Screencast(ScreencastEvent {
                active: false,
                owner: ScreencastOwner::Window
            })
        );
        assert_eq!(
            parse("screencast>>1,7"),
            Event::Malformed {
                raw: "screencast>>1,7".to_string(),
                reason: EventParseError::UnexpectedValue {
                    field: "owner",
                    value: "7".to_string()
                },
            }
        );
    }

    #[test]
    fn test_group_events() {
        assert_eq!(
            parse("togglegroup>>1,5a1,5b2,"),
            Event::ToggleGroup(ToggleGroupEvent {
                active: true,
                addresses: vec![addr("5a1"), addr("5b2")]
            })
        );
        assert_eq!(
            parse("togglegroup>>0"),
            Event::ToggleGroup(ToggleGroupEvent {
                active: false,
                addresses: vec![]
            })
        );
        assert!(parse("togglegroup>>").is_malformed());
        assert_eq!(
            parse("moveintogroup>>5a1"),
            Event::MoveIntoGroup(MoveIntoGroupEvent {
                address: addr("5a1")
            })
        );
        assert_eq!(
            parse("moveoutofgroup>>5a1"),
            Event::MoveOutOfGroup(MoveOutOfGroupEvent {
                address: addr("5a1")
            })
        );
    }

    #[test]
    fn test_config_reloaded_ignores_args() {
        assert_eq!(parse("configreloaded>>"), Event::ConfigReloaded);
        assert_eq!(parse("configreloaded>>anything"), Event::ConfigReloaded);
    }

    #[test]
    fn test_bell() {
        assert_eq!(
            parse("bell>>5a1"),
            Event::Bell(BellEvent {
                address: Some(addr("5a1"))
            })
        );
        assert_eq!(parse("bell>>"), Event::Bell(BellEvent { address: None }));
    }

    #[test]
    fn test_every_known_tag_parses_to_itself() {
        for tag in known_tags() {
            let event = ["1", "1,1", "1,1,1", "1,1,1,1"]
                .iter()
                .map(|args| parse(&format!("{}>>{}", tag, args)))
                .find(|event| !event.is_malformed())
                .unwrap_or_else(|| panic!("no argument shape decodes {}", tag));

            assert_eq!(event.tag(), tag);
        }
    }
}
