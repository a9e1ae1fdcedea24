use crate::app::runtime::AttendanceStatus;
use crate::app::state::picker::{CommitMode, ModalConfig, OptionValue, PickerEvent, PickerOption};
use crate::app::state::{LogKind, RosterPicker, StatusFilter, ThemeName};
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers};

const ROSTER_PAGE_STEP: isize = 10;

fn picker_options(app: &AppState, target: RosterPicker) -> Vec<PickerOption> {
    match target {
        RosterPicker::Theme => ThemeName::picker_options(),
        other => app.roster.options_for(other),
    }
}

fn initial_value(app: &AppState, target: RosterPicker) -> Option<OptionValue> {
    let filter = &app.roster.filter;
    match target {
        RosterPicker::Class => filter.class_id.clone(),
        RosterPicker::Month => filter.month.clone(),
        RosterPicker::Status => Some(filter.status.value()),
        RosterPicker::LeaveType => app
            .roster
            .selected_record()
            .and_then(|record| record.leave_type.clone()),
        RosterPicker::Theme => Some(OptionValue::from(app.theme.name.as_str())),
    }
}

fn picker_config(
    app: &AppState,
    target: RosterPicker,
    initial: Option<OptionValue>,
) -> ModalConfig {
    let config = ModalConfig::new(target.title(), picker_options(app, target))
        .with_initial_value(initial);
    match target {
        RosterPicker::Class | RosterPicker::Month => {
            config.with_mode(CommitMode::Deferred).with_reload()
        }
        RosterPicker::Status | RosterPicker::LeaveType | RosterPicker::Theme => config,
    }
}

/// Opens the picker for `target`, replacing any picker already on screen.
pub(crate) fn open_picker(app: &mut AppState, target: RosterPicker) {
    if target == RosterPicker::LeaveType && app.roster.selected_record().is_none() {
        app.push_line(LogKind::Status, "Select a student before choosing a leave type");
        return;
    }
    let config = picker_config(app, target, initial_value(app, target));
    app.picker.open(config);
    app.picker_target = Some(target);
    app.picker_layout = None;
}

pub(crate) fn apply_picker_event(app: &mut AppState, event: PickerEvent) {
    let Some(target) = app.picker_target else {
        return;
    };
    match event {
        PickerEvent::Reload => reload_picker(app, target),
        PickerEvent::Cancel(reason) => {
            if app.key_debug {
                app.push_line(
                    LogKind::Debug,
                    format!("{} dismissed ({reason:?})", target.title()),
                );
            }
            app.close_picker();
        }
        PickerEvent::Commit(value) => {
            app.close_picker();
            if let Some(value) = value {
                commit_value(app, target, value);
            }
        }
    }
}

fn reload_picker(app: &mut AppState, target: RosterPicker) {
    let tentative = app.picker.tentative_value().cloned();
    if let Err(error) = app.load_data() {
        app.push_error_report("reload failed", error.to_string());
        return;
    }
    let config = picker_config(app, target, tentative);
    if config.options.is_empty() {
        app.push_line(LogKind::Status, format!("{}: still nothing to show", target.title()));
    }
    app.picker.open(config);
    app.picker_target = Some(target);
    app.picker_layout = None;
}

fn commit_value(app: &mut AppState, target: RosterPicker, value: OptionValue) {
    match target {
        RosterPicker::Class => {
            let label = app.roster.class_label(&value);
            app.roster.filter.class_id = Some(value);
            app.roster.selected = 0;
            app.roster.rebuild();
            app.push_line(LogKind::Status, format!("Class: {label}"));
        }
        RosterPicker::Month => {
            let label = app.roster.month_label(&value);
            app.roster.filter.month = Some(value);
            app.roster.selected = 0;
            app.roster.rebuild();
            app.push_line(LogKind::Status, format!("Month: {label}"));
        }
        RosterPicker::Status => match StatusFilter::from_value(&value) {
            Some(status) => {
                app.roster.filter.status = status;
                app.roster.selected = 0;
                app.roster.rebuild();
                app.push_line(LogKind::Status, format!("Status filter: {}", status.label()));
            }
            None => app.push_error_report("status filter", format!("unknown status {value}")),
        },
        RosterPicker::LeaveType => {
            let label = app.roster.leave_type_label(&value);
            if let Some(name) = app
                .roster
                .mark_selected(AttendanceStatus::Leave, Some(value))
            {
                app.push_line(LogKind::Status, format!("{name}: on leave ({label})"));
            }
        }
        RosterPicker::Theme => match ThemeName::from_option(&value) {
            Some(name) => {
                app.set_theme(name);
                app.push_line(LogKind::Status, format!("Theme: {name}"));
            }
            None => app.push_error_report("theme", format!("unknown theme {value}")),
        },
    }
}

fn mark_selected(app: &mut AppState, status: AttendanceStatus) {
    match app.roster.mark_selected(status, None) {
        Some(name) => {
            app.push_line(
                LogKind::Status,
                format!("{name}: {}", status.label().to_ascii_lowercase()),
            );
        }
        None => app.push_line(LogKind::Status, "No student selected"),
    }
}

fn handle_search_key(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    match key {
        KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.roster.filter.query.push(ch);
        }
        KeyCode::Backspace => {
            if app.roster.filter.query.pop().is_none() {
                return false;
            }
        }
        KeyCode::Enter | KeyCode::Esc => {
            app.roster.search_active = false;
            return true;
        }
        _ => return false,
    }
    app.roster.selected = 0;
    app.roster.rebuild();
    true
}

/// Keys for the roster screen when no picker is open. Returns whether a redraw is needed.
pub(crate) fn handle_roster_key(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    if app.roster.search_active {
        return handle_search_key(app, key, modifiers);
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.roster.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.roster.move_selection(1),
        KeyCode::PageUp => app.roster.move_selection(-ROSTER_PAGE_STEP),
        KeyCode::PageDown => app.roster.move_selection(ROSTER_PAGE_STEP),
        KeyCode::Home => app.roster.move_selection(isize::MIN),
        KeyCode::End => app.roster.move_selection(isize::MAX),
        KeyCode::Char('c') => {
            open_picker(app, RosterPicker::Class);
            true
        }
        KeyCode::Char('m') => {
            open_picker(app, RosterPicker::Month);
            true
        }
        KeyCode::Char('s') => {
            open_picker(app, RosterPicker::Status);
            true
        }
        KeyCode::Char('l') => {
            open_picker(app, RosterPicker::LeaveType);
            true
        }
        KeyCode::Char('t') => {
            open_picker(app, RosterPicker::Theme);
            true
        }
        KeyCode::Char('p') => {
            mark_selected(app, AttendanceStatus::Present);
            true
        }
        KeyCode::Char('a') => {
            mark_selected(app, AttendanceStatus::Absent);
            true
        }
        KeyCode::Char('u') => {
            mark_selected(app, AttendanceStatus::Unmarked);
            true
        }
        KeyCode::Char('x') => {
            if app.roster.clear_filters() {
                app.push_line(LogKind::Status, "Filters cleared");
            }
            true
        }
        KeyCode::Char('/') => {
            app.roster.search_active = true;
            true
        }
        KeyCode::Char('?') => {
            app.status_line_mode = app.status_line_mode.toggle();
            true
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_exit = true;
            true
        }
        _ => false,
    }
}
