pub(crate) mod picker;
pub(crate) mod roster;

use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

use self::picker::{handle_picker_key, handle_picker_mouse};
use self::roster::{apply_picker_event, handle_roster_key};

/// Routes a key press: the open picker first, then global keys, then the roster.
pub(crate) fn handle_key(app: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> bool {
    if let Some(update) = handle_picker_key(&mut app.picker, key, modifiers) {
        if let Some(event) = update.event {
            apply_picker_event(app, event);
        }
        if update.consume {
            return true;
        }
    }
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.should_exit = true;
        return true;
    }
    if app.picker.is_visible() {
        return false;
    }
    handle_roster_key(app, key, modifiers)
}

pub(crate) fn handle_mouse(app: &mut AppState, kind: MouseEventKind, column: u16, row: u16) -> bool {
    if let Some(update) = handle_picker_mouse(
        &mut app.picker,
        app.picker_layout.as_ref(),
        kind,
        column,
        row,
    ) {
        if let Some(event) = update.event {
            apply_picker_event(app, event);
        }
        // The modal is on top: nothing underneath reacts to the pointer.
        return update.consume;
    }
    match kind {
        MouseEventKind::ScrollUp => app.roster.move_selection(-1),
        MouseEventKind::ScrollDown => app.roster.move_selection(1),
        _ => false,
    }
}
