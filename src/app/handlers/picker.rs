use crate::app::state::picker::{CommitMode, PickerEvent, SelectableListModal};
use crate::app::view::ui::{hit_test, ModalHit, ModalLayout};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};

const PAGE_STEP: isize = 5;

pub(crate) struct PickerKeyUpdate {
    pub(crate) consume: bool,
    pub(crate) event: Option<PickerEvent>,
}

impl PickerKeyUpdate {
    fn consumed(event: Option<PickerEvent>) -> Self {
        Self {
            consume: true,
            event,
        }
    }
}

/// Maps a key onto the modal contract. `None` when the modal is closed.
///
/// Every key is captured while the modal is open, except Ctrl-modified keys
/// which are left for the global handlers.
pub(crate) fn handle_picker_key(
    modal: &mut SelectableListModal,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Option<PickerKeyUpdate> {
    let mode = modal.config()?.mode;
    if modifiers.contains(KeyModifiers::CONTROL) {
        return Some(PickerKeyUpdate {
            consume: false,
            event: None,
        });
    }

    let event = match key {
        KeyCode::Up | KeyCode::Char('k') => {
            modal.move_focus(-1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            modal.move_focus(1);
            None
        }
        KeyCode::PageUp => {
            modal.move_focus(-PAGE_STEP);
            None
        }
        KeyCode::PageDown => {
            modal.move_focus(PAGE_STEP);
            None
        }
        KeyCode::Home => {
            modal.focus(0);
            None
        }
        KeyCode::End => {
            modal.focus_last();
            None
        }
        KeyCode::Char(' ') => modal.tap_focused(),
        KeyCode::Enter => match mode {
            CommitMode::Immediate => modal.tap_focused(),
            CommitMode::Deferred => modal.confirm(),
        },
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            modal.tap_index(index)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => modal.reload(),
        KeyCode::Esc | KeyCode::Char('q') => modal.cancel(),
        _ => None,
    };
    Some(PickerKeyUpdate::consumed(event))
}

pub(crate) fn handle_picker_mouse(
    modal: &mut SelectableListModal,
    layout: Option<&ModalLayout>,
    kind: MouseEventKind,
    column: u16,
    row: u16,
) -> Option<PickerKeyUpdate> {
    if !modal.is_visible() {
        return None;
    }
    let event = match kind {
        MouseEventKind::ScrollUp => {
            modal.move_focus(-1);
            None
        }
        MouseEventKind::ScrollDown => {
            modal.move_focus(1);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => {
            // Not drawn yet: nothing on screen to hit.
            let Some(layout) = layout else {
                return Some(PickerKeyUpdate::consumed(None));
            };
            match hit_test(layout, column, row) {
                ModalHit::Option(index) => modal.tap_index(index),
                ModalHit::Confirm => modal.confirm(),
                ModalHit::Cancel => modal.cancel(),
                ModalHit::Reload => modal.reload(),
                ModalHit::Panel => None,
                ModalHit::Backdrop => modal.backdrop_tap(),
            }
        }
        _ => {
            return Some(PickerKeyUpdate {
                consume: false,
                event: None,
            })
        }
    };
    Some(PickerKeyUpdate::consumed(event))
}

#[cfg(test)]
mod tests {
    use super::{handle_picker_key, handle_picker_mouse};
    use crate::app::state::picker::{
        CommitMode, DismissReason, ModalConfig, OptionValue, PickerEvent, PickerOption,
        SelectableListModal,
    };
    use crate::app::view::ui::{ModalLayout, ModalRow};
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::layout::Rect;

    fn months(mode: CommitMode) -> SelectableListModal {
        let mut modal = SelectableListModal::default();
        modal.open(
            ModalConfig::new(
                "Month",
                vec![
                    PickerOption::new("September", 9_i64),
                    PickerOption::new("October", 10_i64),
                    PickerOption::new("November", 11_i64),
                ],
            )
            .with_mode(mode)
            .with_initial_value(Some(OptionValue::from("9"))),
        );
        modal
    }

    fn press(modal: &mut SelectableListModal, key: KeyCode) -> Option<PickerEvent> {
        handle_picker_key(modal, key, KeyModifiers::NONE).and_then(|update| update.event)
    }

    fn days() -> SelectableListModal {
        let mut modal = SelectableListModal::default();
        modal.open(ModalConfig::new(
            "Day",
            (1..=12_i64)
                .map(|day| PickerOption::new(format!("Day {day}"), day))
                .collect(),
        ));
        modal
    }

    #[test]
    fn page_keys_move_focus_by_five_and_clamp() {
        let mut modal = days();
        press(&mut modal, KeyCode::PageDown);
        assert_eq!(modal.focused_index(), Some(5));
        press(&mut modal, KeyCode::PageDown);
        press(&mut modal, KeyCode::PageDown);
        assert_eq!(modal.focused_index(), Some(11));
        press(&mut modal, KeyCode::PageUp);
        assert_eq!(modal.focused_index(), Some(6));
        press(&mut modal, KeyCode::Home);
        assert_eq!(modal.focused_index(), Some(0));
        assert!(modal.is_visible());
        assert_eq!(modal.selected_index(), None);
    }

    #[test]
    fn wheel_moves_focus_without_selecting() {
        let mut modal = days();
        for _ in 0..3 {
            let update = handle_picker_mouse(&mut modal, None, MouseEventKind::ScrollDown, 0, 0);
            assert!(update.is_some_and(|update| update.consume && update.event.is_none()));
        }
        assert_eq!(modal.focused_index(), Some(3));
        handle_picker_mouse(&mut modal, None, MouseEventKind::ScrollUp, 0, 0);
        assert_eq!(modal.focused_index(), Some(2));
        assert_eq!(modal.selected_index(), None);
        assert!(modal.is_visible());
    }

    #[test]
    fn closed_modal_ignores_keys() {
        let mut modal = SelectableListModal::default();
        assert!(handle_picker_key(&mut modal, KeyCode::Enter, KeyModifiers::NONE).is_none());
    }

    #[test]
    fn enter_taps_focused_row_in_immediate_mode() {
        let mut modal = months(CommitMode::Immediate);
        assert_eq!(press(&mut modal, KeyCode::Down), None);
        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            Some(PickerEvent::Commit(Some(OptionValue::from("10"))))
        );
        assert!(!modal.is_visible());
    }

    #[test]
    fn space_selects_and_enter_confirms_in_deferred_mode() {
        let mut modal = months(CommitMode::Deferred);
        press(&mut modal, KeyCode::End);
        assert_eq!(press(&mut modal, KeyCode::Char(' ')), None);
        assert_eq!(modal.selected_index(), Some(2));
        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            Some(PickerEvent::Commit(Some(OptionValue::from("11"))))
        );
    }

    #[test]
    fn enter_without_taps_commits_initial_value_in_deferred_mode() {
        let mut modal = months(CommitMode::Deferred);
        press(&mut modal, KeyCode::Down);
        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            Some(PickerEvent::Commit(Some(OptionValue::from("9"))))
        );
    }

    #[test]
    fn digit_keys_tap_options_directly() {
        let mut modal = months(CommitMode::Deferred);
        assert_eq!(press(&mut modal, KeyCode::Char('2')), None);
        assert_eq!(modal.selected_index(), Some(1));
        assert_eq!(press(&mut modal, KeyCode::Char('9')), None);
        assert_eq!(modal.selected_index(), Some(1));
    }

    #[test]
    fn escape_cancels_without_commit() {
        let mut modal = months(CommitMode::Deferred);
        press(&mut modal, KeyCode::Char('3'));
        assert_eq!(
            press(&mut modal, KeyCode::Esc),
            Some(PickerEvent::Cancel(DismissReason::Cancelled))
        );
        assert!(!modal.is_visible());
    }

    #[test]
    fn reload_key_only_fires_for_empty_reloadable_lists() {
        let mut modal = SelectableListModal::default();
        modal.open(ModalConfig::new("Class", Vec::new()).with_reload());
        assert_eq!(press(&mut modal, KeyCode::Char('r')), Some(PickerEvent::Reload));
        assert!(modal.is_visible());

        let mut populated = months(CommitMode::Immediate);
        assert_eq!(press(&mut populated, KeyCode::Char('r')), None);
    }

    #[test]
    fn control_keys_fall_through() {
        let mut modal = months(CommitMode::Immediate);
        let update = handle_picker_key(&mut modal, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(update.is_some_and(|update| !update.consume));
        assert!(modal.is_visible());
    }

    #[test]
    fn mouse_clicks_follow_the_rendered_layout() {
        let layout = ModalLayout {
            panel: Rect::new(10, 5, 30, 8),
            rows: vec![
                ModalRow {
                    area: Rect::new(12, 6, 26, 1),
                    index: 0,
                },
                ModalRow {
                    area: Rect::new(12, 7, 26, 1),
                    index: 1,
                },
            ],
            confirm: Some(Rect::new(12, 11, 18, 1)),
            cancel: Some(Rect::new(32, 11, 6, 1)),
            reload: None,
        };
        let click = MouseEventKind::Down(MouseButton::Left);

        let mut modal = months(CommitMode::Deferred);
        let update = handle_picker_mouse(&mut modal, Some(&layout), click, 15, 7);
        assert!(update.is_some_and(|update| update.event.is_none()));
        assert_eq!(modal.selected_index(), Some(1));
        let update = handle_picker_mouse(&mut modal, Some(&layout), click, 12, 11);
        assert_eq!(
            update.and_then(|update| update.event),
            Some(PickerEvent::Commit(Some(OptionValue::from("10"))))
        );

        let mut modal = months(CommitMode::Deferred);
        handle_picker_mouse(&mut modal, Some(&layout), click, 15, 6);
        let update = handle_picker_mouse(&mut modal, Some(&layout), click, 0, 0);
        assert_eq!(
            update.and_then(|update| update.event),
            Some(PickerEvent::Cancel(DismissReason::Backdrop))
        );
    }
}
