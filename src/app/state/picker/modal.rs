use super::option::{first_index_of, OptionValue, PickerOption};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommitMode {
    /// A tap commits and closes in one step.
    #[default]
    Immediate,
    /// Taps only move the tentative selection; confirm commits.
    Deferred,
}

impl CommitMode {
    pub fn label(self) -> &'static str {
        match self {
            CommitMode::Immediate => "immediate",
            CommitMode::Deferred => "deferred",
        }
    }
}

/// Everything the caller decides at open time. Not mutated while the modal is visible.
#[derive(Clone, Debug)]
pub struct ModalConfig {
    pub title: String,
    pub options: Vec<PickerOption>,
    pub initial_value: Option<OptionValue>,
    pub mode: CommitMode,
    pub allow_reload: bool,
}

impl ModalConfig {
    pub fn new(title: impl Into<String>, options: Vec<PickerOption>) -> Self {
        Self {
            title: title.into(),
            options,
            initial_value: None,
            mode: CommitMode::Immediate,
            allow_reload: false,
        }
    }

    pub fn with_initial_value(mut self, value: Option<OptionValue>) -> Self {
        self.initial_value = value;
        self
    }

    pub fn with_mode(mut self, mode: CommitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_reload(mut self) -> Self {
        self.allow_reload = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    Cancelled,
    Backdrop,
}

/// What the owning screen has to act on after an interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    /// `None` means the user confirmed without any selection.
    Commit(Option<OptionValue>),
    Cancel(DismissReason),
    Reload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalView {
    HasOptions,
    Empty,
}

struct OpenModal {
    config: ModalConfig,
    tentative: Option<OptionValue>,
    focused: usize,
}

#[derive(Default)]
pub struct SelectableListModal {
    open: Option<OpenModal>,
}

impl SelectableListModal {
    pub fn open(&mut self, config: ModalConfig) {
        let focused = config
            .initial_value
            .as_ref()
            .and_then(|value| first_index_of(&config.options, value))
            .unwrap_or(0);
        let tentative = config.initial_value.clone();
        self.open = Some(OpenModal {
            config,
            tentative,
            focused,
        });
    }

    pub fn is_visible(&self) -> bool {
        self.open.is_some()
    }

    pub fn config(&self) -> Option<&ModalConfig> {
        self.open.as_ref().map(|open| &open.config)
    }

    pub fn options(&self) -> &[PickerOption] {
        self.config()
            .map(|config| config.options.as_slice())
            .unwrap_or_default()
    }

    pub fn tentative_value(&self) -> Option<&OptionValue> {
        self.open.as_ref().and_then(|open| open.tentative.as_ref())
    }

    pub fn view(&self) -> Option<ModalView> {
        let config = self.config()?;
        Some(if config.options.is_empty() {
            ModalView::Empty
        } else {
            ModalView::HasOptions
        })
    }

    /// Index of the highlighted row: the first option equal to the tentative value.
    pub fn selected_index(&self) -> Option<usize> {
        let open = self.open.as_ref()?;
        let tentative = open.tentative.as_ref()?;
        first_index_of(&open.config.options, tentative)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index() == Some(index)
    }

    pub fn focused_index(&self) -> Option<usize> {
        let open = self.open.as_ref()?;
        (!open.config.options.is_empty())
            .then(|| open.focused.min(open.config.options.len() - 1))
    }

    pub fn shows_confirm(&self) -> bool {
        self.config()
            .is_some_and(|config| config.mode == CommitMode::Deferred)
    }

    pub fn shows_reload(&self) -> bool {
        self.config()
            .is_some_and(|config| config.options.is_empty() && config.allow_reload)
    }

    pub fn move_focus(&mut self, delta: isize) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        let len = open.config.options.len();
        if len == 0 {
            return false;
        }
        let current = open.focused.min(len - 1);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta.unsigned_abs()).min(len - 1)
        };
        let changed = next != open.focused;
        open.focused = next;
        changed
    }

    pub fn focus(&mut self, index: usize) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        if index >= open.config.options.len() || index == open.focused {
            return false;
        }
        open.focused = index;
        true
    }

    pub fn focus_last(&mut self) -> bool {
        let last = self.options().len().saturating_sub(1);
        self.focus(last)
    }

    pub fn tap_option(&mut self, value: OptionValue) -> Option<PickerEvent> {
        let open = self.open.as_mut()?;
        if let Some(index) = first_index_of(&open.config.options, &value) {
            open.focused = index;
        }
        open.tentative = Some(value.clone());
        match open.config.mode {
            CommitMode::Immediate => {
                self.open = None;
                Some(PickerEvent::Commit(Some(value)))
            }
            CommitMode::Deferred => None,
        }
    }

    pub fn tap_index(&mut self, index: usize) -> Option<PickerEvent> {
        let value = self.options().get(index)?.value.clone();
        self.tap_option(value)
    }

    pub fn tap_focused(&mut self) -> Option<PickerEvent> {
        let index = self.focused_index()?;
        self.tap_index(index)
    }

    /// Commits the tentative value. Ignored in immediate mode, where taps already commit.
    pub fn confirm(&mut self) -> Option<PickerEvent> {
        if !self.shows_confirm() {
            return None;
        }
        let open = self.open.take()?;
        Some(PickerEvent::Commit(open.tentative))
    }

    pub fn cancel(&mut self) -> Option<PickerEvent> {
        self.dismiss(DismissReason::Cancelled)
    }

    pub fn backdrop_tap(&mut self) -> Option<PickerEvent> {
        self.dismiss(DismissReason::Backdrop)
    }

    pub fn reload(&mut self) -> Option<PickerEvent> {
        self.shows_reload().then_some(PickerEvent::Reload)
    }

    fn dismiss(&mut self, reason: DismissReason) -> Option<PickerEvent> {
        self.open.take()?;
        Some(PickerEvent::Cancel(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CommitMode, DismissReason, ModalConfig, ModalView, PickerEvent, SelectableListModal,
    };
    use crate::app::state::picker::{OptionValue, PickerOption};

    fn leave_options() -> Vec<PickerOption> {
        vec![PickerOption::new("CL", "pl"), PickerOption::new("LWP", "cl")]
    }

    fn value(text: &str) -> OptionValue {
        OptionValue::from(text)
    }

    fn open_with(config: ModalConfig) -> SelectableListModal {
        let mut modal = SelectableListModal::default();
        modal.open(config);
        modal
    }

    #[test]
    fn tapping_any_option_highlights_that_row() {
        let options = vec![
            PickerOption::new("Present", "present"),
            PickerOption::new("Absent", "absent"),
            PickerOption::new("Leave", "leave"),
        ];
        for (index, option) in options.iter().enumerate() {
            let mut modal = open_with(
                ModalConfig::new("Status", options.clone()).with_mode(CommitMode::Deferred),
            );
            assert_eq!(modal.tap_option(option.value.clone()), None);
            assert_eq!(modal.selected_index(), Some(index));
            assert!(modal.is_selected(index));
        }
    }

    #[test]
    fn immediate_tap_commits_once_and_closes() {
        let mut modal = open_with(ModalConfig::new("Leave type", leave_options()));
        assert_eq!(
            modal.tap_option(value("cl")),
            Some(PickerEvent::Commit(Some(value("cl"))))
        );
        assert!(!modal.is_visible());
        assert_eq!(modal.tap_option(value("pl")), None);
        assert_eq!(modal.confirm(), None);
    }

    #[test]
    fn deferred_tap_waits_for_confirm_with_last_tapped_value() {
        let mut modal =
            open_with(ModalConfig::new("Leave type", leave_options()).with_mode(CommitMode::Deferred));
        assert_eq!(modal.tap_option(value("cl")), None);
        assert_eq!(modal.tap_option(value("pl")), None);
        assert!(modal.is_visible());
        assert_eq!(modal.confirm(), Some(PickerEvent::Commit(Some(value("pl")))));
        assert!(!modal.is_visible());
    }

    #[test]
    fn cancel_and_backdrop_never_commit() {
        let mut modal =
            open_with(ModalConfig::new("Leave type", leave_options()).with_mode(CommitMode::Deferred));
        modal.tap_option(value("cl"));
        modal.tap_option(value("pl"));
        assert_eq!(
            modal.cancel(),
            Some(PickerEvent::Cancel(DismissReason::Cancelled))
        );
        assert!(!modal.is_visible());
        assert_eq!(modal.tentative_value(), None);

        modal.open(ModalConfig::new("Leave type", leave_options()).with_mode(CommitMode::Deferred));
        modal.tap_option(value("cl"));
        assert_eq!(
            modal.backdrop_tap(),
            Some(PickerEvent::Cancel(DismissReason::Backdrop))
        );
        assert_eq!(modal.confirm(), None);
    }

    #[test]
    fn confirm_without_taps_preserves_initial_value() {
        let mut modal = open_with(
            ModalConfig::new("Leave type", leave_options())
                .with_mode(CommitMode::Deferred)
                .with_initial_value(Some(value("cl"))),
        );
        assert_eq!(modal.confirm(), Some(PickerEvent::Commit(Some(value("cl")))));
    }

    #[test]
    fn confirm_without_any_selection_commits_none() {
        let mut modal =
            open_with(ModalConfig::new("Leave type", leave_options()).with_mode(CommitMode::Deferred));
        assert_eq!(modal.confirm(), Some(PickerEvent::Commit(None)));
    }

    #[test]
    fn confirm_is_a_no_op_in_immediate_mode() {
        let mut modal = open_with(ModalConfig::new("Leave type", leave_options()));
        assert_eq!(modal.confirm(), None);
        assert!(modal.is_visible());
    }

    #[test]
    fn view_switches_on_option_count() {
        let empty = open_with(ModalConfig::new("Classes", Vec::new()));
        assert_eq!(empty.view(), Some(ModalView::Empty));
        assert_eq!(empty.focused_index(), None);

        let single = open_with(ModalConfig::new(
            "Classes",
            vec![PickerOption::new("A", 1_i64)],
        ));
        assert_eq!(single.view(), Some(ModalView::HasOptions));
        assert_eq!(single.options().len(), 1);
        assert_eq!(single.options()[0].label, "A");

        assert_eq!(SelectableListModal::default().view(), None);
    }

    #[test]
    fn reload_requested_only_for_empty_reloadable_lists() {
        let mut modal = open_with(
            ModalConfig::new("Classes", Vec::new())
                .with_reload()
                .with_initial_value(Some(value("5a"))),
        );
        assert!(modal.shows_reload());
        assert_eq!(modal.reload(), Some(PickerEvent::Reload));
        assert!(modal.is_visible());
        assert_eq!(modal.tentative_value(), Some(&value("5a")));

        let mut without_callback = open_with(ModalConfig::new("Classes", Vec::new()));
        assert!(!without_callback.shows_reload());
        assert_eq!(without_callback.reload(), None);

        let mut populated = open_with(ModalConfig::new("Classes", leave_options()).with_reload());
        assert_eq!(populated.reload(), None);
    }

    #[test]
    fn initial_value_is_highlighted_and_focused_on_open() {
        let modal = open_with(
            ModalConfig::new("Month", vec![
                PickerOption::new("September", "9"),
                PickerOption::new("October", "10"),
            ])
            .with_initial_value(Some(OptionValue::from(10_i64))),
        );
        assert_eq!(modal.selected_index(), Some(1));
        assert_eq!(modal.focused_index(), Some(1));
    }

    #[test]
    fn duplicate_values_highlight_first_match_only() {
        let modal = open_with(
            ModalConfig::new("Dupes", vec![
                PickerOption::new("First", "x"),
                PickerOption::new("Second", "x"),
            ])
            .with_initial_value(Some(value("x"))),
        );
        assert!(modal.is_selected(0));
        assert!(!modal.is_selected(1));
    }

    #[test]
    fn leave_type_scenario_highlights_then_commits_on_confirm() {
        let mut modal = open_with(
            ModalConfig::new("Leave type", leave_options())
                .with_mode(CommitMode::Deferred)
                .with_initial_value(Some(value("pl"))),
        );
        assert!(modal.is_selected(0));

        assert_eq!(modal.tap_index(1), None);
        assert!(modal.is_selected(1));
        assert!(!modal.is_selected(0));
        assert!(modal.is_visible());

        assert_eq!(modal.confirm(), Some(PickerEvent::Commit(Some(value("cl")))));
        assert!(!modal.is_visible());
    }

    #[test]
    fn focus_moves_within_bounds() {
        let mut modal = open_with(ModalConfig::new("Leave type", leave_options()));
        assert!(!modal.move_focus(-1));
        assert!(modal.move_focus(5));
        assert_eq!(modal.focused_index(), Some(1));
        assert!(!modal.focus_last());
        assert!(modal.focus(0));
        assert_eq!(modal.tap_focused(), Some(PickerEvent::Commit(Some(value("pl")))));
    }

    #[test]
    fn reopen_resets_tentative_state() {
        let mut modal =
            open_with(ModalConfig::new("Leave type", leave_options()).with_mode(CommitMode::Deferred));
        modal.tap_option(value("cl"));
        modal.open(ModalConfig::new("Leave type", leave_options()).with_mode(CommitMode::Deferred));
        assert_eq!(modal.tentative_value(), None);
        assert_eq!(modal.selected_index(), None);
    }
}
