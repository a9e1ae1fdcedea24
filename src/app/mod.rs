pub(crate) mod handlers;
pub(crate) mod runtime;
pub(crate) mod state;
pub(crate) mod util;
pub(crate) mod view;

use crate::app::runtime::{load_school_data, DataError, SchoolData};
use crate::app::state::picker::SelectableListModal;
use crate::app::state::{LogKind, LogLine, RosterPicker, RosterState, ThemeName};
use crate::app::view::theme::Theme;
use crate::app::view::ui::ModalLayout;
use std::path::PathBuf;

const MAX_LOG_LINES: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusLineMode {
    #[default]
    Info,
    Help,
}

impl StatusLineMode {
    pub fn toggle(self) -> Self {
        match self {
            StatusLineMode::Info => StatusLineMode::Help,
            StatusLineMode::Help => StatusLineMode::Info,
        }
    }
}

#[derive(Default)]
pub struct AppState {
    pub log: Vec<LogLine>,
    pub roster: RosterState,
    pub picker: SelectableListModal,
    pub picker_target: Option<RosterPicker>,
    pub(crate) picker_layout: Option<ModalLayout>,
    pub(crate) theme: Theme,
    pub data_path: Option<PathBuf>,
    pub status_line_mode: StatusLineMode,
    pub key_debug: bool,
    pub mouse_capture_enabled: bool,
    pub should_exit: bool,
}

impl AppState {
    pub fn new(theme: ThemeName, data_path: Option<PathBuf>) -> Self {
        Self {
            theme: Theme::from_name(theme),
            data_path,
            ..Self::default()
        }
    }

    pub fn push_line(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.push(LogLine::new(kind, text));
        if self.log.len() > MAX_LOG_LINES {
            let overflow = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..overflow);
        }
    }

    pub fn push_error_report(&mut self, context: &str, message: impl Into<String>) {
        let message = message.into();
        self.push_line(LogKind::Error, format!("{context}: {message}"));
    }

    /// Reads the configured data file. A missing path or file leaves the roster empty.
    pub fn load_data(&mut self) -> Result<(), DataError> {
        let Some(path) = self.data_path.clone() else {
            self.roster = RosterState::from_data(SchoolData::default());
            return Ok(());
        };
        let data = load_school_data(&path)?;
        self.roster.replace_data(data);
        self.push_line(
            LogKind::Status,
            format!(
                "Loaded {} students from {}",
                self.roster.records.len(),
                path.display()
            ),
        );
        Ok(())
    }

    pub fn set_theme(&mut self, name: ThemeName) {
        self.theme = Theme::from_name(name);
    }

    pub fn close_picker(&mut self) {
        self.picker_target = None;
        self.picker_layout = None;
    }
}
