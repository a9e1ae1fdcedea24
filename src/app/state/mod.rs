pub(crate) mod log;
pub(crate) mod picker;
pub(crate) mod roster;
pub(crate) mod theme;

pub(crate) use log::{LogKind, LogLine};
pub(crate) use roster::{RosterPicker, RosterState, StatusFilter};
pub(crate) use theme::ThemeName;
