pub(super) const MAX_VISIBLE_ROWS: u16 = 10;
pub(super) const MIN_MODAL_WIDTH: u16 = 34;
pub(super) const MODAL_MARGIN: u16 = 2;
pub(super) const ROW_PREFIX_WIDTH: u16 = 4;
pub(super) const BUTTON_GAP: u16 = 2;
pub(super) const LOG_PANEL_HEIGHT: u16 = 3;
pub(super) const EMPTY_MESSAGE: &str = "No items found";
pub(super) const RELOAD_LABEL: &str = "[ Reload: r ]";
pub(super) const CONFIRM_LABEL: &str = "[ Confirm: Enter ]";
pub(super) const CANCEL_LABEL: &str = "[ Cancel: Esc ]";
