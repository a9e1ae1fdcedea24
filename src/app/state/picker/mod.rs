mod modal;
mod option;

#[cfg(test)]
pub use modal::DismissReason;
pub use modal::{CommitMode, ModalConfig, ModalView, PickerEvent, SelectableListModal};
pub use option::{options_from_json, OptionValue, PickerOption};
