use crate::app::util::text::sanitize_for_tui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    System,
    Status,
    Debug,
    Error,
}

impl LogKind {
    pub fn prefix(self) -> &'static str {
        match self {
            LogKind::System => "",
            LogKind::Status => "• ",
            LogKind::Debug => "debug: ",
            LogKind::Error => "error: ",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        let raw = text.into();
        Self {
            kind,
            text: sanitize_for_tui(&raw),
        }
    }

    pub fn plain_text(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.text)
    }
}
