use crate::app::state::picker::{OptionValue, PickerOption};
use std::fmt;

/// Colour scheme for the roster screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeName {
    #[default]
    Chalk,
    Ocean,
    Forest,
    Rose,
    Iris,
    Slate,
}

impl ThemeName {
    /// Picker order.
    pub const ALL: [ThemeName; 6] = [
        ThemeName::Chalk,
        ThemeName::Ocean,
        ThemeName::Forest,
        ThemeName::Rose,
        ThemeName::Iris,
        ThemeName::Slate,
    ];

    /// Accepted spellings; the first is the canonical name.
    const fn spellings(self) -> &'static [&'static str] {
        match self {
            ThemeName::Chalk => &["chalk", "amber", "default"],
            ThemeName::Ocean => &["ocean"],
            ThemeName::Forest => &["forest"],
            ThemeName::Rose => &["rose", "rose-gold", "rosegold"],
            ThemeName::Iris => &["iris"],
            ThemeName::Slate => &["slate", "mono", "grey", "gray"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self.spellings() {
            [canonical, ..] => *canonical,
            [] => "",
        }
    }

    fn blurb(self) -> &'static str {
        match self {
            ThemeName::Chalk => "amber on charcoal",
            ThemeName::Ocean => "sky blue",
            ThemeName::Forest => "leaf green",
            ThemeName::Rose => "dusty rose",
            ThemeName::Iris => "indigo",
            ThemeName::Slate => "greys only",
        }
    }

    /// Resolves a name or alias, ignoring case. Blank input means the default theme.
    pub fn lookup(value: &str) -> Option<ThemeName> {
        let wanted = value.trim();
        if wanted.is_empty() {
            return Some(ThemeName::default());
        }
        ThemeName::ALL.into_iter().find(|name| {
            name.spellings()
                .iter()
                .any(|spelling| spelling.eq_ignore_ascii_case(wanted))
        })
    }

    pub fn from_option(value: &OptionValue) -> Option<ThemeName> {
        ThemeName::lookup(value.as_str())
    }

    /// Rows for the theme picker; values go back through [`ThemeName::from_option`].
    pub fn picker_options() -> Vec<PickerOption> {
        ThemeName::ALL
            .into_iter()
            .map(|name| {
                PickerOption::new(format!("{:<8} {}", name.as_str(), name.blurb()), name.as_str())
            })
            .collect()
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
