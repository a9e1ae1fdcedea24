use crate::app::state::ThemeName;
use ratatui::style::Color;

/// Colours for one frame. Passed explicitly to every render function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) name: ThemeName,
    pub(crate) accent: Color,
    pub(crate) accent_soft: Color,
    pub(crate) text_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) panel_bg: Color,
    pub(crate) backdrop_bg: Color,
    pub(crate) selected_fg: Color,
    pub(crate) selected_bg: Color,
    pub(crate) present_fg: Color,
    pub(crate) absent_fg: Color,
    pub(crate) leave_fg: Color,
    pub(crate) error_fg: Color,
}

#[derive(Clone, Copy)]
struct Accents {
    accent: (u8, u8, u8),
    soft: (u8, u8, u8),
    selected_bg: (u8, u8, u8),
}

const fn accents_for(name: ThemeName) -> Accents {
    match name {
        ThemeName::Chalk => Accents {
            accent: (232, 178, 92),
            soft: (215, 188, 155),
            selected_bg: (84, 62, 30),
        },
        ThemeName::Ocean => Accents {
            accent: (124, 193, 255),
            soft: (165, 205, 219),
            selected_bg: (28, 58, 92),
        },
        ThemeName::Forest => Accents {
            accent: (149, 208, 146),
            soft: (167, 206, 188),
            selected_bg: (31, 66, 40),
        },
        ThemeName::Rose => Accents {
            accent: (201, 112, 130),
            soft: (207, 188, 202),
            selected_bg: (78, 36, 48),
        },
        ThemeName::Iris => Accents {
            accent: (157, 140, 214),
            soft: (190, 186, 221),
            selected_bg: (50, 42, 92),
        },
        ThemeName::Slate => Accents {
            accent: (200, 200, 200),
            soft: (160, 160, 160),
            selected_bg: (70, 70, 70),
        },
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

impl Theme {
    pub(crate) fn from_name(name: ThemeName) -> Self {
        let accents = accents_for(name);
        Self {
            name,
            accent: rgb(accents.accent),
            accent_soft: rgb(accents.soft),
            text_fg: Color::White,
            muted_fg: Color::Gray,
            panel_bg: Color::Rgb(32, 32, 32),
            backdrop_bg: Color::Rgb(12, 12, 12),
            selected_fg: rgb(accents.accent),
            selected_bg: rgb(accents.selected_bg),
            present_fg: Color::LightGreen,
            absent_fg: Color::LightRed,
            leave_fg: rgb(accents.soft),
            error_fg: Color::Red,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;
    use crate::app::state::ThemeName;

    #[test]
    fn every_theme_highlights_selection_distinctly() {
        for name in ThemeName::ALL {
            let theme = Theme::from_name(name);
            assert_eq!(theme.name, name);
            assert_ne!(theme.selected_bg, theme.panel_bg);
            assert_ne!(theme.selected_bg, theme.backdrop_bg);
        }
    }

    #[test]
    fn default_theme_is_chalk() {
        assert_eq!(Theme::default().name, ThemeName::Chalk);
    }
}
