use crate::app::state::LogKind;
use crate::app::{AppState, StatusLineMode};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::text::fit_to_width;

pub(super) fn build_status_line(app: &AppState) -> Line<'static> {
    let mut segments = Vec::new();
    match app.status_line_mode {
        StatusLineMode::Info => {
            segments.push(format!("theme: {}", app.theme.name));
            if app.picker.is_visible() {
                let mode = app
                    .picker
                    .config()
                    .map(|config| config.mode.label())
                    .unwrap_or("-");
                segments.push(format!("picker: {mode}"));
            }
            segments.push("c/m/s/l/t pickers".to_string());
            segments.push("? help".to_string());
        }
        StatusLineMode::Help => {
            segments.push("↑↓ move".to_string());
            segments.push("p/a/u mark".to_string());
            segments.push("l leave".to_string());
            segments.push("/ search".to_string());
            segments.push("x clear filters".to_string());
            segments.push("picker: Space select, Enter confirm, Esc cancel, r reload".to_string());
            segments.push(format!(
                "mouse: {}",
                if app.mouse_capture_enabled {
                    "on"
                } else {
                    "off"
                }
            ));
            segments.push("q quit".to_string());
        }
    }
    Line::from(Span::styled(
        segments.join("  •  "),
        Style::default().add_modifier(Modifier::DIM),
    ))
}

pub(super) fn build_log_lines(app: &AppState, height: usize, width: usize) -> Vec<Line<'static>> {
    let start = app.log.len().saturating_sub(height);
    app.log[start..]
        .iter()
        .map(|line| {
            let style = match line.kind {
                LogKind::System => Style::default().fg(app.theme.accent),
                LogKind::Status => Style::default().fg(app.theme.muted_fg),
                LogKind::Debug => Style::default()
                    .fg(app.theme.muted_fg)
                    .add_modifier(Modifier::DIM),
                LogKind::Error => Style::default().fg(app.theme.error_fg),
            };
            Line::from(Span::styled(fit_to_width(&line.plain_text(), width), style))
        })
        .collect()
}
