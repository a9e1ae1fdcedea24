use crate::app::runtime::AttendanceStatus;
use crate::app::AppState;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::text::{fit_to_width, window_start};

const COLUMN_HEADER: &str = "  Name                     Class        Month      Status";

fn status_style(app: &AppState, status: AttendanceStatus) -> Style {
    let theme = &app.theme;
    match status {
        AttendanceStatus::Present => Style::default().fg(theme.present_fg),
        AttendanceStatus::Absent => Style::default().fg(theme.absent_fg),
        AttendanceStatus::Leave => Style::default().fg(theme.leave_fg),
        AttendanceStatus::Unmarked => Style::default().fg(theme.muted_fg),
    }
}

pub(super) fn build_header_line(app: &AppState, width: usize) -> Line<'static> {
    let title = Span::styled(
        "SchoolDesk · Attendance  ",
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    let detail = if app.roster.search_active {
        format!("search: {}_", app.roster.filter.query)
    } else {
        app.roster.filter_summary()
    };
    let remaining = width.saturating_sub(super::text::visual_width(&title.content));
    Line::from(vec![
        title,
        Span::styled(
            fit_to_width(&detail, remaining),
            Style::default().fg(app.theme.muted_fg),
        ),
    ])
}

pub(super) fn build_roster_lines(app: &AppState, height: usize, width: usize) -> Vec<Line<'static>> {
    if height == 0 || width == 0 {
        return Vec::new();
    }
    let roster = &app.roster;
    let mut lines = vec![Line::from(Span::styled(
        fit_to_width(COLUMN_HEADER, width),
        Style::default().add_modifier(Modifier::DIM),
    ))];
    let visible = height.saturating_sub(1);
    if roster.filtered_indices.is_empty() {
        if visible > 0 {
            let message = roster.rows.first().map(String::as_str).unwrap_or_default();
            lines.push(Line::from(Span::styled(
                fit_to_width(&format!("  {message}"), width),
                Style::default().fg(app.theme.muted_fg),
            )));
        }
        return lines;
    }

    let start = window_start(roster.rows.len(), visible, roster.selected);
    for (position, row) in roster.rows.iter().enumerate().skip(start).take(visible) {
        let is_selected = position == roster.selected;
        let status = roster
            .filtered_indices
            .get(position)
            .and_then(|index| roster.records.get(*index))
            .map(|record| record.status)
            .unwrap_or_default();
        let marker = if is_selected { "> " } else { "  " };
        let mut style = status_style(app, status);
        if is_selected {
            style = style
                .bg(app.theme.selected_bg)
                .add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            fit_to_width(&format!("{marker}{row}"), width),
            style,
        )));
    }
    lines
}

pub(super) fn build_stats_line(app: &AppState) -> Line<'static> {
    let stats = app.roster.stats();
    let percent = stats
        .attendance_percent()
        .map(|value| format!("{value}%"))
        .unwrap_or_else(|| "-".to_string());
    let theme = &app.theme;
    Line::from(vec![
        Span::raw(format!("students {}  ", stats.total)),
        Span::styled(
            format!("present {}  ", stats.present),
            Style::default().fg(theme.present_fg),
        ),
        Span::styled(
            format!("absent {}  ", stats.absent),
            Style::default().fg(theme.absent_fg),
        ),
        Span::styled(
            format!("leave {}  ", stats.leave),
            Style::default().fg(theme.leave_fg),
        ),
        Span::styled(
            format!("unmarked {}  ", stats.unmarked),
            Style::default().fg(theme.muted_fg),
        ),
        Span::styled(
            format!("attendance {percent}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
