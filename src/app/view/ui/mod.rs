mod constants;
mod picker;
mod roster;
mod status;
mod text;

use crate::app::AppState;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::Text;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use self::constants::LOG_PANEL_HEIGHT;
use self::roster::{build_header_line, build_roster_lines, build_stats_line};
use self::status::{build_log_lines, build_status_line};

pub(crate) use picker::{hit_test, render_picker_modal, ModalHit, ModalLayout};
#[cfg(test)]
pub(crate) use picker::ModalRow;

pub fn draw_ui(f: &mut Frame, app: &mut AppState) {
    let size = f.area();
    if size.width == 0 || size.height == 0 {
        return;
    }

    // Clear every frame; shorter rows would otherwise leave stale cells behind.
    f.render_widget(Clear, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(LOG_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .split(size);
    let width = size.width as usize;

    f.render_widget(
        Paragraph::new(Text::from(vec![build_header_line(app, width)])),
        chunks[0],
    );
    let roster_lines = build_roster_lines(app, chunks[1].height as usize, width);
    f.render_widget(Paragraph::new(Text::from(roster_lines)), chunks[1]);
    f.render_widget(
        Paragraph::new(Text::from(vec![build_stats_line(app)])),
        chunks[2],
    );
    let log_lines = build_log_lines(app, chunks[3].height as usize, width);
    f.render_widget(Paragraph::new(Text::from(log_lines)), chunks[3]);
    f.render_widget(
        Paragraph::new(Text::from(vec![build_status_line(app)])),
        chunks[4],
    );

    // The modal goes last so its backdrop dims everything drawn above.
    app.picker_layout = render_picker_modal(f.buffer_mut(), size, &app.picker, &app.theme);
}
