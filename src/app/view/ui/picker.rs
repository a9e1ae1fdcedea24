use crate::app::state::picker::{ModalView, SelectableListModal};
use crate::app::view::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};

use super::constants::{
    BUTTON_GAP, CANCEL_LABEL, CONFIRM_LABEL, EMPTY_MESSAGE, MAX_VISIBLE_ROWS, MIN_MODAL_WIDTH,
    MODAL_MARGIN, RELOAD_LABEL, ROW_PREFIX_WIDTH,
};
use super::text::{fit_to_width, visual_width, window_start};

/// Screen geometry of the last rendered modal, kept for mouse hit testing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ModalLayout {
    pub(crate) panel: Rect,
    pub(crate) rows: Vec<ModalRow>,
    pub(crate) confirm: Option<Rect>,
    pub(crate) cancel: Option<Rect>,
    pub(crate) reload: Option<Rect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ModalRow {
    pub(crate) area: Rect,
    pub(crate) index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ModalHit {
    Option(usize),
    Confirm,
    Cancel,
    Reload,
    Panel,
    Backdrop,
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub(crate) fn hit_test(layout: &ModalLayout, column: u16, row: u16) -> ModalHit {
    if !contains(layout.panel, column, row) {
        return ModalHit::Backdrop;
    }
    if let Some(hit) = layout
        .rows
        .iter()
        .find(|candidate| contains(candidate.area, column, row))
    {
        return ModalHit::Option(hit.index);
    }
    let inside = |area: Option<Rect>| area.is_some_and(|area| contains(area, column, row));
    if inside(layout.confirm) {
        ModalHit::Confirm
    } else if inside(layout.cancel) {
        ModalHit::Cancel
    } else if inside(layout.reload) {
        ModalHit::Reload
    } else {
        ModalHit::Panel
    }
}

fn footer_width(shows_confirm: bool) -> usize {
    let cancel = visual_width(CANCEL_LABEL);
    if shows_confirm {
        visual_width(CONFIRM_LABEL) + BUTTON_GAP as usize + cancel
    } else {
        cancel
    }
}

fn list_height(modal: &SelectableListModal) -> u16 {
    match modal.view() {
        Some(ModalView::HasOptions) => {
            let rows = u16::try_from(modal.options().len()).unwrap_or(u16::MAX);
            rows.min(MAX_VISIBLE_ROWS)
        }
        Some(ModalView::Empty) if modal.shows_reload() => 2,
        _ => 1,
    }
}

fn modal_area(area: Rect, modal: &SelectableListModal) -> Rect {
    let widest_label = modal
        .options()
        .iter()
        .map(|option| visual_width(&option.label) + ROW_PREFIX_WIDTH as usize)
        .max()
        .unwrap_or(0);
    let title = modal
        .config()
        .map(|config| visual_width(&config.title) + 2)
        .unwrap_or(0);
    let content = widest_label
        .max(title)
        .max(footer_width(modal.shows_confirm()))
        .max(visual_width(EMPTY_MESSAGE));
    // borders plus one column of padding on each side
    let wanted = u16::try_from(content + 4).unwrap_or(u16::MAX);
    let width = wanted
        .max(MIN_MODAL_WIDTH)
        .min(area.width.saturating_sub(MODAL_MARGIN.saturating_mul(2)));
    let height = list_height(modal)
        .saturating_add(4)
        .min(area.height.saturating_sub(MODAL_MARGIN));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Draws the dimmed backdrop and the centered list panel. Returns `None` when the modal is closed.
pub(crate) fn render_picker_modal(
    buf: &mut Buffer,
    area: Rect,
    modal: &SelectableListModal,
    theme: &Theme,
) -> Option<ModalLayout> {
    let config = modal.config()?;
    buf.set_style(
        area,
        Style::default()
            .bg(theme.backdrop_bg)
            .fg(theme.muted_fg)
            .add_modifier(Modifier::DIM),
    );

    let panel = modal_area(area, modal);
    let mut layout = ModalLayout {
        panel,
        ..ModalLayout::default()
    };
    if panel.width < 6 || panel.height < 4 {
        return Some(layout);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(Line::from(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(theme.panel_bg).fg(theme.text_fg));
    let inner = block.inner(panel);
    Clear.render(panel, buf);
    block.render(panel, buf);

    let content = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };
    if content.width == 0 || content.height < 3 {
        return Some(layout);
    }
    let list = Rect {
        height: content.height - 2,
        ..content
    };
    let footer_y = content.y + content.height - 1;
    let width = content.width as usize;
    let base = Style::default().bg(theme.panel_bg).fg(theme.text_fg);

    match modal.view() {
        Some(ModalView::HasOptions) => {
            let options = modal.options();
            let focused = modal.focused_index().unwrap_or(0);
            let visible = list.height as usize;
            let start = window_start(options.len(), visible, focused);
            for (offset, (index, option)) in options
                .iter()
                .enumerate()
                .skip(start)
                .take(visible)
                .enumerate()
            {
                let is_selected = modal.is_selected(index);
                let is_focused = focused == index;
                let cursor = if is_focused { ">" } else { " " };
                let check = if is_selected { "*" } else { " " };
                let text = fit_to_width(&format!("{cursor} {check} {}", option.label), width);
                let mut style = if is_selected {
                    Style::default()
                        .bg(theme.selected_bg)
                        .fg(theme.selected_fg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    base
                };
                if is_focused {
                    if !is_selected {
                        style = style.fg(theme.accent_soft);
                    }
                    style = style.add_modifier(Modifier::BOLD);
                }
                let y = list.y + offset as u16;
                buf.set_stringn(list.x, y, text, width, style);
                layout.rows.push(ModalRow {
                    area: Rect {
                        x: list.x,
                        y,
                        width: list.width,
                        height: 1,
                    },
                    index,
                });
            }
        }
        _ => {
            buf.set_stringn(
                list.x,
                list.y,
                fit_to_width(EMPTY_MESSAGE, width),
                width,
                base.fg(theme.muted_fg),
            );
            if modal.shows_reload() && list.height >= 2 {
                let reload = button_area(list.x, list.y + 1, RELOAD_LABEL, content);
                buf.set_stringn(
                    reload.x,
                    reload.y,
                    RELOAD_LABEL,
                    reload.width as usize,
                    base.fg(theme.accent).add_modifier(Modifier::BOLD),
                );
                layout.reload = Some(reload);
            }
        }
    }

    let mut x = content.x;
    if modal.shows_confirm() {
        let confirm = button_area(x, footer_y, CONFIRM_LABEL, content);
        buf.set_stringn(
            confirm.x,
            confirm.y,
            CONFIRM_LABEL,
            confirm.width as usize,
            base.fg(theme.accent).add_modifier(Modifier::BOLD),
        );
        x = x.saturating_add(confirm.width).saturating_add(BUTTON_GAP);
        layout.confirm = (confirm.width > 0).then_some(confirm);
    }
    let cancel = button_area(x, footer_y, CANCEL_LABEL, content);
    if cancel.width > 0 {
        buf.set_stringn(
            cancel.x,
            cancel.y,
            CANCEL_LABEL,
            cancel.width as usize,
            base.fg(theme.muted_fg),
        );
        layout.cancel = Some(cancel);
    }

    Some(layout)
}

/// Button rectangle starting at `x`, clipped to the content area.
fn button_area(x: u16, y: u16, label: &str, content: Rect) -> Rect {
    let right = content.x.saturating_add(content.width);
    let available = right.saturating_sub(x);
    let wanted = u16::try_from(visual_width(label)).unwrap_or(u16::MAX);
    Rect {
        x: x.min(right),
        y,
        width: wanted.min(available),
        height: 1,
    }
}
