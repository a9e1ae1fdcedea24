use crate::app::util::text::char_width;

pub(super) fn visual_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

pub(super) fn truncate_to_width(text: &str, width: usize) -> String {
    if visual_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let target = width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > target {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Truncates or pads so a highlighted row paints its background edge to edge.
pub(super) fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_to_width(text, width);
    let current = visual_width(&out);
    if current < width {
        out.push_str(&" ".repeat(width - current));
    }
    out
}

/// First visible index so that `focused` stays inside a window of `visible` rows.
pub(super) fn window_start(total: usize, visible: usize, focused: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    focused
        .saturating_add(1)
        .saturating_sub(visible)
        .min(total - visible)
}
