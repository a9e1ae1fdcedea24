use unicode_width::UnicodeWidthChar;

pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0).max(1)
}

pub fn sanitize_for_tui(value: &str) -> String {
    // Payload text can carry tabs, carriage returns or ANSI escapes; raw output would move the cursor.
    let mut out = String::new();
    let mut col = 0_usize;
    let tab_width = 4_usize;
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                let Some(next) = chars.peek().copied() else {
                    continue;
                };
                if next == '[' {
                    // CSI: ESC [ ... final_byte
                    chars.next();
                    for seq in chars.by_ref() {
                        if (0x40..=0x7e).contains(&(seq as u32)) {
                            break;
                        }
                    }
                    continue;
                }
                let _ = chars.next();
            }
            '\t' => {
                let next_stop = ((col / tab_width) + 1) * tab_width;
                let spaces = next_stop.saturating_sub(col).max(1);
                out.push_str(&" ".repeat(spaces));
                col += spaces;
            }
            '\r' | '\n' => {
                out.push(' ');
                col += 1;
            }
            c if c.is_control() => {
                out.push(' ');
                col += 1;
            }
            c => {
                out.push(c);
                col += char_width(c);
            }
        }
    }

    out
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || haystack.to_lowercase().contains(&needle)
}
