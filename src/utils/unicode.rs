use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` so it occupies at most `max_width` terminal columns, marking the
/// cut with an ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Break `s` into chunks of at most `max_width` columns without splitting
/// characters. Long wallet addresses have no spaces, so this is a hard wrap.
pub fn hard_wrap(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || s.is_empty() {
        return vec![s.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0;
        }
        current.push(c);
        width += w;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
