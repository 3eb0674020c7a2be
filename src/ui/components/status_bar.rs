use crate::app::{AppState, CopySnapshot};
use crate::utils::unicode::truncate_to_width;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, snapshot: &CopySnapshot, area: Rect) {
    let status_line = status_text(state, snapshot, area.width as usize);

    let base_style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, base_style)]));

    f.render_widget(status, area);
}

fn status_text(state: &AppState, snapshot: &CopySnapshot, width: usize) -> String {
    let nav_hint = "Enter copy  ? help  q quit";
    let version_text = format!("v{VERSION}");

    let position = if state.fields.is_empty() {
        "no copyable fields".to_string()
    } else {
        format!("{}/{}", state.cursor_position + 1, state.fields.len())
    };

    let copied = snapshot
        .last_copied
        .as_deref()
        .map(|text| format!(" | copied: {}", truncate_to_width(text, 24)))
        .unwrap_or_default();

    let left_content = format!(" {}{}", position, copied);
    let right_content = format!("{}  {} ", nav_hint, version_text);

    let padding = width.saturating_sub(left_content.width() + right_content.width());

    format!(
        "{}{:>padding$}{}",
        left_content,
        "",
        right_content,
        padding = padding
    )
}
