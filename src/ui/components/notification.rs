use crate::app::{AppState, CopySnapshot};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Draw the "copied" banner in the bottom-right corner of `area`.
pub fn render(f: &mut Frame, state: &AppState, snapshot: &CopySnapshot, area: Rect) {
    if !snapshot.notification_visible {
        return;
    }

    let text = format!(" ✓ {} ", state.notification_message);
    let banner = banner_area(area, text.width() as u16 + 2);

    let style = Style::default()
        .fg(state.theme.notification_fg)
        .bg(state.theme.notification_bg)
        .add_modifier(Modifier::BOLD);
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).style(style));

    f.render_widget(Clear, banner);
    f.render_widget(paragraph, banner);
}

fn banner_area(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let height = 3.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width + 2).min(area.width - width),
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}
