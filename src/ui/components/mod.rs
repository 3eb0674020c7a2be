pub mod notification;
pub mod payment_list;
pub mod status_bar;

use crate::app::{AppState, CopySnapshot};
use crate::keybindings::Action;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, state: &AppState, snapshot: &CopySnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Payment page
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    payment_list::render(f, state, snapshot, chunks[0]);
    status_bar::render(f, state, snapshot, chunks[1]);
    notification::render(f, state, snapshot, chunks[0]);

    if state.show_help {
        render_help_overlay(f, state);
    }
}

const HELP_ENTRIES: &[(Action, &str)] = &[
    (Action::MoveUp, "Previous field"),
    (Action::MoveDown, "Next field"),
    (Action::NextSection, "Next card"),
    (Action::PrevSection, "Previous card"),
    (Action::First, "First field"),
    (Action::Last, "Last field"),
    (Action::Copy, "Copy value to clipboard"),
    (Action::Dismiss, "Hide notification / close help"),
    (Action::ToggleHelp, "Toggle help"),
    (Action::Quit, "Quit"),
];

fn help_text(state: &AppState) -> String {
    let mut text = String::from("\nPayment Details Help\n\n");
    for (action, description) in HELP_ENTRIES {
        let keys = state.keybindings.keys_for(*action).join(" ");
        text.push_str(&format!("  {:<22} {}\n", keys, description));
    }
    text
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let area = centered_rect(60, 60, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(help_text(state))
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::KeybindingCache;
    use crate::page::Page;
    use crate::ui::theme::Theme;
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> AppState {
        AppState::new(
            Page::builtin().unwrap(),
            Theme::default(),
            KeybindingCache::default(),
            "Copied to clipboard!".to_string(),
        )
    }

    fn screen(state: &AppState, snapshot: &CopySnapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, state, snapshot)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_banner_only_when_visible() {
        let state = state();
        let hidden = CopySnapshot {
            last_copied: Some("8005394377".to_string()),
            notification_visible: false,
        };
        assert!(!screen(&state, &hidden).contains("Copied to clipboard!"));

        let visible = CopySnapshot {
            notification_visible: true,
            ..hidden
        };
        assert!(screen(&state, &visible).contains("Copied to clipboard!"));
    }

    #[test]
    fn test_help_lists_bound_keys() {
        let text = help_text(&state());
        assert!(text.contains("<Enter> c y"));
        assert!(text.contains("Copy value to clipboard"));
    }
}
