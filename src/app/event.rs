use super::state::AppState;
use crate::keybindings::Action;
use crossterm::event::KeyEvent;

/// Work the key handler hands back to the copy context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Copy(String),
    Dismiss,
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<AppCommand> {
    let action = state.keybindings.lookup(&key)?;

    if state.show_help {
        return handle_help_action(action, state);
    }

    match action {
        Action::MoveUp => state.move_cursor_up(),
        Action::MoveDown => state.move_cursor_down(),
        Action::NextSection => state.next_section(),
        Action::PrevSection => state.prev_section(),
        Action::First => state.move_to_first(),
        Action::Last => state.move_to_last(),
        Action::Copy => {
            return state
                .selected_detail()
                .map(|detail| AppCommand::Copy(detail.value.clone()));
        }
        Action::Dismiss => return Some(AppCommand::Dismiss),
        Action::ToggleHelp => state.show_help = true,
        Action::CloseHelp => {}
        Action::Quit => state.should_quit = true,
    }

    None
}

fn handle_help_action(action: Action, state: &mut AppState) -> Option<AppCommand> {
    match action {
        Action::ToggleHelp | Action::CloseHelp | Action::Dismiss => state.show_help = false,
        Action::Quit => state.should_quit = true,
        _ => {}
    }
    None
}
