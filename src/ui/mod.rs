pub mod components;
pub mod theme;

use crate::app::event::{AppCommand, handle_key_event};
use crate::app::{AppState, CopyContext};
use crate::clipboard::ClipboardWriter;
use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct TerminalGuard {
    keyboard_enhancement: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhancement {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

pub async fn run_tui<C: ClipboardWriter>(mut state: AppState, mut context: CopyContext<C>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let supports_keyboard_enhancement = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok();

    let _guard = TerminalGuard {
        keyboard_enhancement: supports_keyboard_enhancement,
    };

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (input_tx, input_rx) = mpsc::channel(64);
    spawn_input_reader(input_tx);

    info!(fields = state.fields.len(), "Payment page opened");
    let result = run_app(&mut terminal, &mut state, &mut context, input_rx).await;
    context.shutdown();
    terminal.show_cursor()?;

    result
}

/// Terminal input is blocking, so it is read on its own thread and forwarded.
/// The thread exits once the receiving side is gone.
fn spawn_input_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "Failed to poll terminal events");
                    break;
                }
            }
        }
    });
}

async fn run_app<C: ClipboardWriter>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    context: &mut CopyContext<C>,
    mut input_rx: mpsc::Receiver<Event>,
) -> Result<()> {
    loop {
        let snapshot = context.snapshot();
        terminal.draw(|f| {
            components::render(f, state, &snapshot);
        })?;

        tokio::select! {
            input = input_rx.recv() => match input {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    match handle_key_event(key, state) {
                        Some(AppCommand::Copy(text)) => context.spawn_copy(text),
                        Some(AppCommand::Dismiss) => {
                            context.dismiss();
                        }
                        None => {}
                    }
                }
                // Resize and friends only need a redraw.
                Some(_) => {}
                None => break,
            },
            event = context.next_event() => {
                debug!(?event, "Copy context event");
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
