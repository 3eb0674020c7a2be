use anyhow::{Context, Result, bail};
use clap::Parser;
use paytui::app::{AppState, CopyContext};
use paytui::cli::{Cli, Commands};
use paytui::clipboard::SystemClipboard;
use paytui::config::Config;
use paytui::copy::CopyController;
use paytui::keybindings::KeybindingCache;
use paytui::page::Page;
use paytui::ui::{self, theme::Theme};
use paytui::utils::paths::{ensure_directories_exist, get_log_path};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging()?;

    let data_file = cli.data.or_else(|| config.data_file.clone());
    let page = Page::load_or_builtin(data_file.as_deref())?;

    match cli.command {
        Some(Commands::Show { json }) => handle_show(&page, json)?,
        Some(Commands::Copy { query }) => handle_copy(&page, &query).await?,
        None => {
            let theme = Theme::from_config(&config);
            let keybindings = KeybindingCache::from_config(&config.keybindings);
            let state = AppState::new(
                page,
                theme,
                keybindings,
                config.notification.message.clone(),
            );
            let context = CopyContext::new(SystemClipboard::new(), &config.notification);

            ui::run_tui(state, context).await?;
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so logs go to a file under ~/.paytui.
fn init_logging() -> Result<()> {
    ensure_directories_exist()?;
    let log_path = get_log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn handle_show(page: &Page, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    println!("\n💳 {}", page.title);
    if !page.subtitle.is_empty() {
        println!("{}", page.subtitle);
    }

    for group in &page.groups {
        println!("\n{} {}", group.icon, group.title);
        for section in &group.sections {
            match (&section.badge, section.coming_soon) {
                (_, true) => println!("  {} {} [COMING SOON]", section.icon, section.title),
                (Some(badge), false) => {
                    println!("  {} {} [{}]", section.icon, section.title, badge.text)
                }
                (None, false) => println!("  {} {}", section.icon, section.title),
            }
            for detail in &section.details {
                println!("    {}: {}", detail.label, detail.value);
            }
            if let Some(note) = &section.note {
                println!("    {} {}", note.variant.icon(), note.text);
            }
        }
    }

    println!();

    Ok(())
}

async fn handle_copy(page: &Page, query: &str) -> Result<()> {
    let detail = page.find_copyable(query)?;
    let controller = CopyController::new(SystemClipboard::new());

    if !controller.copy(&detail.value).await {
        bail!("Could not copy {} to the clipboard", detail.label);
    }

    info!(label = %detail.label, "Copied from command line");
    println!("✓ Copied {}: {}", detail.label, detail.value);

    Ok(())
}
