use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::core::{AppController, Ui};
use crate::store::{open_store, Store};

mod app;
mod buffer;
mod clipboard;
mod constants;
mod events;
mod helpers;
mod terminal;

pub use clipboard::Osc52Clipboard;
pub use events::{CrosstermEvents, EventSource};
pub use terminal::TerminalUi;

type Backend = CrosstermBackend<Stdout>;

#[derive(Debug, Clone, Copy)]
pub struct TuiOptions {
    /// Copy task text with OSC 52 escape sequences.
    pub clipboard: bool,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self { clipboard: true }
    }
}

pub fn run(config: AppConfig, options: TuiOptions) -> Result<()> {
    let store_path = config.store_path();
    let first_run = !store_path.exists();

    // Open the store before touching the terminal so failures print normally.
    let store = open_store(&config)
        .with_context(|| format!("failed to open task store at {}", store_path.display()))?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
    terminal.hide_cursor().context("failed to hide cursor")?;

    let label = format!("{} ({})", store_path.display(), config.backend());
    let mut ui = TerminalUi::new(terminal, CrosstermEvents, label);
    if first_run {
        ui.show_info(&format!(
            "Initialized tasklet data store at {}",
            store_path.display()
        ));
    }

    let mut controller = AppController::new(store);
    if options.clipboard {
        controller = controller.with_clipboard(Box::new(Osc52Clipboard::stdout()));
    }
    controller.set_ui(ui);

    let result = controller.start();
    if let Err(err) = &result {
        error!(error = %err, "terminal UI exited abnormally");
    }

    let (mut store, ui) = controller.into_parts();
    store.close();
    info!("store closed");

    if let Some(ui) = ui {
        restore_terminal(ui.into_terminal())?;
    } else {
        disable_raw_mode().context("failed to disable raw mode")?;
    }

    Ok(result?)
}

fn restore_terminal(mut terminal: Terminal<Backend>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
