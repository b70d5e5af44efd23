use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use is_terminal::IsTerminal;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use catalog_browser::config::AppConfig;
use catalog_browser::core::catalog::CatalogSource;
use catalog_browser::core::logging::{self, StartupError};
use catalog_browser::core::persistence::UiStateStore;
use catalog_browser::tui::app::AppState;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = AppConfig::load();

    // stderr belongs to the alternate screen once the TUI is up
    let interactive = io::stdout().is_terminal();
    let _log_guard = if interactive {
        logging::init_tui(&config.data_dir())
    } else {
        logging::init(&config.data_dir())
    };
    log::info!("{} v{} starting", catalog_browser::NAME, catalog_browser::VERSION);

    if !interactive {
        return Err(StartupError::new("stdout is not a terminal")
            .with_help("Run catalog-browser from an interactive terminal")
            .into());
    }

    let source = CatalogSource::from_path(config.data.catalog_path.clone());
    let store = config.state_path().map(UiStateStore::new);
    tracing::info!(
        source = %source.describe(),
        state = ?store.as_ref().map(|s| s.path().display().to_string()),
        "Resolved data sources"
    );

    let mut terminal = setup_terminal().map_err(StartupError::terminal)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(&config, source, store, event_rx, event_tx);
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    restore_terminal(&mut terminal).map_err(StartupError::terminal)?;

    if let Err(e) = result {
        tracing::error!(error = %e, "TUI exited with error");
        return Err(StartupError::new(format!("Application error: {e}")).into());
    }

    log::info!("Shut down cleanly");
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    undo_on_err(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Run `step`, calling `undo` if it fails.
fn undo_on_err<T>(step: impl FnOnce() -> io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    step().inspect_err(|_| undo())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
