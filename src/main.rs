use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use fleetdesk::app::{keymap::KeyMap, r#loop::run_loop, state::AppState};
use fleetdesk::config::AppConfig;
use fleetdesk::domain::directory::DirectoryFacade;
use fleetdesk::infrastructure::{
    demo_directory::DemoDirectory, http_directory::HttpDirectory, session::SessionStore,
};
use fleetdesk::logging;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

fn build_directory(config: &AppConfig) -> Result<Arc<dyn DirectoryFacade>> {
    match &config.api_base {
        Some(base) => {
            tracing::info!(api_base = %base, "using backend directory");
            Ok(Arc::new(HttpDirectory::new(
                base,
                config.api_token.clone(),
                config.request_timeout(),
            )?))
        }
        None => {
            tracing::info!("no api_base configured, using demo directory");
            Ok(Arc::new(DemoDirectory::default()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    // Everything that can fail on bad configuration happens before the
    // terminal enters raw mode.
    let config = AppConfig::load()?;
    let _log_guard = logging::init()?;
    let keymap = KeyMap::from_config(&config.keys)?;
    let directory = build_directory(&config)?;

    let session = Arc::new(SessionStore::new(config.role));
    let app_state = AppState::new(session, config.palette_settings(), keymap, config.theme);
    tracing::info!(role = ?config.role, "fleetdesk starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, directory).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}
