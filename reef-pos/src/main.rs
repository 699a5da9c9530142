//! Reef POS - restaurant point of sale terminal

mod app;
mod config;
mod logging;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::AppConfig;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reef_client::{ClientConfig, TokenStore};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Environment and configuration
    dotenvy::dotenv().ok();
    let config = AppConfig::parse();

    // 2. Logging (file-only, the TUI owns the terminal)
    let _guard = logging::init(&config.work_dir)?;
    tracing::info!(api_url = %config.api_url, tables = config.tables, "Reef POS starting");

    // 3. API client, restoring any stored token
    let token_store = TokenStore::new(&config.work_dir);
    let mut client_config = ClientConfig::new(&config.api_url).with_timeout(config.timeout);
    if let Some(token) = token_store.load() {
        tracing::info!("restored stored token");
        client_config = client_config.with_token(token);
    }
    let client = client_config.build_http_client();

    // 4. Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 5. Run the app
    let mut app = App::new(config, client, token_store);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    tracing::info!("Reef POS stopped");
    Ok(())
}
