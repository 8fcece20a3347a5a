//! OKR Copilot TUI: compose, refine and publish OKRs from the terminal.
//!
//! Screens are built with `ratatui` + `crossterm` and drive the same
//! pipeline as the CLI and HTTP API.

mod app;
mod screens;
mod services;
mod widgets;

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::Result;
use okrcopilot_shared::{config_dir, load_config};
use tracing_subscriber::EnvFilter;

use services::Services;

const LOG_FILE: &str = "tui.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_file_logging()?;

    let config = load_config()?;
    let services = Services::open(&config)?;
    tracing::info!("TUI started");
    app::run(services)
}

/// The terminal belongs to the UI, so logs go to `~/.okrcopilot/tui.log`.
fn init_file_logging() -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("okrcopilot=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
