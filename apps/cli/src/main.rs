//! OKR Copilot CLI — generate, publish and serve OKRs from free-form goals.
//!
//! Every command goes through the shared pipeline in `okrcopilot-core`.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
