//! CLI command definitions, routing, and tracing setup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use okrcopilot_core::{FixedCount, KeyResultCount, OkrPipeline, RandomCount, approve};
use okrcopilot_server::AppState;
use okrcopilot_shared::{AppConfig, OkrDraft, PublishedOkr, init_config, load_config};
use okrcopilot_storage::{PublishedStore, Storage};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// OKR Copilot — turn rough goal statements into structured OKRs.
#[derive(Parser)]
#[command(
    name = "okrcopilot",
    version,
    about = "Rewrite free-form goals into a theme, objective, and measurable key results.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate an OKR draft from free text.
    Generate {
        /// The goal, in your own words.
        text: String,

        /// Answer the first baseline question with this value.
        #[arg(short, long)]
        baseline: Option<String>,

        /// Apply an edit instruction after generation.
        #[arg(short, long)]
        edit: Option<String>,

        /// Number of key results to keep (3 or 4). Random when omitted.
        #[arg(long, value_parser = clap::value_parser!(u8).range(3..=4))]
        count: Option<u8>,

        /// Publish the resulting draft.
        #[arg(long)]
        approve: bool,

        /// Print JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Serve the HTTP API.
    Serve {
        /// Bind address (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config and $PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List published OKRs, most recent first.
    Published {
        /// Print JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "okrcopilot=info",
        1 => "okrcopilot=debug",
        _ => "okrcopilot=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            text,
            baseline,
            edit,
            count,
            approve,
            json,
        } => {
            let options = GenerateOptions {
                baseline,
                edit,
                count,
                approve,
                json,
            };
            cmd_generate(&text, options).await
        }
        Command::Serve { host, port } => cmd_serve(host, port).await,
        Command::Published { json } => cmd_published(json).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

struct GenerateOptions {
    baseline: Option<String>,
    edit: Option<String>,
    count: Option<u8>,
    approve: bool,
    json: bool,
}

async fn open_store(config: &AppConfig) -> Result<Storage> {
    let path = config.storage.resolved_path()?;
    let store = Storage::open(&path, config.storage.capacity).await?;
    Ok(store)
}

async fn cmd_generate(text: &str, options: GenerateOptions) -> Result<()> {
    let count: Arc<dyn KeyResultCount> = match options.count {
        Some(n) => Arc::new(FixedCount(usize::from(n))),
        None => Arc::new(RandomCount),
    };
    let pipeline = OkrPipeline::new(count);

    let mut draft = pipeline.run(text)?;

    if let Some(value) = options.baseline.as_deref() {
        match draft.next_gap().map(|gap| gap.index) {
            Some(index) => draft = pipeline.resolve_baseline(draft, index, value)?,
            None => warn!("no baseline question pending, ignoring --baseline"),
        }
    }

    if let Some(instruction) = options.edit.as_deref() {
        draft = pipeline.apply_edit(draft, instruction)?;
    }

    let published = if options.approve {
        let config = load_config()?;
        let store = open_store(&config).await?;
        Some(approve(draft.clone(), &store, Utc::now()).await?)
    } else {
        None
    };

    if options.json {
        let out = match &published {
            Some(okr) => serde_json::to_string_pretty(okr)?,
            None => serde_json::to_string_pretty(&draft)?,
        };
        println!("{out}");
        return Ok(());
    }

    print_draft(&draft);
    if let Some(okr) = published {
        println!("  Published as #{} at {}", okr.id, okr.timestamp.to_rfc3339());
        println!();
    }

    Ok(())
}

fn print_draft(draft: &OkrDraft) {
    println!();
    println!("  Theme:      {}", draft.theme);
    println!("  Objective:  {}", draft.objective);
    println!("  Key results:");
    for (i, kr) in draft.key_results.iter().enumerate() {
        println!("    {}. {kr}", i + 1);
    }
    println!("  Confidence: {}", draft.confidence);
    if let Some(gap) = draft.next_gap() {
        println!();
        println!("  Baseline needed (rerun with --baseline):");
        println!("    {}", gap.question);
    }
    println!();
}

async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let store = open_store(&config).await?;
    let state = AppState::new(
        Arc::new(OkrPipeline::default()),
        Arc::new(store),
        Duration::from_millis(config.server.processing_delay_ms),
    );

    info!(%host, port, "starting OKR API");
    okrcopilot_server::run_server(&host, port, state, &config.server.cors_origins).await?;
    Ok(())
}

async fn cmd_published(json: bool) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;
    let okrs = store.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&okrs)?);
        return Ok(());
    }

    if okrs.is_empty() {
        println!("No published OKRs yet.");
        return Ok(());
    }

    for okr in &okrs {
        print_published(okr);
    }
    Ok(())
}

fn print_published(okr: &PublishedOkr) {
    println!(
        "#{}  [{}]  {}  ({})",
        okr.id,
        okr.theme,
        okr.timestamp.format("%Y-%m-%d %H:%M"),
        okr.confidence
    );
    println!("  {}", okr.objective);
    for kr in &okr.key_results {
        println!("    - {kr}");
    }
    println!();
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
