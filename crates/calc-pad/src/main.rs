mod script;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calc_pad_config::AppConfig;
use calc_pad_mod_history::{HistoryConfig, HistoryManager};
use clap::Parser;

/// An arithmetic calculator with linear undo/redo history.
#[derive(Parser, Debug)]
#[command(
    name = "calc-pad",
    version,
    about,
    after_help = "On first run, a default config file (calc-pad.json) is written next to \
                  the executable, or to $CALC_PAD_CONFIG / --config if given. \
                  No other state is saved."
)]
struct Cli {
    /// Script to run, one step per line (`-` reads stdin).
    /// Replays the built-in demo session when omitted.
    script: Option<PathBuf>,

    /// Config file to use instead of the default location.
    /// Created with default values if it does not exist.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decimal places to print, overriding the config file.
    #[arg(long)]
    precision: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting calc-pad");

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    tracing::debug!("Using config from {}", config_path.display());
    let mut app_config = AppConfig::load_or_create(&config_path);
    if let Some(precision) = cli.precision {
        app_config.precision = precision;
        app_config.sanitize();
    }

    let text = match &cli.script {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => script::DEMO_SCRIPT.to_string(),
    };
    let steps = script::parse_script(&text)?;

    let mut mgr = HistoryManager::new(HistoryConfig::from(&app_config));
    script::run(&mut mgr, &steps);
    tracing::debug!(
        undo_len = mgr.undo_count(),
        redo_len = mgr.redo_count(),
        "Session finished"
    );

    Ok(())
}
