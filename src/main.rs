use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cell;
mod cli;
mod commands;
mod config;
mod error;
mod host;
mod registry;
mod script;
mod selection;
mod store;
mod view;

use cli::{Cli, Commands, OutputFormat};
use config::{LogLevel, Settings};
use registry::CellRegistry;

fn setup_logging(log_level: LogLevel) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cellhost")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("cellhost.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, settings: Settings, registry: &CellRegistry) -> Result<()> {
    match cli.command {
        Commands::List { filter, format } => {
            commands::list::run(filter.as_deref(), OutputFormat::resolve(format), registry)
        }
        Commands::Render { select, sets, format } => commands::render::run(
            select.as_deref(),
            &sets,
            OutputFormat::resolve(format),
            &settings,
            registry,
        ),
        Commands::Run { script, format } => {
            commands::run::run(script.as_ref(), OutputFormat::resolve(format), &settings, registry)
        }
        Commands::Config { action } => commands::config::run(action, &settings),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Settings::load are silent)
    let settings = Settings::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(settings.log_level).context("Failed to setup logging")?;

    info!("Starting cellhost with config from: {:?}", cli.config);

    let registry = CellRegistry::default();

    run(cli, settings, &registry).context("Command failed")?;

    Ok(())
}
