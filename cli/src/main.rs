use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use stockroom_cli::{AppConfig, ConsolePresenter, ConsolePrompter, Dispatcher, run_menu};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "stockroom", version)]
#[command(about = "Console book stock manager backed by SQLite")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file path (overrides the configuration file).
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    /// Table name (overrides the configuration file).
    #[arg(long, global = true)]
    table: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a configuration file with the current settings.
    InitConfig {
        /// Destination YAML path.
        path: PathBuf,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = resolve_config(cli.config.as_deref(), cli.database, cli.table).and_then(
        |config| match cli.command {
            Some(Command::InitConfig { path }) => run_init_config(&config, &path),
            None => run_interactive(&config),
        },
    );

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never interleave with the menu on stdout.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn resolve_config(
    path: Option<&Path>,
    database: Option<PathBuf>,
    table: Option<String>,
) -> Result<AppConfig, String> {
    let config = match path {
        Some(path) => AppConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AppConfig::default(),
    };
    Ok(config.with_overrides(database, table))
}

fn run_init_config(config: &AppConfig, path: &Path) -> Result<(), String> {
    config
        .save(path)
        .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
    println!("Wrote configuration to '{}'.", path.display());
    Ok(())
}

fn run_interactive(config: &AppConfig) -> Result<(), String> {
    let dispatcher = Dispatcher::new(&config.database, config.table.clone());
    tracing::info!(
        database = %dispatcher.database().display(),
        table = dispatcher.table(),
        "starting book stock manager"
    );

    let stdin = io::stdin();
    let mut prompter = ConsolePrompter::new(stdin.lock(), io::stdout());
    let mut presenter = ConsolePresenter::new(io::stdout());

    run_menu(&dispatcher, &mut prompter, &mut presenter)
        .map_err(|err| format!("Failed to write to the console: {err}"))
}
