//! pgdump - Self-provisioning pg_dump wrapper
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use pgdump::cli::{commands, Cli, Commands};
use pgdump::config::{ConfigManager, LogFormat};
use pgdump::error::PgDumpResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PgDumpResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, config.general.log_format);
    debug!("Configuration loaded from {}", config_manager.path().display());

    match cli.command {
        None => commands::dump(cli.dump, cli.verbose, &config).await,
        Some(Commands::Install(args)) => commands::install(args, &config).await,
        Some(Commands::Cache(args)) => commands::cache(args, &config).await,
        Some(Commands::Config(args)) => commands::config(args, &config_manager, &config).await,
    }
}

/// Logs go to stderr so a dump on stdout stays clean.
/// `--verbose` forces info level; otherwise RUST_LOG applies, defaulting to warn.
fn init_logging(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("pgdump=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pgdump=warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.without_time().init(),
        LogFormat::Json => builder.json().init(),
    }
}
