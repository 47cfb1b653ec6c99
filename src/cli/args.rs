//! CLI argument definitions using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pgdump - Lightweight wrapper for PostgreSQL pg_dump
///
/// Runs a prebuilt pg_dump fetched for this platform. Without a
/// subcommand, dumps the database named by --db.
#[derive(Parser, Debug)]
#[command(name = "pgdump")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to execute (omit to run a dump)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub dump: DumpArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PGDUMP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and cache the pg_dump binary for this platform
    Install(InstallArgs),

    /// Inspect or clear the binary cache
    Cache(CacheArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for a dump
#[derive(Args, Debug, Default)]
pub struct DumpArgs {
    /// Database name
    #[arg(long = "db", value_name = "DATABASE", required = true)]
    pub database: Option<String>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database host [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Database port [default: 5432]
    #[arg(long)]
    pub port: Option<u16>,

    /// Dump only the schema
    #[arg(long)]
    pub schema_only: bool,

    /// Output file path (defaults to stdout)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Pass raw flags directly to pg_dump (shell-style quoting)
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true, value_parser = parse_raw_flags)]
    pub raw: Option<RawFlags>,
}

/// Flags forwarded verbatim to pg_dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags(pub Vec<String>);

/// Arguments for the install command
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Remove any cached binary and download it again
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the cache directory
    Path,

    /// Remove every cached binary
    Clear,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

/// Split a `--raw` value into arguments, honouring shell quoting
fn parse_raw_flags(s: &str) -> Result<RawFlags, String> {
    shlex::split(s)
        .map(RawFlags)
        .ok_or_else(|| format!("unbalanced quotes in raw flags: {s}"))
}
