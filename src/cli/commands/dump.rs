//! Dump command - run pg_dump with the given flags

use crate::cli::args::DumpArgs;
use crate::config::Config;
use crate::dump::{DumpOptions, DumpOutput, Dumper};
use crate::error::{PgDumpError, PgDumpResult};
use std::io::{self, Write};

/// Host used when neither the flag nor the config names one
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when neither the flag nor the config names one
pub const DEFAULT_PORT: u16 = 5432;

/// Execute a dump
pub async fn execute(args: DumpArgs, verbose: bool, config: &Config) -> PgDumpResult<()> {
    let options = resolve_options(args, verbose, config)?;
    let output = Dumper::from_config(config)?.dump(&options).await?;

    if let DumpOutput::Captured(bytes) = output {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&bytes)
            .and_then(|()| stdout.flush())
            .map_err(|e| PgDumpError::io("writing dump to stdout", e))?;
    }

    Ok(())
}

/// Merge flags with config defaults into invocation options.
///
/// Precedence for connection settings: flag, then `[connection]` config,
/// then the built-in default.
pub fn resolve_options(args: DumpArgs, verbose: bool, config: &Config) -> PgDumpResult<DumpOptions> {
    let connection = &config.connection;

    let output_file = match args.file {
        Some(path) => Some(
            std::path::absolute(&path)
                .map_err(|e| PgDumpError::io(format!("resolving {}", path.display()), e))?,
        ),
        None => None,
    };

    Ok(DumpOptions {
        database: args.database.unwrap_or_default(),
        user: args.user.or_else(|| connection.user.clone()),
        host: Some(
            args.host
                .or_else(|| connection.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        ),
        port: Some(args.port.or(connection.port).unwrap_or(DEFAULT_PORT)),
        schema_only: args.schema_only,
        output_file,
        raw_args: args.raw.map(|raw| raw.0).unwrap_or_default(),
        verbose,
    })
}
