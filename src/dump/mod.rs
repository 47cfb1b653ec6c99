//! pg_dump invocation
//!
//! Runs the cached binary with arguments built from [`DumpOptions`]. The
//! child's standard error is passed straight through to ours; only the exit
//! status decides success.

pub mod options;

pub use options::DumpOptions;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{PgDumpError, PgDumpResult};
use crate::platform::Platform;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

/// Result of a successful dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpOutput {
    /// Standard output of pg_dump, byte for byte, when no output file was
    /// requested. pg_dump writes in the database's encoding, which need not
    /// be UTF-8.
    Captured(Vec<u8>),
    /// Standard output was streamed into this file
    Written(PathBuf),
}

impl DumpOutput {
    /// The captured bytes, if the dump was not written to a file
    pub fn captured(&self) -> Option<&[u8]> {
        match self {
            Self::Captured(bytes) => Some(bytes),
            Self::Written(_) => None,
        }
    }

    /// The captured dump as text, if it was captured and is valid UTF-8
    pub fn captured_text(&self) -> Option<&str> {
        self.captured().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

/// Runs pg_dump from a binary cache
#[derive(Debug, Clone)]
pub struct Dumper {
    cache: CacheStore,
    platform: Option<Platform>,
}

impl Dumper {
    /// Create a dumper reading binaries from `cache`
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache,
            platform: None,
        }
    }

    /// Create a dumper reading binaries from the configured cache
    pub fn from_config(config: &Config) -> PgDumpResult<Self> {
        Ok(Self::new(CacheStore::from_config(config)?))
    }

    /// Use a fixed platform's cache entry instead of resolving the host
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Validate options, locate the cached binary and run it
    pub async fn dump(&self, options: &DumpOptions) -> PgDumpResult<DumpOutput> {
        options.validate()?;

        let platform = match self.platform {
            Some(platform) => platform,
            None => Platform::resolve()?,
        };
        let binary = self.cache.locate_binary(platform).await?;

        run_binary(&binary, options).await
    }
}

/// Dump using the default per-user cache and the host platform.
///
/// The `[cache] dir` setting is not consulted here; callers honouring a
/// configuration file should build their dumper with [`Dumper::from_config`].
pub async fn dump_schema(options: &DumpOptions) -> PgDumpResult<DumpOutput> {
    let cache = CacheStore::new(CacheStore::default_root()?);
    Dumper::new(cache).dump(options).await
}

/// Spawn `binary` with the arguments for `options` and settle on its exit
pub async fn run_binary(binary: &Path, options: &DumpOptions) -> PgDumpResult<DumpOutput> {
    let args = options.to_args();
    if options.verbose {
        info!("Spawning pg_dump: {} {}", binary.display(), args.join(" "));
    } else {
        debug!("Spawning pg_dump: {} {}", binary.display(), args.join(" "));
    }

    let mut command = Command::new(binary);
    command
        .args(&args)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit());

    match options.output_file {
        Some(ref path) => {
            let file = tokio::fs::File::create(path)
                .await
                .map_err(|e| PgDumpError::io(format!("creating {}", path.display()), e))?;
            let status = command
                .stdout(Stdio::from(file.into_std().await))
                .status()
                .await
                .map_err(|e| PgDumpError::command_failed(binary.display().to_string(), e))?;

            check_status(status)?;
            debug!("Dump written to {}", path.display());
            Ok(DumpOutput::Written(path.clone()))
        }
        None => {
            // `output()` would pipe stderr too; spawn so it stays inherited
            let child = command
                .stdout(Stdio::piped())
                .spawn()
                .map_err(|e| PgDumpError::command_failed(binary.display().to_string(), e))?;
            let output = child
                .wait_with_output()
                .await
                .map_err(|e| PgDumpError::io("reading pg_dump output", e))?;

            check_status(output.status)?;
            Ok(DumpOutput::Captured(output.stdout))
        }
    }
}

fn check_status(status: ExitStatus) -> PgDumpResult<()> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(PgDumpError::DumpFailed { code }),
        None => Err(PgDumpError::ProcessSignaled),
    }
}
