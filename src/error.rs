//! Error types for pgdump
//!
//! All modules use `PgDumpResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pgdump operations
pub type PgDumpResult<T> = Result<T, PgDumpError>;

/// All errors that can occur in pgdump
#[derive(Error, Debug)]
pub enum PgDumpError {
    // Platform errors
    #[error("Unsupported platform: {os}-{arch}. Supported platforms: {supported}")]
    UnsupportedPlatform {
        os: String,
        arch: String,
        supported: String,
    },

    // Provisioning errors
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to extract {archive}: {reason}")]
    Extraction { archive: PathBuf, reason: String },

    #[error("pg_dump binary not found at {0}")]
    BinaryNotFound(PathBuf),

    #[error("Could not determine the home directory for the binary cache")]
    HomeDirNotFound,

    // Invocation errors
    #[error("{0}")]
    Validation(String),

    #[error("pg_dump exited with code {code}")]
    DumpFailed { code: i32 },

    #[error("pg_dump was terminated by a signal")]
    ProcessSignaled,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl PgDumpError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(archive: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.into(),
            reason: reason.into(),
        }
    }

    /// Exit code reported by pg_dump, if the failure came from the child process
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::DumpFailed { code } => Some(*code),
            _ => None,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::BinaryNotFound(_) => Some("Run: pgdump install"),
            Self::Download { .. } => Some("The install can be retried later with: pgdump install"),
            Self::Extraction { .. } => Some("Remove the partial install with: pgdump cache clear"),
            _ => None,
        }
    }
}
