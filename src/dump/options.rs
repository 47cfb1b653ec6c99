//! Options for a single pg_dump invocation

use crate::error::{PgDumpError, PgDumpResult};
use std::path::PathBuf;

/// What to dump and where to send it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Database name, passed as the final positional argument
    pub database: String,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Dump only object definitions, no data
    pub schema_only: bool,
    /// Write standard output here instead of capturing it
    pub output_file: Option<PathBuf>,
    /// Extra flags passed through verbatim, before the database name
    pub raw_args: Vec<String>,
    /// Log the resolved binary and argument list before spawning
    pub verbose: bool,
}

impl DumpOptions {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn schema_only(mut self, schema_only: bool) -> Self {
        self.schema_only = schema_only;
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn raw_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject options pg_dump could not act on
    pub fn validate(&self) -> PgDumpResult<()> {
        if self.database.trim().is_empty() {
            return Err(PgDumpError::Validation(
                "Database name is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Command-line arguments for pg_dump, in a stable order.
    ///
    /// Connection flags come first, then `--schema-only`, then raw flags;
    /// the database name is always last.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(ref user) = self.user {
            args.push("--username".to_string());
            args.push(user.clone());
        }
        if let Some(ref host) = self.host {
            args.push("--host".to_string());
            args.push(host.clone());
        }
        if let Some(port) = self.port {
            args.push("--port".to_string());
            args.push(port.to_string());
        }
        if self.schema_only {
            args.push("--schema-only".to_string());
        }
        args.extend(self.raw_args.iter().cloned());
        args.push(self.database.clone());

        args
    }
}
