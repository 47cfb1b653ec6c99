//! pgdump - Self-provisioning pg_dump wrapper
//!
//! Fetches a prebuilt `pg_dump` for the host platform into a per-user cache
//! and runs it with arguments built from typed options.

pub mod cache;
pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod platform;
pub mod provision;
pub mod ui;

pub use dump::{dump_schema, DumpOptions, DumpOutput, Dumper};
pub use error::{PgDumpError, PgDumpResult};
pub use platform::Platform;
pub use provision::Provisioner;
