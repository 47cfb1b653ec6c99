//! Command-line frontend

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
