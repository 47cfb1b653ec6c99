//! CLI command implementations

pub mod cache;
pub mod config;
pub mod dump;
pub mod install;

pub use cache::execute as cache;
pub use config::execute as config;
pub use dump::execute as dump;
pub use install::execute as install;
