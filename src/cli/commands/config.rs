//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::PgDumpResult;

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> PgDumpResult<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(config)?;
            println!("# Configuration file: {}", manager.path().display());
            println!();
            println!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", manager.path().display());
        }
    }

    Ok(())
}
