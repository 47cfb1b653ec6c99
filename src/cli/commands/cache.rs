//! Cache command - inspect or clear the binary cache

use crate::cache::CacheStore;
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::PgDumpResult;
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> PgDumpResult<()> {
    let cache = CacheStore::from_config(config)?;

    match args.action {
        CacheAction::Path => {
            println!("{}", cache.root().display());
        }
        CacheAction::Clear => {
            let removed = cache.clear().await?;
            if removed == 0 {
                println!("Cache is already empty.");
            } else {
                println!(
                    "{} Removed {} item(s) from {}",
                    style("✓").green(),
                    removed,
                    cache.root().display()
                );
            }
        }
    }

    Ok(())
}
