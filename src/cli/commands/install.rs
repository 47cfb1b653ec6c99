//! Install command - fetch the pg_dump binary into the cache

use crate::cache::CacheStore;
use crate::cli::args::InstallArgs;
use crate::config::Config;
use crate::error::PgDumpResult;
use crate::platform::Platform;
use crate::provision::Provisioner;
use console::style;

/// Execute the install command
pub async fn execute(args: InstallArgs, config: &Config) -> PgDumpResult<()> {
    // Resolve first: an unsupported host never reaches the network
    let platform = Platform::resolve()?;
    let cache = CacheStore::from_config(config)?;
    let provisioner = Provisioner::with_http(cache, config);

    if !args.force {
        if let Some(path) = provisioner.installed_binary(platform).await {
            println!(
                "{} pg_dump is already installed at {}",
                style("✓").green(),
                path.display()
            );
            return Ok(());
        }
    }

    println!(
        "Installing pg_dump for {} from {}",
        style(platform).cyan(),
        provisioner.download_url(platform)
    );

    let path = if args.force {
        provisioner.reinstall(platform).await?
    } else {
        provisioner.ensure_binary(platform).await?
    };

    println!("{} pg_dump ready at {}", style("✓").green(), path.display());
    Ok(())
}
