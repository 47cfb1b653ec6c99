//! Binary provisioning
//!
//! Downloads the release archive for a platform, unpacks it into a staging
//! directory beside the cache entry, and renames the staging directory into
//! place. The rename is the commit point: a crashed or failed install leaves
//! only temporaries (removed on drop), and two concurrent installs cannot
//! interleave files inside one entry.

pub mod extract;
pub mod fetch;

pub use extract::extract_archive;
pub use fetch::{ArtifactFetcher, HttpFetcher, MAX_REDIRECTS};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{PgDumpError, PgDumpResult};
use crate::platform::Platform;
use crate::ui::UiContext;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Release version artifacts are fetched for
pub const RELEASE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the pg_dump release for a platform into the cache
pub struct Provisioner {
    cache: CacheStore,
    fetcher: Box<dyn ArtifactFetcher>,
    release_base: String,
    version: String,
}

impl Provisioner {
    /// Create a provisioner with an explicit fetcher
    pub fn new(
        cache: CacheStore,
        fetcher: Box<dyn ArtifactFetcher>,
        release_base: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            release_base: release_base.into(),
            version: RELEASE_VERSION.to_string(),
        }
    }

    /// Create a provisioner downloading over HTTP from the configured release host
    pub fn with_http(cache: CacheStore, config: &Config) -> Self {
        Self::new(
            cache,
            Box::new(HttpFetcher::new(UiContext::detect())),
            config.release.base_url.clone(),
        )
    }

    /// Override the release version (defaults to this crate's version)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The cached binary for `platform`, if one is already in place
    pub async fn installed_binary(&self, platform: Platform) -> Option<PathBuf> {
        let binary = self.cache.binary_path(platform);
        self.cache.exists(&binary).await.then_some(binary)
    }

    /// Download URL used for `platform`
    pub fn download_url(&self, platform: Platform) -> String {
        platform.download_url(&self.release_base, &self.version)
    }

    /// Return the cached binary, installing it first if it is absent.
    ///
    /// An existing binary is returned as-is; its contents are not verified.
    pub async fn ensure_binary(&self, platform: Platform) -> PgDumpResult<PathBuf> {
        if let Some(binary) = self.installed_binary(platform).await {
            info!("pg_dump already installed at {}", binary.display());
            return Ok(binary);
        }
        self.install(platform).await
    }

    /// Remove any existing install for `platform` and install it again
    pub async fn reinstall(&self, platform: Platform) -> PgDumpResult<PathBuf> {
        self.cache.remove_entry(platform).await?;
        self.install(platform).await
    }

    async fn install(&self, platform: Platform) -> PgDumpResult<PathBuf> {
        let root = self.cache.ensure_root().await?;
        let url = self.download_url(platform);
        info!("Downloading {}", url);

        let download = tempfile::Builder::new()
            .prefix(&format!("{}.", platform.archive_name()))
            .suffix(".part")
            .tempfile_in(root)
            .map_err(|e| PgDumpError::io("creating download file", e))?
            .into_temp_path();

        self.fetcher.fetch(&url, &download).await?;

        let staging = tempfile::Builder::new()
            .prefix(&format!(".{}.", platform.binary_folder_name()))
            .tempdir_in(root)
            .map_err(|e| PgDumpError::io("creating staging directory", e))?;

        extract_archive(&download, platform.archive_kind(), staging.path()).await?;
        drop(download);

        let staged_binary = staging.path().join(platform.binary_name());
        if !self.cache.exists(&staged_binary).await {
            return Err(PgDumpError::extraction(
                platform.archive_name(),
                format!("archive does not contain {}", platform.binary_name()),
            ));
        }
        if !platform.is_windows() {
            make_executable(&staged_binary).await?;
        }

        let binary = self.promote(platform, staging.path()).await?;
        info!("Installed pg_dump to {}", binary.display());
        Ok(binary)
    }

    /// Move a fully prepared staging directory onto the platform's entry
    async fn promote(&self, platform: Platform, staging: &Path) -> PgDumpResult<PathBuf> {
        let entry = self.cache.entry_path(platform);
        let binary = self.cache.binary_path(platform);

        // An entry without a binary is debris from an interrupted install
        if self.cache.exists(&entry).await && !self.cache.exists(&binary).await {
            debug!("Replacing incomplete entry {}", entry.display());
            self.cache.remove_entry(platform).await?;
        }

        match fs::rename(staging, &entry).await {
            Ok(()) => Ok(binary),
            Err(_) if self.cache.exists(&binary).await => {
                debug!("Another install finished first, keeping {}", entry.display());
                Ok(binary)
            }
            Err(e) => Err(PgDumpError::io(
                format!("moving install into {}", entry.display()),
                e,
            )),
        }
    }
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> PgDumpResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| PgDumpError::io(format!("setting permissions on {}", path.display()), e))
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> PgDumpResult<()> {
    Ok(())
}
