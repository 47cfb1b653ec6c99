//! Per-user binary cache
//!
//! Layout under the cache root:
//!
//! ```text
//! <root>/
//!   pg_dump-ubuntu-x64/        entry for one platform
//!     pg_dump                  the executable (plus any bundled libraries)
//!   pg_dump-ubuntu-x64.tar.gz.<random>.part   transient download
//!   .pg_dump-ubuntu-x64.<random>/             transient extraction staging
//! ```

use crate::config::Config;
use crate::error::{PgDumpError, PgDumpResult};
use crate::platform::Platform;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Handle to the binary cache root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at an explicit directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default root: `<home>/.cache/pgdump`
    pub fn default_root() -> PgDumpResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".cache").join("pgdump"))
            .ok_or(PgDumpError::HomeDirNotFound)
    }

    /// Store at the configured directory, or the default root
    pub fn from_config(config: &Config) -> PgDumpResult<Self> {
        let root = match config.cache.dir {
            Some(ref dir) => dir.clone(),
            None => Self::default_root()?,
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet
    pub async fn ensure_root(&self) -> PgDumpResult<&Path> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            PgDumpError::io(format!("creating cache directory {}", self.root.display()), e)
        })?;
        Ok(&self.root)
    }

    /// Folder holding the extracted artifact for a platform
    pub fn entry_path(&self, platform: Platform) -> PathBuf {
        self.root.join(platform.binary_folder_name())
    }

    /// Path of the executable inside the platform's entry
    pub fn binary_path(&self, platform: Platform) -> PathBuf {
        self.entry_path(platform).join(platform.binary_name())
    }

    pub async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    /// Return the cached executable, failing if it was never provisioned
    pub async fn locate_binary(&self, platform: Platform) -> PgDumpResult<PathBuf> {
        let path = self.binary_path(platform);
        if self.exists(&path).await {
            Ok(path)
        } else {
            Err(PgDumpError::BinaryNotFound(path))
        }
    }

    /// Remove one platform's entry, if present
    pub async fn remove_entry(&self, platform: Platform) -> PgDumpResult<()> {
        let entry = self.entry_path(platform);
        if self.exists(&entry).await {
            debug!("Removing cache entry {}", entry.display());
            fs::remove_dir_all(&entry).await.map_err(|e| {
                PgDumpError::io(format!("removing cache entry {}", entry.display()), e)
            })?;
        }
        Ok(())
    }

    /// Remove everything under the root; returns the number of removed entries
    pub async fn clear(&self) -> PgDumpResult<usize> {
        if !self.exists(&self.root).await {
            return Ok(0);
        }

        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| PgDumpError::io("reading cache directory", e))?;

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PgDumpError::io("reading cache entry", e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| PgDumpError::io(format!("inspecting {}", path.display()), e))?;

            let result = if file_type.is_dir() {
                fs::remove_dir_all(&path).await
            } else {
                fs::remove_file(&path).await
            };
            result.map_err(|e| PgDumpError::io(format!("removing {}", path.display()), e))?;

            debug!("Removed {}", path.display());
            removed += 1;
        }

        Ok(removed)
    }
}
