//! Archive extraction
//!
//! Zip archives (windows artifacts) are unpacked in-process; tarballs are
//! handed to the system `tar`.

use crate::error::{PgDumpError, PgDumpResult};
use crate::platform::ArchiveKind;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Unpack `archive` into the existing directory `dest`
pub async fn extract_archive(archive: &Path, kind: ArchiveKind, dest: &Path) -> PgDumpResult<()> {
    debug!("Extracting {} into {}", archive.display(), dest.display());
    match kind {
        ArchiveKind::Zip => extract_zip(archive, dest).await,
        ArchiveKind::TarGz => extract_tar_gz(archive, dest).await,
    }
}

async fn extract_tar_gz(archive: &Path, dest: &Path) -> PgDumpResult<()> {
    let output = Command::new("tar")
        .arg("-xzf")
        .arg(archive)
        .arg("-C")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| PgDumpError::command_failed("tar -xzf", e))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(PgDumpError::extraction(archive, stderr.trim()))
    }
}

async fn extract_zip(archive: &Path, dest: &Path) -> PgDumpResult<()> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    let archive_for_err = archive.clone();

    // Zip decoding is synchronous and CPU-bound
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&archive)
            .map_err(|e| PgDumpError::io(format!("opening {}", archive.display()), e))?;
        let mut zip = zip::ZipArchive::new(file)
            .map_err(|e| PgDumpError::extraction(&archive, e.to_string()))?;
        zip.extract(&dest)
            .map_err(|e| PgDumpError::extraction(&archive, e.to_string()))
    })
    .await
    .map_err(|e| PgDumpError::extraction(archive_for_err, format!("extraction task failed: {}", e)))?
}
