//! Release artifact download
//!
//! Redirects are followed here rather than inside the HTTP client so that a
//! redirect without a `Location` header surfaces as a download error naming
//! the URL that produced it.

use crate::error::{PgDumpError, PgDumpResult};
use crate::ui::{download_bar, UiContext};
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Redirect hops allowed before giving up
pub const MAX_REDIRECTS: usize = 10;

/// Something that can place a release artifact at a local path
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Download `url` into `dest`, returning the number of bytes written
    async fn fetch(&self, url: &str, dest: &Path) -> PgDumpResult<u64>;
}

/// Fetcher backed by a blocking `ureq` agent
pub struct HttpFetcher {
    agent: ureq::Agent,
    ui: UiContext,
}

impl HttpFetcher {
    /// Create a fetcher that draws progress according to `ui`
    pub fn new(ui: UiContext) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .max_redirects(0)
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, ui }
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> PgDumpResult<u64> {
        let agent = self.agent.clone();
        let ui = self.ui.clone();
        let url_owned = url.to_string();
        let dest = dest.to_path_buf();

        tokio::task::spawn_blocking(move || download_blocking(&agent, &ui, &url_owned, &dest))
            .await
            .map_err(|e| PgDumpError::download(url, format!("download task failed: {}", e)))?
    }
}

fn download_blocking(
    agent: &ureq::Agent,
    ui: &UiContext,
    url: &str,
    dest: &Path,
) -> PgDumpResult<u64> {
    let mut current = url.to_string();

    for _ in 0..=MAX_REDIRECTS {
        let response = agent
            .get(&current)
            .call()
            .map_err(|e| PgDumpError::download(&current, e.to_string()))?;
        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    PgDumpError::download(
                        &current,
                        format!("redirect {} without Location header", status.as_u16()),
                    )
                })?;
            let next = resolve_location(&current, location)?;
            debug!("Following {} redirect to {}", status.as_u16(), next);
            current = next;
            continue;
        }

        if !status.is_success() {
            return Err(PgDumpError::download(
                &current,
                format!("HTTP status {}", status.as_u16()),
            ));
        }

        let total = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let file = std::fs::File::create(dest)
            .map_err(|e| PgDumpError::io(format!("creating {}", dest.display()), e))?;

        let label = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pg_dump".to_string());
        let bar = download_bar(ui, &label, total);
        let mut writer = bar.wrap_write(file);
        let mut reader = response.into_body().into_reader();

        let written = std::io::copy(&mut reader, &mut writer)
            .map_err(|e| PgDumpError::download(&current, e.to_string()))?;
        writer
            .flush()
            .map_err(|e| PgDumpError::io(format!("writing {}", dest.display()), e))?;
        bar.finish_and_clear();

        debug!("Downloaded {} bytes from {}", written, current);
        return Ok(written);
    }

    Err(PgDumpError::download(
        url,
        format!("more than {} redirects", MAX_REDIRECTS),
    ))
}

/// Resolve a `Location` header against the URL that returned it
fn resolve_location(base: &str, location: &str) -> PgDumpResult<String> {
    let base_url = Url::parse(base).map_err(|e| PgDumpError::download(base, e.to_string()))?;
    base_url
        .join(location)
        .map(String::from)
        .map_err(|e| PgDumpError::download(base, format!("bad redirect location {}: {}", location, e)))
}
