//! Download progress with CI fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Create a byte-counting progress bar for an artifact download.
///
/// Draws to standard error in interactive mode; otherwise the bar is hidden
/// and every operation on it is a no-op. `total` comes from the response's
/// `Content-Length`, when the server sends one.
pub fn download_bar(ctx: &UiContext, label: &str, total: Option<u64>) -> ProgressBar {
    if !ctx.is_interactive() {
        return ProgressBar::hidden();
    }

    let bar = match total {
        Some(len) => {
            let bar = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} {prefix}  {bar:24.cyan/dim} {bytes}/{total_bytes} {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("━╸─"),
            );
            bar
        }
        None => {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner:.cyan} {prefix}  {bytes} {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        }
    };

    bar.set_prefix(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
