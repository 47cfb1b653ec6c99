//! Terminal feedback for long-running provisioning steps

mod context;
mod progress;

pub use context::UiContext;
pub use progress::download_bar;
