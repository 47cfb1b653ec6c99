//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// UI context that determines whether progress is drawn
///
/// Standard output may carry dump text, so interactivity is judged on
/// standard error, where all progress output goes.
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::detect_interactive(),
        }
    }

    /// Create a non-interactive context (for testing or explicit CI mode)
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    /// Whether progress bars should be drawn
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn detect_interactive() -> bool {
        if !std::io::stderr().is_terminal() {
            return false;
        }

        if std::env::var("CI").is_ok() {
            return false;
        }

        let ci_vars = [
            "GITHUB_ACTIONS",
            "GITLAB_CI",
            "CIRCLECI",
            "TRAVIS",
            "JENKINS_URL",
            "BUILDKITE",
            "TEAMCITY_VERSION",
            "TF_BUILD",
        ];

        !ci_vars.iter().any(|var| std::env::var(var).is_ok())
    }
}
