//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

/// Search behavior configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period before a typed query settles. Zero fires on the next
    /// tick of the runtime.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
        }
    }
}

/// App-level configuration for the client core.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Search pipeline settings.
    pub search: SearchConfig,
    /// Optional JSON file to load the note library from.
    pub notes_path: Option<PathBuf>,
    /// Optional JSON file overriding the built-in onboarding flow.
    pub flow_path: Option<PathBuf>,
}
