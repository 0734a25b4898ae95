// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all strikewatch failures.
///
/// Scoring, aggregation and decision are total; only construction
/// (pattern compilation, config validation) and the article boundary
/// can fail.
#[derive(Error, Debug)]
pub enum WatchError {
    /// Malformed article record rejected at the boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// A configured pattern failed to compile.
    #[error("pattern error: `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },

    /// An article feed collaborator failed.
    #[error("feed error ({feed}): {reason}")]
    Feed { feed: String, reason: String },

    /// Filesystem failure (config, feed files, scan records).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WatchError {
    fn from(e: serde_json::Error) -> Self {
        WatchError::Serialization(e.to_string())
    }
}

pub type WatchResult<T> = Result<T, WatchError>;
