//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_resolve::ResolveError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Scan(String),

    #[error("{0} broken navigation reference(s)")]
    BrokenLinks(usize),
}
