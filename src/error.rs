use thiserror::Error;

pub type Result<T> = std::result::Result<T, PruneError>;

/// Hard failures only. Per-tag manifest resolution and deletion errors are
/// absorbed where they occur and surface through logs and the
/// [`DeletionReport`](crate::delete::DeletionReport) instead.
#[derive(Error, Debug)]
pub enum PruneError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry unavailable: tag list fetch returned {0}")]
    RegistryUnavailable(reqwest::StatusCode),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
