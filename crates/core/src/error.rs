//! Error types for fwpub-core

use thiserror::Error;

/// Errors that can occur while publishing firmware artifacts
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest serialization error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Build directory does not exist: {0}")]
    BuildDirMissing(String),
}
