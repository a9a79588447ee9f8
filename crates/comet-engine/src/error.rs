//! Engine error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to create engine webview: {0}")]
    Creation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Engine call failed: {0}")]
    Backend(String),
}
