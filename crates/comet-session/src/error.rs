//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Engine error: {0}")]
    Engine(#[from] comet_engine::EngineError),

    #[error("Tab error: {0}")]
    Tab(#[from] comet_tabs::TabError),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}
