//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Engine error: {0}")]
    Engine(#[from] comet_engine::EngineError),

    #[error("Tab error: {0}")]
    Tab(#[from] comet_tabs::TabError),

    #[error("Session error: {0}")]
    Session(#[from] comet_session::SessionError),

    #[error("Configuration error: {0}")]
    Config(String),
}
