//! Comet Engine Contract
//!
//! The session layer never talks to a platform webview directly. Each tab
//! owns one [`EngineHandle`], built by an [`EngineFactory`] injected at
//! construction time. Page loading, rendering, script execution and history
//! traversal all happen behind this boundary; the engine reports back through
//! [`EngineEvent`] notifications marshaled onto the session by the shell.

mod config;
mod error;
mod event;
mod handle;

pub use config::{EngineConfig, DEFAULT_USER_AGENT};
pub use error::EngineError;
pub use event::EngineEvent;
pub use handle::{EngineFactory, EngineHandle};

pub type Result<T> = std::result::Result<T, EngineError>;
