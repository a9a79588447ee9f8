//! Comet Core
//!
//! Central coordination layer for the Comet browser shell. The [`Browser`]
//! facade composes the tab session, address-input resolution and the
//! in-memory bookmarks list behind one constructor-injected value owned by
//! the Window Shell; there are no module-level singletons.

mod bookmarks;
mod browser;
mod config;
mod error;

pub use bookmarks::{Bookmark, Bookmarks};
pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use comet_engine::{EngineConfig, EngineError, EngineEvent, EngineFactory, EngineHandle};
pub use comet_navigation::{InputResolution, InputResolver, NavigationLedger};
pub use comet_session::{Session, SessionError, SessionObserver};
pub use comet_tabs::{Tab, TabError, TabId, TabStrip};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
