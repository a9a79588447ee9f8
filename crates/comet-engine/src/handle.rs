//! Engine handle and factory traits
//!
//! One handle per tab, exclusively owned by the session's tab entry.
//! Dropping the handle releases the underlying webview.

use url::Url;

use crate::config::EngineConfig;
use crate::Result;

/// Per-tab view into the embedded browser engine.
///
/// Network errors, TLS failures and render errors stay behind this trait;
/// the engine surfaces them through its own error pages. Session-level
/// callers only see whether a request could be issued at all.
pub trait EngineHandle: Send + Sync {
    /// Request a load of `url`, replacing the current document.
    fn load(&self, url: &Url) -> Result<()>;

    /// Reload the current document.
    fn reload(&self) -> Result<()>;

    /// True when the engine's history has an entry behind the cursor.
    fn can_go_back(&self) -> bool;

    /// True when the engine's history has an entry ahead of the cursor.
    fn can_go_forward(&self) -> bool;

    /// Traverse one entry back. Callers check [`EngineHandle::can_go_back`]
    /// first; traversing an empty history is a backend-defined no-op.
    fn go_back(&self) -> Result<()>;

    /// Traverse one entry forward.
    fn go_forward(&self) -> Result<()>;

    /// Last committed URL, if any document has loaded.
    fn current_url(&self) -> Option<Url>;

    /// Current document title, if the engine has reported one.
    fn current_title(&self) -> Option<String>;

    /// Raise this tab's rendering surface.
    fn show(&self);

    /// Hide this tab's rendering surface.
    fn hide(&self);
}

/// Builds one engine handle per tab.
///
/// The session receives its factory at construction time; the Tauri shell
/// installs one that creates child webviews, tests install a mock.
pub trait EngineFactory: Send + Sync {
    fn create(&self, tab_id: &str, config: &EngineConfig) -> Result<Box<dyn EngineHandle>>;
}
