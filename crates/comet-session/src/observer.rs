//! Observer contract toward the Window Shell
//!
//! The shell registers one observer on the session; the session calls it
//! synchronously, on the thread the triggering operation ran on. Callbacks
//! carry the tab id so the shell can update both per-tab chrome (tab labels)
//! and window-level chrome (title, address bar, icon) for the active tab.
//! A tab that has been closed never reaches the observer again.

use comet_tabs::{Tab, TabId};

pub trait SessionObserver: Send + Sync {
    /// A live tab's document title changed.
    fn on_title_changed(&self, id: &TabId, title: &str);

    /// A live tab's committed URL changed.
    fn on_url_changed(&self, id: &TabId, url: &str);

    /// A live tab's favicon changed; `None` clears it.
    fn on_favicon_changed(&self, id: &TabId, favicon_url: Option<&str>);

    /// A different tab became active (activation, open, or close fallback).
    fn on_active_tab_changed(&self, tab: &Tab);

    /// Strip membership or order changed (open, close).
    fn on_tabs_changed(&self);
}
