//! Engine push notifications
//!
//! Delivered per tab by the shell after marshaling webview callbacks onto
//! the session. The session drops events addressed to tabs that no longer
//! exist, so a released handle can never reach an observer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EngineEvent {
    /// The document title changed
    TitleChanged(String),
    /// The committed URL changed (navigation, redirect, in-page)
    UrlChanged(String),
    /// The page icon changed; `None` clears it
    FaviconChanged(Option<String>),
    /// A document finished loading at the given URL
    LoadFinished(String),
}
