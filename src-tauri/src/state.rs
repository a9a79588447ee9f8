//! Application state management
//!
//! One `Browser` per window, constructor-injected into the Tauri state
//! container. `ShellObserver` is the session's callback sink: it mirrors
//! tab changes into the toolbar UI webview and the native window chrome.
//!
//! Observer callbacks run while the session lock is held, so they never call
//! back into the `Browser`; the active tab id is cached locally instead.

use parking_lot::RwLock;
use tauri::{AppHandle, Emitter, Manager};

use comet_core::{Browser, SessionObserver, Tab, TabId};

use crate::commands::tabs::TabInfo;
use crate::commands::ui_webview_label;

pub struct AppState {
    browser: Browser,
}

impl AppState {
    pub fn new(browser: Browser) -> Self {
        Self { browser }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }
}

pub struct ShellObserver {
    app: AppHandle,
    window_label: String,
    /// Cached active tab id; kept here to avoid re-entering the session
    active: RwLock<Option<TabId>>,
}

impl ShellObserver {
    pub fn new(app: AppHandle, window_label: impl Into<String>) -> Self {
        Self {
            app,
            window_label: window_label.into(),
            active: RwLock::new(None),
        }
    }

    fn is_active(&self, id: &TabId) -> bool {
        self.active.read().as_ref() == Some(id)
    }

    fn emit_ui<P: serde::Serialize + Clone>(&self, event: &str, payload: P) {
        let ui_label = ui_webview_label(&self.window_label);
        if let Err(e) = self.app.emit_to(ui_label.as_str(), event, payload) {
            tracing::warn!(event = %event, error = %e, "Failed to emit UI event");
        }
    }

    fn set_window_title(&self, title: &str) {
        if let Some(window) = self.app.get_window(&self.window_label) {
            let _ = window.set_title(&format!("{} - Comet", title));
        }
    }
}

#[derive(Clone, serde::Serialize)]
struct TabFieldPayload<'a> {
    id: &'a str,
    value: Option<&'a str>,
}

impl SessionObserver for ShellObserver {
    fn on_title_changed(&self, id: &TabId, title: &str) {
        if self.is_active(id) {
            self.set_window_title(title);
        }
        self.emit_ui(
            "title-changed",
            TabFieldPayload {
                id: id.as_str(),
                value: Some(title),
            },
        );
    }

    fn on_url_changed(&self, id: &TabId, url: &str) {
        self.emit_ui(
            "address-changed",
            TabFieldPayload {
                id: id.as_str(),
                value: Some(url),
            },
        );
    }

    fn on_favicon_changed(&self, id: &TabId, favicon_url: Option<&str>) {
        self.emit_ui(
            "favicon-changed",
            TabFieldPayload {
                id: id.as_str(),
                value: favicon_url,
            },
        );
    }

    fn on_active_tab_changed(&self, tab: &Tab) {
        *self.active.write() = Some(tab.id.clone());
        self.set_window_title(tab.display_title());

        let mut info = TabInfo::from(tab.clone());
        info.is_active = true;
        self.emit_ui("active-changed", info);
    }

    fn on_tabs_changed(&self) {
        self.emit_ui("tabs-updated", ());
    }
}
