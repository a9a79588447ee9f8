//! Webview-backed engine handles
//!
//! Implements the `comet-engine` contract over Tauri child webviews: one
//! child webview per tab, created as a sibling of the toolbar UI webview.
//! The platform webview exposes no synchronous history query, so each handle
//! keeps a `NavigationLedger` in lockstep with the loads and traversals that
//! route through it, plus the in-page navigations reported by `on_page_load`.

use parking_lot::RwLock;
use std::sync::Arc;

use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::{AppHandle, LogicalPosition, LogicalSize, Manager, WebviewUrl};
use url::Url;

use comet_core::{
    EngineConfig, EngineError, EngineEvent, EngineFactory, EngineHandle, NavigationLedger, TabId,
};

use crate::state::AppState;

/// Vertical space reserved for the toolbar UI webview.
pub const TOOLBAR_HEIGHT: f64 = 92.0;

/// Hand a webview callback over to the session. Events raised after the tab
/// closed no longer resolve and are dropped by the session.
fn forward_event(app: &AppHandle, tab_id: &str, event: EngineEvent) {
    if let Some(state) = app.try_state::<AppState>() {
        state.browser().handle_engine_event(&TabId::from(tab_id), event);
    }
}

/// Well-known favicon location for http(s) origins.
fn default_favicon(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    let host = parsed.host_str()?;
    Some(format!("{}://{}/favicon.ico", parsed.scheme(), host))
}

pub struct WebviewEngine {
    label: String,
    webview: tauri::Webview,
    ledger: Arc<RwLock<NavigationLedger>>,
    title: Arc<RwLock<Option<String>>>,
}

impl EngineHandle for WebviewEngine {
    fn load(&self, url: &Url) -> Result<(), EngineError> {
        self.ledger.write().record_load(url.as_str());
        self.webview
            .navigate(url.clone())
            .map_err(|e| EngineError::Backend(e.to_string()))
    }

    fn reload(&self) -> Result<(), EngineError> {
        self.webview
            .reload()
            .map_err(|e| EngineError::Backend(e.to_string()))
    }

    fn can_go_back(&self) -> bool {
        self.ledger.read().can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.ledger.read().can_go_forward()
    }

    fn go_back(&self) -> Result<(), EngineError> {
        if self.ledger.write().record_back().is_none() {
            return Ok(());
        }
        self.webview
            .eval("history.back()")
            .map_err(|e| EngineError::Backend(e.to_string()))
    }

    fn go_forward(&self) -> Result<(), EngineError> {
        if self.ledger.write().record_forward().is_none() {
            return Ok(());
        }
        self.webview
            .eval("history.forward()")
            .map_err(|e| EngineError::Backend(e.to_string()))
    }

    fn current_url(&self) -> Option<Url> {
        self.webview.url().ok()
    }

    fn current_title(&self) -> Option<String> {
        self.title.read().clone()
    }

    fn show(&self) {
        if let Err(e) = self.webview.show() {
            tracing::warn!(label = %self.label, error = %e, "Failed to show webview");
        }
    }

    fn hide(&self) {
        if let Err(e) = self.webview.hide() {
            tracing::warn!(label = %self.label, error = %e, "Failed to hide webview");
        }
    }
}

impl Drop for WebviewEngine {
    fn drop(&mut self) {
        // The session dropped this tab's entry; tear the webview down with it.
        if let Err(e) = self.webview.close() {
            tracing::warn!(label = %self.label, error = %e, "Failed to close webview");
        } else {
            tracing::info!(label = %self.label, "Closed webview");
        }
    }
}

/// Builds one child webview per tab inside the shell window.
pub struct WebviewFactory {
    app: AppHandle,
    window_label: String,
}

impl WebviewFactory {
    pub fn new(app: AppHandle, window_label: impl Into<String>) -> Self {
        Self {
            app,
            window_label: window_label.into(),
        }
    }
}

impl EngineFactory for WebviewFactory {
    fn create(
        &self,
        tab_id: &str,
        config: &EngineConfig,
    ) -> Result<Box<dyn EngineHandle>, EngineError> {
        let window = self
            .app
            .get_window(&self.window_label)
            .ok_or_else(|| EngineError::Creation(format!("No window: {}", self.window_label)))?;

        let label = format!("content-{}-{}", self.window_label, tab_id);
        let blank: Url = "about:blank"
            .parse()
            .map_err(|_| EngineError::Creation("about:blank did not parse".to_string()))?;

        let ledger = Arc::new(RwLock::new(NavigationLedger::new()));
        let title = Arc::new(RwLock::new(None));

        tracing::debug!(
            javascript = config.javascript_enabled,
            plugins = config.plugins_enabled,
            fullscreen = config.fullscreen_enabled,
            "Applying engine capabilities"
        );

        let app_for_title = self.app.clone();
        let id_for_title = tab_id.to_string();
        let title_cache = Arc::clone(&title);

        let app_for_load = self.app.clone();
        let id_for_load = tab_id.to_string();
        let ledger_for_load = Arc::clone(&ledger);

        let builder = WebviewBuilder::new(&label, WebviewUrl::External(blank))
            .auto_resize()
            .enable_clipboard_access()
            .user_agent(&config.user_agent)
            .on_document_title_changed(move |_webview, doc_title| {
                *title_cache.write() = Some(doc_title.clone());
                forward_event(&app_for_title, &id_for_title, EngineEvent::TitleChanged(doc_title));
            })
            .on_page_load(move |_webview, payload| {
                let url = payload.url().to_string();
                match payload.event() {
                    PageLoadEvent::Started => {
                        // In-page and link navigations enter the ledger here;
                        // loads issued through the handle are already current
                        // and deduplicate.
                        if url != "about:blank" {
                            ledger_for_load.write().record_load(&url);
                        }
                        forward_event(&app_for_load, &id_for_load, EngineEvent::UrlChanged(url));
                    }
                    PageLoadEvent::Finished => {
                        forward_event(
                            &app_for_load,
                            &id_for_load,
                            EngineEvent::FaviconChanged(default_favicon(&url)),
                        );
                        forward_event(&app_for_load, &id_for_load, EngineEvent::LoadFinished(url));
                    }
                }
            });

        let (width, height) = window
            .inner_size()
            .ok()
            .zip(window.scale_factor().ok())
            .map(|(size, factor)| (size.width as f64 / factor, size.height as f64 / factor))
            .unwrap_or((800.0, 600.0));

        let webview = window
            .add_child(
                builder,
                LogicalPosition::new(0.0, TOOLBAR_HEIGHT),
                LogicalSize::new(width, (height - TOOLBAR_HEIGHT).max(0.0)),
            )
            .map_err(|e| EngineError::Creation(e.to_string()))?;

        // The session decides which tab is visible.
        let _ = webview.hide();

        tracing::info!(label = %label, tab_id = %tab_id, "Created content webview");

        Ok(Box::new(WebviewEngine {
            label,
            webview,
            ledger,
            title,
        }))
    }
}
