//! Tab Session Manager
//!
//! Owns the tab strip and one engine handle per tab. The handle is released
//! when its entry leaves the map, and events addressed to a removed id are
//! dropped, so nothing outlives its tab.

use std::collections::HashMap;

use url::Url;

use comet_engine::{EngineConfig, EngineEvent, EngineFactory, EngineHandle};
use comet_tabs::{Tab, TabId, TabStrip};

use crate::error::SessionError;
use crate::observer::SessionObserver;
use crate::Result;

struct TabEntry {
    tab: Tab,
    handle: Box<dyn EngineHandle>,
}

pub struct Session {
    /// Live tabs; entry ownership is handle ownership
    tabs: HashMap<TabId, TabEntry>,
    /// Display order and active selection
    strip: TabStrip,
    /// URL loaded into every new tab
    homepage: String,
    /// Capability set applied to every engine handle
    engine_config: EngineConfig,
    /// Builds one handle per tab
    factory: Box<dyn EngineFactory>,
    /// Shell-registered callback sink
    observer: Option<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new(
        homepage: String,
        engine_config: EngineConfig,
        factory: Box<dyn EngineFactory>,
    ) -> Self {
        Self {
            tabs: HashMap::new(),
            strip: TabStrip::new(),
            homepage,
            engine_config,
            factory,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observer = Some(observer);
    }

    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    pub fn len(&self) -> usize {
        self.strip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> Vec<Tab> {
        self.strip
            .ids()
            .iter()
            .filter_map(|id| self.tabs.get(id))
            .map(|entry| entry.tab.clone())
            .collect()
    }

    pub fn tab(&self, id: &TabId) -> Option<Tab> {
        self.tabs.get(id).map(|entry| entry.tab.clone())
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.strip
            .active()
            .and_then(|id| self.tabs.get(id))
            .map(|entry| entry.tab.clone())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.strip.active_index()
    }

    pub fn position(&self, id: &TabId) -> Option<usize> {
        self.strip.position(id)
    }

    /// Open a new tab on the homepage and make it active.
    pub fn open_tab(&mut self) -> Result<Tab> {
        let tab = Tab::new(self.homepage.clone())?;
        let handle = self.factory.create(tab.id.as_str(), &self.engine_config)?;

        let homepage = parse_url(&self.homepage)?;
        handle.load(&homepage)?;

        if let Some(active) = self.strip.active() {
            if let Some(entry) = self.tabs.get(active) {
                entry.handle.hide();
            }
        }
        handle.show();

        self.strip.push(tab.id.clone());
        self.tabs.insert(
            tab.id.clone(),
            TabEntry {
                tab: tab.clone(),
                handle,
            },
        );

        tracing::info!(tab_id = %tab.id, url = %tab.url, "Opened tab");
        self.notify_active_changed();
        self.notify_tabs_changed();

        Ok(tab)
    }

    /// Close a tab. Returns false (and changes nothing) for an unknown id or
    /// the last remaining tab. When the active tab closes, the tab now at
    /// the same position takes over, clamped to the last index.
    pub fn close_tab(&mut self, id: &TabId) -> bool {
        let Some(removed) = self.strip.remove(id) else {
            tracing::debug!(tab_id = %id, "Close refused (unknown id or last tab)");
            return false;
        };

        // Dropping the entry releases the engine handle; subsequent events
        // for this id no longer resolve and are discarded.
        self.tabs.remove(id);

        tracing::info!(tab_id = %id, index = removed.index, "Closed tab");

        if removed.was_active {
            if let Some(next) = self.strip.active() {
                if let Some(entry) = self.tabs.get(next) {
                    entry.handle.show();
                }
            }
            self.notify_active_changed();
        }
        self.notify_tabs_changed();

        true
    }

    /// Positional close for the shell's index-based surface.
    pub fn close_tab_at(&mut self, index: usize) -> bool {
        match self.strip.id_at(index).cloned() {
            Some(id) => self.close_tab(&id),
            None => false,
        }
    }

    /// Make an existing tab active. Unknown ids are a no-op.
    pub fn activate_tab(&mut self, id: &TabId) -> bool {
        if self.strip.active() == Some(id) {
            return true;
        }
        if !self.strip.contains(id) {
            return false;
        }

        if let Some(previous) = self.strip.active() {
            if let Some(entry) = self.tabs.get(previous) {
                entry.handle.hide();
            }
        }

        self.strip.activate(id);
        if let Some(entry) = self.tabs.get(id) {
            entry.handle.show();
        }

        tracing::debug!(tab_id = %id, "Activated tab");
        self.notify_active_changed();
        self.notify_tabs_changed();

        true
    }

    /// Load a resolved URL into the active tab. No-op without tabs.
    pub fn navigate(&mut self, url: &str) -> Result<()> {
        let Some(id) = self.strip.active().cloned() else {
            return Ok(());
        };

        let parsed = parse_url(url)?;
        let Some(entry) = self.tabs.get_mut(&id) else {
            return Ok(());
        };

        entry.tab.navigate(url.to_string())?;
        entry.handle.load(&parsed)?;

        tracing::info!(tab_id = %id, url = %url, "Navigating active tab");
        if let Some(observer) = &self.observer {
            observer.on_url_changed(&id, url);
        }

        Ok(())
    }

    /// Traverse the active tab's history back, if the engine reports an
    /// entry behind the cursor.
    pub fn go_back(&mut self) -> Result<()> {
        self.with_active_handle(|handle| {
            if handle.can_go_back() {
                handle.go_back()?;
            }
            Ok(())
        })
    }

    /// Traverse the active tab's history forward, if available.
    pub fn go_forward(&mut self) -> Result<()> {
        self.with_active_handle(|handle| {
            if handle.can_go_forward() {
                handle.go_forward()?;
            }
            Ok(())
        })
    }

    /// Unconditionally reload the active tab's document.
    pub fn reload(&mut self) -> Result<()> {
        self.with_active_handle(|handle| handle.reload())
    }

    /// True when the active tab can traverse back.
    pub fn can_go_back(&self) -> bool {
        self.active_handle().is_some_and(|h| h.can_go_back())
    }

    /// True when the active tab can traverse forward.
    pub fn can_go_forward(&self) -> bool {
        self.active_handle().is_some_and(|h| h.can_go_forward())
    }

    /// Entry point for engine callbacks marshaled by the shell. Events for
    /// ids that no longer resolve to a live tab are dropped.
    pub fn handle_engine_event(&mut self, id: &TabId, event: EngineEvent) {
        let Some(entry) = self.tabs.get_mut(id) else {
            tracing::debug!(tab_id = %id, "Dropping event for closed tab");
            return;
        };

        match event {
            EngineEvent::TitleChanged(title) => {
                entry.tab.set_title(title.clone());
                if let Some(observer) = &self.observer {
                    observer.on_title_changed(id, &title);
                }
            }
            EngineEvent::UrlChanged(url) => {
                entry.tab.set_url(url.clone());
                if let Some(observer) = &self.observer {
                    observer.on_url_changed(id, &url);
                }
            }
            EngineEvent::FaviconChanged(favicon_url) => {
                entry.tab.set_favicon(favicon_url.clone());
                if let Some(observer) = &self.observer {
                    observer.on_favicon_changed(id, favicon_url.as_deref());
                }
            }
            EngineEvent::LoadFinished(url) => {
                entry.tab.set_url(url);
                if let Some(observer) = &self.observer {
                    observer.on_tabs_changed();
                }
            }
        }
    }

    fn active_handle(&self) -> Option<&dyn EngineHandle> {
        self.strip
            .active()
            .and_then(|id| self.tabs.get(id))
            .map(|entry| entry.handle.as_ref())
    }

    fn with_active_handle<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&dyn EngineHandle) -> comet_engine::Result<()>,
    {
        match self.active_handle() {
            Some(handle) => Ok(f(handle)?),
            None => Ok(()),
        }
    }

    fn notify_active_changed(&self) {
        if let (Some(observer), Some(tab)) = (&self.observer, self.active_tab()) {
            observer.on_active_tab_changed(&tab);
        }
    }

    fn notify_tabs_changed(&self) {
        if let Some(observer) = &self.observer {
            observer.on_tabs_changed();
        }
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| SessionError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    const HOMEPAGE: &str = "https://www.google.com/";

    #[derive(Default)]
    struct CallLog(Mutex<Vec<String>>);

    impl CallLog {
        fn push(&self, call: impl Into<String>) {
            self.0.lock().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.0.lock().clone()
        }
    }

    struct MockEngine {
        tab_id: String,
        log: Arc<CallLog>,
        can_back: Arc<AtomicBool>,
        can_forward: Arc<AtomicBool>,
    }

    impl EngineHandle for MockEngine {
        fn load(&self, url: &Url) -> comet_engine::Result<()> {
            self.log.push(format!("load {} {}", self.tab_id, url));
            Ok(())
        }

        fn reload(&self) -> comet_engine::Result<()> {
            self.log.push(format!("reload {}", self.tab_id));
            Ok(())
        }

        fn can_go_back(&self) -> bool {
            self.can_back.load(Ordering::SeqCst)
        }

        fn can_go_forward(&self) -> bool {
            self.can_forward.load(Ordering::SeqCst)
        }

        fn go_back(&self) -> comet_engine::Result<()> {
            self.log.push(format!("back {}", self.tab_id));
            Ok(())
        }

        fn go_forward(&self) -> comet_engine::Result<()> {
            self.log.push(format!("forward {}", self.tab_id));
            Ok(())
        }

        fn current_url(&self) -> Option<Url> {
            None
        }

        fn current_title(&self) -> Option<String> {
            None
        }

        fn show(&self) {
            self.log.push(format!("show {}", self.tab_id));
        }

        fn hide(&self) {
            self.log.push(format!("hide {}", self.tab_id));
        }
    }

    struct MockFactory {
        log: Arc<CallLog>,
        can_back: Arc<AtomicBool>,
        can_forward: Arc<AtomicBool>,
    }

    impl MockFactory {
        fn new(log: Arc<CallLog>) -> Self {
            Self {
                log,
                can_back: Arc::new(AtomicBool::new(false)),
                can_forward: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl EngineFactory for MockFactory {
        fn create(
            &self,
            tab_id: &str,
            _config: &EngineConfig,
        ) -> comet_engine::Result<Box<dyn EngineHandle>> {
            Ok(Box::new(MockEngine {
                tab_id: tab_id.to_string(),
                log: Arc::clone(&self.log),
                can_back: Arc::clone(&self.can_back),
                can_forward: Arc::clone(&self.can_forward),
            }))
        }
    }

    fn session_with_log() -> (Session, Arc<CallLog>, Arc<AtomicBool>) {
        let log = Arc::new(CallLog::default());
        let factory = MockFactory::new(Arc::clone(&log));
        let can_back = Arc::clone(&factory.can_back);
        let session = Session::new(
            HOMEPAGE.to_string(),
            EngineConfig::default(),
            Box::new(factory),
        );
        (session, log, can_back)
    }

    #[test]
    fn test_open_tab_loads_homepage_and_activates() {
        let (mut session, log, _) = session_with_log();

        let tab = session.open_tab().unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.active_index(), Some(0));
        assert_eq!(tab.url, HOMEPAGE);

        let calls = log.calls();
        assert!(calls.contains(&format!("load {} {}", tab.id, HOMEPAGE)));
    }

    #[test]
    fn test_second_tab_becomes_active() {
        let (mut session, _, _) = session_with_log();

        let first = session.open_tab().unwrap();
        let second = session.open_tab().unwrap();

        assert_eq!(session.len(), 2);
        assert_eq!(session.active_index(), Some(1));
        assert_eq!(session.active_tab().unwrap().id, second.id);
        assert_eq!(session.position(&first.id), Some(0));
    }

    #[test]
    fn test_close_sole_tab_is_noop() {
        let (mut session, _, _) = session_with_log();

        let tab = session.open_tab().unwrap();
        assert!(!session.close_tab(&tab.id));
        assert_eq!(session.len(), 1);
        assert_eq!(session.active_index(), Some(0));
    }

    #[test]
    fn test_open_then_close_first_reindexes() {
        let (mut session, _, _) = session_with_log();

        let t0 = session.open_tab().unwrap();
        let t1 = session.open_tab().unwrap();
        assert_eq!(session.active_index(), Some(1));

        assert!(session.close_tab_at(0));
        assert_eq!(session.len(), 1);
        assert_eq!(session.position(&t1.id), Some(0));
        assert_eq!(session.active_index(), Some(0));
        assert!(session.tab(&t0.id).is_none());
    }

    #[test]
    fn test_close_active_selects_same_index() {
        let (mut session, _, _) = session_with_log();

        let _t0 = session.open_tab().unwrap();
        let t1 = session.open_tab().unwrap();
        let t2 = session.open_tab().unwrap();
        session.activate_tab(&t1.id);

        assert!(session.close_tab(&t1.id));
        assert_eq!(session.active_tab().unwrap().id, t2.id);
        assert_eq!(session.active_index(), Some(1));
    }

    #[test]
    fn test_navigate_dispatches_to_active_handle() {
        let (mut session, log, _) = session_with_log();

        let _t0 = session.open_tab().unwrap();
        let t1 = session.open_tab().unwrap();

        session.navigate("https://example.com/").unwrap();

        let calls = log.calls();
        assert!(calls.contains(&format!("load {} https://example.com/", t1.id)));
        assert_eq!(session.active_tab().unwrap().url, "https://example.com/");
    }

    #[test]
    fn test_navigate_without_tabs_is_noop() {
        let (mut session, log, _) = session_with_log();
        session.navigate("https://example.com/").unwrap();
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_go_back_respects_capability() {
        let (mut session, log, can_back) = session_with_log();
        let tab = session.open_tab().unwrap();

        session.go_back().unwrap();
        assert!(!log.calls().contains(&format!("back {}", tab.id)));

        can_back.store(true, Ordering::SeqCst);
        session.go_back().unwrap();
        assert!(log.calls().contains(&format!("back {}", tab.id)));
    }

    #[test]
    fn test_reload_is_unconditional() {
        let (mut session, log, _) = session_with_log();
        let tab = session.open_tab().unwrap();

        session.reload().unwrap();
        assert!(log.calls().contains(&format!("reload {}", tab.id)));
    }

    #[test]
    fn test_engine_events_update_metadata() {
        let (mut session, _, _) = session_with_log();
        let tab = session.open_tab().unwrap();

        session.handle_engine_event(&tab.id, EngineEvent::TitleChanged("Google".to_string()));
        session.handle_engine_event(
            &tab.id,
            EngineEvent::FaviconChanged(Some("https://www.google.com/favicon.ico".to_string())),
        );

        let tab = session.tab(&tab.id).unwrap();
        assert_eq!(tab.title, "Google");
        assert!(tab.favicon_url.is_some());
    }

    struct RecordingObserver(Arc<CallLog>);

    impl SessionObserver for RecordingObserver {
        fn on_title_changed(&self, id: &TabId, title: &str) {
            self.0.push(format!("title {} {}", id, title));
        }

        fn on_url_changed(&self, id: &TabId, url: &str) {
            self.0.push(format!("url {} {}", id, url));
        }

        fn on_favicon_changed(&self, id: &TabId, favicon_url: Option<&str>) {
            self.0
                .push(format!("favicon {} {:?}", id, favicon_url));
        }

        fn on_active_tab_changed(&self, tab: &Tab) {
            self.0.push(format!("active {}", tab.id));
        }

        fn on_tabs_changed(&self) {
            self.0.push("tabs-changed".to_string());
        }
    }

    #[test]
    fn test_events_for_closed_tab_are_dropped() {
        let (mut session, _, _) = session_with_log();
        let t0 = session.open_tab().unwrap();
        let t1 = session.open_tab().unwrap();

        let observed = Arc::new(CallLog::default());
        session.set_observer(Box::new(RecordingObserver(Arc::clone(&observed))));

        assert!(session.close_tab(&t0.id));
        let before = observed.calls().len();

        session.handle_engine_event(&t0.id, EngineEvent::TitleChanged("stale".to_string()));
        assert_eq!(observed.calls().len(), before);

        session.handle_engine_event(&t1.id, EngineEvent::TitleChanged("live".to_string()));
        assert!(observed
            .calls()
            .contains(&format!("title {} live", t1.id)));
    }

    #[test]
    fn test_activation_shows_and_hides_handles() {
        let (mut session, log, _) = session_with_log();
        let t0 = session.open_tab().unwrap();
        let t1 = session.open_tab().unwrap();

        session.activate_tab(&t0.id);

        let calls = log.calls();
        assert!(calls.contains(&format!("hide {}", t1.id)));
        // Shown once on open, once on re-activation.
        assert_eq!(
            calls.iter().filter(|c| **c == format!("show {}", t0.id)).count(),
            2
        );
    }
}
