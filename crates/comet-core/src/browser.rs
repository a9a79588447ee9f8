//! Main browser state container
//!
//! One `Browser` per window, owned by the Window Shell. All state flows
//! through here; the webviews are purely renderers.

use parking_lot::RwLock;
use std::sync::Arc;

use comet_engine::{EngineEvent, EngineFactory};
use comet_navigation::{InputResolution, InputResolver};
use comet_session::{Session, SessionObserver};
use comet_tabs::{Tab, TabId};

use crate::bookmarks::{Bookmark, Bookmarks};
use crate::config::Config;
use crate::Result;

pub struct Browser {
    /// Configuration
    config: Config,
    /// Tab session manager
    session: Arc<RwLock<Session>>,
    /// Input resolver for the address bar
    input_resolver: Arc<RwLock<InputResolver>>,
    /// In-memory bookmarks
    bookmarks: Arc<RwLock<Bookmarks>>,
}

impl Browser {
    pub fn new(config: Config, factory: Box<dyn EngineFactory>) -> Self {
        let session = Session::new(
            config.homepage.clone(),
            config.engine_config(),
            factory,
        );

        Self {
            config,
            session: Arc::new(RwLock::new(session)),
            input_resolver: Arc::new(RwLock::new(InputResolver::new())),
            bookmarks: Arc::new(RwLock::new(Bookmarks::new())),
        }
    }

    /// Open the startup tab. Idempotent: a non-empty session is left alone.
    pub fn initialize(&self) -> Result<Tab> {
        let mut session = self.session.write();
        if let Some(tab) = session.active_tab() {
            return Ok(tab);
        }

        let tab = session.open_tab()?;
        tracing::info!(homepage = %self.config.homepage, "Browser initialized");
        Ok(tab)
    }

    pub fn set_observer(&self, observer: Box<dyn SessionObserver>) {
        self.session.write().set_observer(observer);
    }

    // === Tab operations ===

    pub fn open_tab(&self) -> Result<Tab> {
        Ok(self.session.write().open_tab()?)
    }

    pub fn close_tab(&self, id: &TabId) -> bool {
        self.session.write().close_tab(id)
    }

    pub fn close_tab_at(&self, index: usize) -> bool {
        self.session.write().close_tab_at(index)
    }

    pub fn activate_tab(&self, id: &TabId) -> bool {
        self.session.write().activate_tab(id)
    }

    pub fn get_tabs(&self) -> Vec<Tab> {
        self.session.read().tabs()
    }

    pub fn get_active_tab(&self) -> Option<Tab> {
        self.session.read().active_tab()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.session.read().active_index()
    }

    // === Navigation operations ===

    /// Resolve address-bar input without acting on it.
    pub fn resolve_input(&self, input: &str) -> InputResolution {
        self.input_resolver.read().resolve(input)
    }

    /// Resolve address-bar input and load it into the active tab.
    pub fn navigate(&self, input: &str) -> Result<InputResolution> {
        let resolution = self.resolve_input(input);
        self.session.write().navigate(resolution.url())?;
        Ok(resolution)
    }

    /// Load an already-resolved URL into the active tab.
    pub fn navigate_url(&self, url: &str) -> Result<()> {
        Ok(self.session.write().navigate(url)?)
    }

    pub fn go_back(&self) -> Result<()> {
        Ok(self.session.write().go_back()?)
    }

    pub fn go_forward(&self) -> Result<()> {
        Ok(self.session.write().go_forward()?)
    }

    pub fn reload(&self) -> Result<()> {
        Ok(self.session.write().reload()?)
    }

    pub fn can_go_back(&self) -> bool {
        self.session.read().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.session.read().can_go_forward()
    }

    /// Marshaled engine callback entry point.
    pub fn handle_engine_event(&self, id: &TabId, event: EngineEvent) {
        self.session.write().handle_engine_event(id, event);
    }

    // === Bookmark operations ===

    pub fn add_bookmark(&self, title: String, url: String) -> bool {
        self.bookmarks.write().add(title, url)
    }

    /// Bookmark the active tab under its current title.
    pub fn bookmark_active_tab(&self) -> bool {
        match self.get_active_tab() {
            Some(tab) => self
                .bookmarks
                .write()
                .add(tab.display_title().to_string(), tab.url),
            None => false,
        }
    }

    pub fn get_bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks.read().entries().to_vec()
    }

    /// Navigate the active tab to a bookmarked URL.
    pub fn open_bookmark(&self, url: &str) -> Result<()> {
        self.navigate_url(url)
    }

    // === Config ===

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Clone for Browser {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            session: Arc::clone(&self.session),
            input_resolver: Arc::clone(&self.input_resolver),
            bookmarks: Arc::clone(&self.bookmarks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comet_engine::{EngineConfig, EngineError, EngineHandle};
    use parking_lot::Mutex;
    use url::Url;

    #[derive(Default)]
    struct NullEngine {
        loads: Mutex<Vec<String>>,
    }

    struct SharedEngine(Arc<NullEngine>);

    impl EngineHandle for SharedEngine {
        fn load(&self, url: &Url) -> std::result::Result<(), EngineError> {
            self.0.loads.lock().push(url.to_string());
            Ok(())
        }

        fn reload(&self) -> std::result::Result<(), EngineError> {
            Ok(())
        }

        fn can_go_back(&self) -> bool {
            false
        }

        fn can_go_forward(&self) -> bool {
            false
        }

        fn go_back(&self) -> std::result::Result<(), EngineError> {
            Ok(())
        }

        fn go_forward(&self) -> std::result::Result<(), EngineError> {
            Ok(())
        }

        fn current_url(&self) -> Option<Url> {
            None
        }

        fn current_title(&self) -> Option<String> {
            None
        }

        fn show(&self) {}

        fn hide(&self) {}
    }

    struct NullFactory(Arc<NullEngine>);

    impl EngineFactory for NullFactory {
        fn create(
            &self,
            _tab_id: &str,
            _config: &EngineConfig,
        ) -> std::result::Result<Box<dyn EngineHandle>, EngineError> {
            Ok(Box::new(SharedEngine(Arc::clone(&self.0))))
        }
    }

    fn test_browser() -> (Browser, Arc<NullEngine>) {
        let engine = Arc::new(NullEngine::default());
        let browser = Browser::new(
            Config::default(),
            Box::new(NullFactory(Arc::clone(&engine))),
        );
        (browser, engine)
    }

    #[test]
    fn test_initialize_opens_exactly_one_tab() {
        let (browser, _) = test_browser();

        let tab = browser.initialize().unwrap();
        assert_eq!(tab.url, browser.config().homepage);
        assert_eq!(browser.get_tabs().len(), 1);

        // Second call is a no-op.
        let again = browser.initialize().unwrap();
        assert_eq!(again.id, tab.id);
        assert_eq!(browser.get_tabs().len(), 1);
    }

    #[test]
    fn test_navigate_resolves_bare_host() {
        let (browser, engine) = test_browser();
        browser.initialize().unwrap();

        let resolution = browser.navigate("example.com").unwrap();
        assert!(matches!(resolution, InputResolution::Navigate(_)));
        assert!(engine
            .loads
            .lock()
            .iter()
            .any(|u| u.starts_with("https://example.com")));
    }

    #[test]
    fn test_bookmarks_allow_duplicates() {
        let (browser, _) = test_browser();

        assert!(browser.add_bookmark("X".into(), "https://x.test".into()));
        assert!(browser.add_bookmark("X".into(), "https://x.test".into()));
        assert_eq!(browser.get_bookmarks().len(), 2);
    }

    #[test]
    fn test_bookmark_active_tab_uses_display_title() {
        let (browser, _) = test_browser();
        let tab = browser.initialize().unwrap();

        browser.handle_engine_event(&tab.id, EngineEvent::TitleChanged("Google".to_string()));
        assert!(browser.bookmark_active_tab());

        let bookmarks = browser.get_bookmarks();
        assert_eq!(bookmarks[0].title, "Google");
        assert_eq!(bookmarks[0].url, browser.config().homepage);
    }
}
