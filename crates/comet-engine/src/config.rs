//! Engine capability configuration
//!
//! Every tab webview is created with the same fixed capability set and
//! user-agent string; there is no per-tab override surface.

use serde::{Deserialize, Serialize};

/// Fixed Chromium/Edge identity presented by every tab.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36 Edg/100.0.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Allow script execution in page content
    pub javascript_enabled: bool,
    /// Allow plugin-backed content
    pub plugins_enabled: bool,
    /// Allow pages to enter fullscreen
    pub fullscreen_enabled: bool,
    /// User-agent string sent with every request
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            plugins_enabled: true,
            fullscreen_enabled: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }
}
