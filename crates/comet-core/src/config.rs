//! Browser configuration

use serde::{Deserialize, Serialize};

use comet_engine::{EngineConfig, DEFAULT_USER_AGENT};

pub const DEFAULT_HOMEPAGE: &str = "https://www.google.com/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL loaded into every new tab
    pub homepage: String,
    /// User-agent presented by every tab
    pub user_agent: String,
    /// Initial window size
    pub window_width: f64,
    pub window_height: f64,
}

impl Config {
    /// Defaults, with the homepage overridable through `COMET_HOMEPAGE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(homepage) = std::env::var("COMET_HOMEPAGE") {
            let homepage = homepage.trim().to_string();
            if !homepage.is_empty() {
                config.homepage = homepage;
            }
        }
        config
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_user_agent(self.user_agent.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_width: 800.0,
            window_height: 600.0,
        }
    }
}
