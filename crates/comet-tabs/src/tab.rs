//! Tab data structure
//!
//! One browsing context. The engine handle paired with a tab lives in the
//! session layer; this type only carries the metadata the shell displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TabError;
use crate::Result;

/// Stable tab identifier, valid from creation until close.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TabId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier
    pub id: TabId,
    /// Last requested or committed URL
    pub url: String,
    /// Page title, empty until the engine reports one
    pub title: String,
    /// Favicon URL if available
    pub favicon_url: Option<String>,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Tab {
    pub fn new(url: String) -> Result<Self> {
        if url.is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let now = Utc::now();

        Ok(Self {
            id: TabId::new(),
            url,
            title: String::new(),
            favicon_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update page title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Update favicon
    pub fn set_favicon(&mut self, url: Option<String>) {
        self.favicon_url = url;
        self.updated_at = Utc::now();
    }

    /// Update URL (navigation)
    pub fn navigate(&mut self, url: String) -> Result<()> {
        if url.is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        self.url = url;
        self.title = String::new(); // Reset title until page loads
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Record a URL change the engine committed (redirects, in-page)
    pub fn set_url(&mut self, url: String) {
        if self.url != url {
            self.url = url;
            self.updated_at = Utc::now();
        }
    }

    /// Check if tab is loading content
    pub fn is_loading(&self) -> bool {
        self.title.is_empty()
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}
