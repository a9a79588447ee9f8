//! In-memory bookmarks
//!
//! Insertion-ordered, duplicates permitted, gone on exit. Self-contained so
//! a storage layer could be slotted in without touching the session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    entries: Vec<Bookmark>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bookmark. Whitespace-only URLs are refused (returns false);
    /// duplicates are not.
    pub fn add(&mut self, title: impl Into<String>, url: impl Into<String>) -> bool {
        let url = url.into();
        if url.trim().is_empty() {
            return false;
        }

        let title = title.into();
        tracing::debug!(url = %url, "Added bookmark");
        self.entries.push(Bookmark {
            title: if title.trim().is_empty() {
                url.clone()
            } else {
                title
            },
            url,
        });
        true
    }

    /// Entries in insertion order, for menu rendering.
    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
