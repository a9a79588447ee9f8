//! Bookmark commands
//!
//! Bookmarks are in-memory only and permit duplicates; each command returns
//! the full ordered list so the UI can redraw its menu in one step.

use serde::{Deserialize, Serialize};
use tauri::State;

use comet_core::Bookmark;

use super::tabs::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct BookmarkInfo {
    pub title: String,
    pub url: String,
}

impl From<Bookmark> for BookmarkInfo {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            title: bookmark.title,
            url: bookmark.url,
        }
    }
}

fn all_bookmarks(state: &State<AppState>) -> Vec<BookmarkInfo> {
    state
        .browser()
        .get_bookmarks()
        .into_iter()
        .map(BookmarkInfo::from)
        .collect()
}

#[tauri::command]
pub fn add_bookmark(
    state: State<AppState>,
    title: String,
    url: String,
) -> CommandResult<Vec<BookmarkInfo>> {
    state.browser().add_bookmark(title, url);
    CommandResult::ok(all_bookmarks(&state))
}

/// Bookmark the active tab under its current title.
#[tauri::command]
pub fn bookmark_active_tab(state: State<AppState>) -> CommandResult<Vec<BookmarkInfo>> {
    state.browser().bookmark_active_tab();
    CommandResult::ok(all_bookmarks(&state))
}

#[tauri::command]
pub fn get_bookmarks(state: State<AppState>) -> CommandResult<Vec<BookmarkInfo>> {
    CommandResult::ok(all_bookmarks(&state))
}

/// Navigate the active tab to a bookmarked URL.
#[tauri::command]
pub fn open_bookmark(state: State<AppState>, url: String) -> CommandResult<()> {
    match state.browser().open_bookmark(&url) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
