//! Tab management commands
use serde::{Deserialize, Serialize};
use tauri::State;

use comet_core::{Tab, TabId};

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: String,
    pub url: String,
    pub title: String,
    pub favicon_url: Option<String>,
    pub is_loading: bool,
    pub is_active: bool,
}

impl From<Tab> for TabInfo {
    fn from(tab: Tab) -> Self {
        let is_loading = tab.is_loading();
        Self {
            id: tab.id.to_string(),
            url: tab.url,
            title: tab.title,
            favicon_url: tab.favicon_url,
            is_loading,
            is_active: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[tauri::command]
pub fn open_tab(state: State<AppState>) -> CommandResult<TabInfo> {
    match state.browser().open_tab() {
        Ok(tab) => {
            let mut info = TabInfo::from(tab);
            info.is_active = true;
            CommandResult::ok(info)
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn close_tab(state: State<AppState>, tab_id: String) -> CommandResult<bool> {
    CommandResult::ok(state.browser().close_tab(&TabId::from(tab_id)))
}

#[tauri::command]
pub fn close_tab_at(state: State<AppState>, index: usize) -> CommandResult<bool> {
    CommandResult::ok(state.browser().close_tab_at(index))
}

#[tauri::command]
pub fn activate_tab(state: State<AppState>, tab_id: String) -> CommandResult<bool> {
    CommandResult::ok(state.browser().activate_tab(&TabId::from(tab_id)))
}

#[tauri::command]
pub fn get_tabs(state: State<AppState>) -> CommandResult<Vec<TabInfo>> {
    let browser = state.browser();
    let active_id = browser.get_active_tab().map(|tab| tab.id);

    let tabs = browser
        .get_tabs()
        .into_iter()
        .map(|tab| {
            let is_active = active_id.as_ref() == Some(&tab.id);
            let mut info = TabInfo::from(tab);
            info.is_active = is_active;
            info
        })
        .collect();

    CommandResult::ok(tabs)
}

#[tauri::command]
pub fn get_active_tab(state: State<AppState>) -> CommandResult<Option<TabInfo>> {
    let info = state.browser().get_active_tab().map(|tab| {
        let mut info = TabInfo::from(tab);
        info.is_active = true;
        info
    });
    CommandResult::ok(info)
}
