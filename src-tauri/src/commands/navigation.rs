//! Navigation and address bar commands

use serde::{Deserialize, Serialize};
use tauri::State;

use comet_core::InputResolution;

use super::tabs::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum InputResolutionResult {
    Navigate(String),
    Search(String),
}

impl From<InputResolution> for InputResolutionResult {
    fn from(resolution: InputResolution) -> Self {
        match resolution {
            InputResolution::Navigate(url) => InputResolutionResult::Navigate(url),
            InputResolution::Search(url) => InputResolutionResult::Search(url),
        }
    }
}

/// Back/forward availability for toolbar button state.
#[derive(Debug, Serialize, Deserialize)]
pub struct NavState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

fn nav_state_of(state: &State<AppState>) -> NavState {
    NavState {
        can_go_back: state.browser().can_go_back(),
        can_go_forward: state.browser().can_go_forward(),
    }
}

#[tauri::command]
pub fn resolve_input(
    state: State<AppState>,
    input: String,
) -> CommandResult<InputResolutionResult> {
    CommandResult::ok(state.browser().resolve_input(&input).into())
}

#[tauri::command]
pub fn navigate(state: State<AppState>, input: String) -> CommandResult<InputResolutionResult> {
    match state.browser().navigate(&input) {
        Ok(resolution) => CommandResult::ok(resolution.into()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn go_back(state: State<AppState>) -> CommandResult<NavState> {
    match state.browser().go_back() {
        Ok(()) => CommandResult::ok(nav_state_of(&state)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn go_forward(state: State<AppState>) -> CommandResult<NavState> {
    match state.browser().go_forward() {
        Ok(()) => CommandResult::ok(nav_state_of(&state)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn reload(state: State<AppState>) -> CommandResult<()> {
    match state.browser().reload() {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn nav_state(state: State<AppState>) -> CommandResult<NavState> {
    CommandResult::ok(nav_state_of(&state))
}
