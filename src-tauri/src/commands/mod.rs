//! Tauri command surface for the toolbar UI

pub mod bookmarks;
pub mod navigation;
pub mod tabs;

/// Label of the toolbar UI webview inside a window.
pub fn ui_webview_label(window_label: &str) -> String {
    format!("ui-{}", window_label)
}
