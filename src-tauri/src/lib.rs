//! Comet Browser - Tauri Application
//!
//! The Window Shell: builds the window and the toolbar UI webview, owns the
//! `Browser` value, and exposes the command surface the toolbar calls. Tab
//! content renders in per-tab child webviews built by `WebviewFactory`.

mod commands;
mod engine;
mod state;

use engine::{WebviewFactory, TOOLBAR_HEIGHT};
use state::{AppState, ShellObserver};

use comet_core::{Browser, Config};
use tauri::webview::WebviewBuilder;
use tauri::window::WindowBuilder;
use tauri::{LogicalPosition, LogicalSize, Manager, WebviewUrl};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    comet_core::init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config = Config::from_env();
            let window_label = "main";

            let window = WindowBuilder::new(app, window_label)
                .title("Comet")
                .inner_size(config.window_width, config.window_height)
                .min_inner_size(640.0, 480.0)
                .center()
                .build()?;

            // Toolbar UI webview occupies the strip above the content area.
            let ui_label = commands::ui_webview_label(window_label);
            let ui_builder = WebviewBuilder::new(&ui_label, WebviewUrl::App("index.html".into()))
                .enable_clipboard_access();

            let ui_webview = window.add_child(
                ui_builder,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(config.window_width, TOOLBAR_HEIGHT),
            )?;
            let _ = ui_webview.show();

            // Keep the toolbar spanning the window width on resize; content
            // webviews track the window through auto_resize.
            let app_handle = app.handle().clone();
            window.on_window_event(move |event| {
                if let tauri::WindowEvent::Resized(_) = event {
                    let Some(win) = app_handle.get_window("main") else {
                        return;
                    };
                    let (Ok(size), Ok(factor)) = (win.inner_size(), win.scale_factor()) else {
                        return;
                    };
                    let width = size.width as f64 / factor;
                    if let Some(ui) = app_handle.get_webview(&commands::ui_webview_label("main")) {
                        let _ = ui.set_size(LogicalSize::new(width, TOOLBAR_HEIGHT));
                    }
                }
            });

            // The browser value is owned here and injected into Tauri state;
            // no globals.
            let factory = WebviewFactory::new(app.handle().clone(), window_label);
            let browser = Browser::new(config, Box::new(factory));
            browser.set_observer(Box::new(ShellObserver::new(
                app.handle().clone(),
                window_label,
            )));

            app.manage(AppState::new(browser.clone()));

            // Exactly one initial tab, loaded with the homepage.
            browser.initialize()?;

            tracing::info!("Comet browser started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Tab commands
            commands::tabs::open_tab,
            commands::tabs::close_tab,
            commands::tabs::close_tab_at,
            commands::tabs::activate_tab,
            commands::tabs::get_tabs,
            commands::tabs::get_active_tab,
            // Navigation commands
            commands::navigation::navigate,
            commands::navigation::resolve_input,
            commands::navigation::go_back,
            commands::navigation::go_forward,
            commands::navigation::reload,
            commands::navigation::nav_state,
            // Bookmark commands
            commands::bookmarks::add_bookmark,
            commands::bookmarks::bookmark_active_tab,
            commands::bookmarks::get_bookmarks,
            commands::bookmarks::open_bookmark,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Comet browser");
}
