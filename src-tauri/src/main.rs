// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Tickdown Desktop Application
//!
//! A Tauri-based desktop overlay utility: always-on-top countdown widgets
//! and a fixed-zone world clock, each an independent top-level window. The
//! GUI is a thin skin over the Rust core (tickdown-core); all window
//! lifecycle and timing state lives on this side of the bridge.

use tauri::{Manager, RunEvent, WindowEvent};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod alert;
mod bridge;
mod effects;
mod hotkeys;
mod registry;
mod ticker;
mod window;

use registry::WindowKind;
use window::WindowManager;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = tickdown_core::Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        tickdown_core::Config::default()
    });

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(move |app| {
            app.manage(WindowManager::new(app.handle().clone(), config));
            let manager = app.state::<WindowManager>();

            hotkeys::register(app.handle(), manager.shortcut_binding());

            // First countdown window. A construction failure is fatal to
            // this one request, not to the app.
            if let Err(e) = manager.create_window(WindowKind::Countdown) {
                error!(error = %e, "failed to create initial countdown window");
            }
            Ok(())
        })
        .on_page_load(|webview, payload| {
            if matches!(payload.event(), tauri::webview::PageLoadEvent::Finished) {
                let manager = webview.state::<WindowManager>();
                manager.on_content_loaded(webview.label());
            }
        })
        .on_window_event(|window, event| {
            let manager = window.state::<WindowManager>();
            match event {
                WindowEvent::CloseRequested { .. } => {
                    manager.note_close_requested(window.label());
                }
                WindowEvent::Destroyed => {
                    manager.finalize(window.label());
                }
                WindowEvent::Resized(size) => {
                    let scale = window.scale_factor().unwrap_or(1.0);
                    manager.handle_resize(window.label(), *size, scale);
                }
                _ => {}
            }
        })
        .invoke_handler(tauri::generate_handler![
            bridge::cmd_minimize_window,
            bridge::cmd_close_window,
            bridge::cmd_new_countdown,
            bridge::cmd_new_fixed_clock,
            bridge::cmd_set_target,
            bridge::cmd_set_title,
            bridge::cmd_snapshot,
        ])
        .build(tauri::generate_context!())
        .unwrap_or_else(|e| {
            eprintln!("Tauri application error: {}", e);
            std::process::exit(1);
        });

    app.run(|app, event| match event {
        // The last window closing ends the process everywhere except macOS,
        // where the app stays resident with zero windows until quit.
        #[cfg(target_os = "macos")]
        RunEvent::ExitRequested { api, code, .. } => {
            if code.is_none() {
                api.prevent_exit();
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            let manager = app.state::<WindowManager>();
            if manager.list_active().is_empty() {
                if let Err(e) = manager.create_window(WindowKind::Countdown) {
                    error!(error = %e, "failed to create countdown window on reopen");
                }
            }
        }
        RunEvent::Exit => {
            let remaining = app.state::<WindowManager>().list_active();
            if !remaining.is_empty() {
                let summary = serde_json::to_string(&remaining).unwrap_or_default();
                info!(windows = %summary, "exiting with live windows");
            }
            hotkeys::unregister_all(app);
        }
        _ => {}
    });
}
