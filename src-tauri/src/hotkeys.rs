//! Global hotkey registration.
//!
//! One process-wide shortcut, bound at startup from config, spawning a new
//! countdown window. Unregistered (best-effort) before the process exits so
//! the OS-level reservation is not leaked.

use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};
use tracing::{error, info, warn};

use crate::registry::WindowKind;
use crate::window::WindowManager;

/// Register the new-countdown shortcut. An unparseable or conflicting
/// binding is logged and skipped; the rest of the app works without it.
pub fn register(app: &AppHandle, binding: &str) {
    let shortcut = match binding.parse::<Shortcut>() {
        Ok(shortcut) => shortcut,
        Err(e) => {
            warn!(hotkey = %binding, error = %e, "invalid shortcut binding in config");
            return;
        }
    };

    let result = app
        .global_shortcut()
        .on_shortcut(shortcut, move |app, _shortcut, event| {
            if event.state() == ShortcutState::Pressed {
                let manager = app.state::<WindowManager>();
                if let Err(e) = manager.create_window(WindowKind::Countdown) {
                    error!(error = %e, "hotkey-triggered window creation failed");
                }
            }
        });

    match result {
        Ok(()) => info!(hotkey = %binding, "registered new-countdown hotkey"),
        Err(e) => error!(hotkey = %binding, error = %e, "failed to register hotkey"),
    }
}

/// Drop every shortcut this process registered. Best-effort: failure is
/// logged and never blocks termination.
pub fn unregister_all(app: &AppHandle) {
    if let Err(e) = app.global_shortcut().unregister_all() {
        warn!(error = %e, "failed to unregister global shortcuts");
    }
}
