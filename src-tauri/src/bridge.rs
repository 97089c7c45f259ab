//! Command bridge between the widget UI and the window manager.
//!
//! The webview gets exactly these commands and nothing else -- a
//! capability-restricted channel, not host access. Every command resolves
//! "which window issued this" from the calling webview window; none of them
//! take a window address as payload, so a window can only ever operate on
//! itself (or spawn fresh windows).
//!
//! Lifecycle commands are fire-and-forget: stale windows, unknown labels and
//! repeated requests all degrade to no-ops rather than surfacing errors to
//! the UI.

use tauri::{AppHandle, Manager, State, WebviewWindow};
use tokio::sync::oneshot;
use tracing::debug;

use tickdown_core::{parse_target, Event};

use crate::registry::WindowKind;
use crate::ticker::EngineCommand;
use crate::window::WindowManager;

/// Minimize the issuing window.
#[tauri::command]
pub fn cmd_minimize_window(window: WebviewWindow, manager: State<'_, WindowManager>) {
    manager.minimize_by_label(window.label());
}

/// Close the issuing window (and only that window).
#[tauri::command]
pub fn cmd_close_window(window: WebviewWindow, manager: State<'_, WindowManager>) {
    manager.close_by_label(window.label());
}

/// Spawn an additional countdown window. Repeatable; windows of the same
/// kind coexist.
#[tauri::command]
pub fn cmd_new_countdown(app: AppHandle) -> Result<(), String> {
    let manager = app.state::<WindowManager>();
    manager.create_window(WindowKind::Countdown).map(|_| ())
}

/// Spawn a fixed-clock window. Independent of countdown spawning and just
/// as repeatable.
#[tauri::command]
pub fn cmd_new_fixed_clock(app: AppHandle) -> Result<(), String> {
    let manager = app.state::<WindowManager>();
    manager.create_window(WindowKind::FixedClock).map(|_| ())
}

/// Assign (or clear) the issuing countdown's target instant.
///
/// Malformed input is treated as "no target set", never an error.
#[tauri::command]
pub async fn cmd_set_target(
    window: WebviewWindow,
    manager: State<'_, WindowManager>,
    target: Option<String>,
) -> Result<(), String> {
    let parsed = target.as_deref().and_then(parse_target);
    if target.is_some() && parsed.is_none() {
        debug!(window = %window.label(), "unparseable target input treated as no target");
    }
    if let Some(tx) = manager.engine_tx_for_label(window.label()) {
        let _ = tx.send(EngineCommand::SetTarget(parsed)).await;
    }
    Ok(())
}

/// Update the issuing countdown's title label.
#[tauri::command]
pub async fn cmd_set_title(
    window: WebviewWindow,
    manager: State<'_, WindowManager>,
    title: String,
) -> Result<(), String> {
    if let Some(tx) = manager.engine_tx_for_label(window.label()) {
        let _ = tx.send(EngineCommand::SetTitle(title)).await;
    }
    Ok(())
}

/// Current state snapshot for the issuing window, used for initial render.
#[tauri::command]
pub async fn cmd_snapshot(
    window: WebviewWindow,
    manager: State<'_, WindowManager>,
) -> Result<Event, String> {
    let tx = manager
        .engine_tx_for_label(window.label())
        .ok_or_else(|| "window is no longer registered".to_string())?;

    let (reply_tx, reply_rx) = oneshot::channel();
    tx.send(EngineCommand::Snapshot(reply_tx))
        .await
        .map_err(|_| "live-state task is gone".to_string())?;
    reply_rx
        .await
        .map_err(|_| "live-state task dropped the snapshot request".to_string())
}
