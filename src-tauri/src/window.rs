//! Window lifecycle manager.
//!
//! Creates, tracks, and tears down the overlay widget windows. Every window
//! is created with the same overlay invariants: no decorations, transparent
//! background, always on top, no shadow, visible on all workspaces including
//! full-screen spaces. Multiple windows of the same kind are expected and
//! supported; records are keyed by id, never by kind.

use std::sync::Mutex;

use chrono_tz::Tz;
use tauri::{AppHandle, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use tracing::{debug, info, warn};

use tickdown_core::{Config, CountdownEngine, FixedClock};

use crate::effects::{EffectApplier, EffectOptions};
use crate::registry::{
    Lifecycle, WindowId, WindowKind, WindowRecord, WindowRegistry, WindowSummary,
};
use crate::ticker::{self, EngineCommand, LiveState};

/// Logical size below which a countdown window switches to compact layout
/// (the target-date input is hidden, nothing else changes).
const COMPACT_WIDTH: f64 = 280.0;
const COMPACT_HEIGHT: f64 = 200.0;

/// Process-wide owner of the overlay window registry.
///
/// Held in Tauri managed state and passed by handle to everything that
/// creates or closes windows; there is no ambient/global registry access.
pub struct WindowManager {
    app: AppHandle,
    config: Config,
    clock_zone: Tz,
    effects: EffectApplier,
    registry: Mutex<WindowRegistry<WebviewWindow>>,
}

impl WindowManager {
    pub fn new(app: AppHandle, config: Config) -> Self {
        let clock_zone = config.clock.time_zone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                zone = %config.clock.time_zone,
                "unknown clock time zone in config, falling back to America/Los_Angeles"
            );
            chrono_tz::America::Los_Angeles
        });
        Self {
            app,
            config,
            clock_zone,
            effects: EffectApplier::detect(),
            registry: Mutex::new(WindowRegistry::default()),
        }
    }

    pub fn shortcut_binding(&self) -> &str {
        &self.config.shortcuts.new_countdown
    }

    /// Create a new overlay window of the given kind and register it.
    ///
    /// Construction failure is fatal to this request only: it is reported to
    /// the caller and no record is registered; already-active windows are
    /// untouched.
    pub fn create_window(&self, kind: WindowKind) -> Result<WindowId, String> {
        // Reserve the id up front, but do not hold the registry lock across
        // native window construction: the platform may dispatch window
        // events on this thread before `build` returns.
        let id = self
            .registry
            .lock()
            .expect("window registry poisoned")
            .allocate();
        let label = format!("{}-{}", kind.label_prefix(), id);

        let (width, height) = match kind {
            WindowKind::Countdown => (
                self.config.window.countdown_width,
                self.config.window.countdown_height,
            ),
            WindowKind::FixedClock => (
                self.config.window.clock_width,
                self.config.window.clock_height,
            ),
        };

        let url = WebviewUrl::App(format!("index.html?view={}", kind.view_name()).into());
        let window = WebviewWindowBuilder::new(&self.app, &label, url)
            .inner_size(width, height)
            .decorations(false)
            .transparent(true)
            .always_on_top(true)
            .shadow(false)
            .resizable(true)
            .visible_on_all_workspaces(true)
            .build()
            .map_err(|e| {
                warn!(window = %label, error = %e, "window construction failed");
                e.to_string()
            })?;

        let state = match kind {
            WindowKind::Countdown => LiveState::Countdown(CountdownEngine::new()),
            WindowKind::FixedClock => LiveState::Clock(FixedClock::new(self.clock_zone)),
        };
        let engine_tx = ticker::spawn(
            self.app.clone(),
            label.clone(),
            state,
            self.config.notifications.clone(),
        );

        let mut registry = self.registry.lock().expect("window registry poisoned");
        registry.insert(WindowRecord {
            id,
            kind,
            label: label.clone(),
            lifecycle: Lifecycle::Creating,
            handle: window,
            engine_tx: Some(engine_tx),
        });
        info!(window = %label, ?kind, "created overlay window");
        Ok(id)
    }

    /// The window's content finished loading: promote it to `Active` and
    /// hand it to the cosmetic collaborator. Effects are strictly optional;
    /// their absence or failure never blocks the window.
    pub fn on_content_loaded(&self, label: &str) {
        let handle = {
            let mut registry = self.registry.lock().expect("window registry poisoned");
            let Some(id) = registry.id_for_label(label) else {
                return;
            };
            if !registry.mark_active(id) {
                return;
            }
            registry.handle_for(id).cloned()
        };
        if let Some(window) = handle {
            self.effects.apply(&window, &EffectOptions::default());
        }
    }

    /// Request a native close for the issuing window. Idempotent; stale
    /// labels are no-ops.
    pub fn close_by_label(&self, label: &str) {
        let handle = {
            let mut registry = self.registry.lock().expect("window registry poisoned");
            let Some(id) = registry.id_for_label(label) else {
                debug!(window = %label, "close requested for unknown window");
                return;
            };
            registry.begin_close(id).cloned()
        };
        if let Some(window) = handle {
            if let Err(e) = window.close() {
                warn!(window = %label, error = %e, "native close request failed");
            }
        }
    }

    /// A close arrived from the platform (title-bar-less windows still get
    /// OS closes); record the transition so the lifecycle stays monotonic.
    pub fn note_close_requested(&self, label: &str) {
        let mut registry = self.registry.lock().expect("window registry poisoned");
        if let Some(id) = registry.id_for_label(label) {
            registry.begin_close(id);
        }
    }

    /// Minimize the issuing window. Unknown or closing ids degrade to
    /// no-ops; this never errors across the bridge.
    pub fn minimize_by_label(&self, label: &str) {
        let handle = {
            let registry = self.registry.lock().expect("window registry poisoned");
            registry
                .id_for_label(label)
                .and_then(|id| registry.minimize_target(id))
                .cloned()
        };
        match handle {
            Some(window) => {
                if let Err(e) = window.minimize() {
                    warn!(window = %label, error = %e, "minimize failed");
                }
            }
            None => debug!(window = %label, "minimize for stale window ignored"),
        }
    }

    /// The native window is gone: drop the record and stop its live-state
    /// task, cancelling any scheduled wake. Safe for unknown labels and for
    /// repeated destruction events.
    pub fn finalize(&self, label: &str) {
        let record = {
            let mut registry = self.registry.lock().expect("window registry poisoned");
            registry.finalize(label)
        };
        if let Some(record) = record {
            if let Some(tx) = &record.engine_tx {
                let _ = tx.try_send(EngineCommand::Shutdown);
            }
            info!(window = %label, "window closed and deregistered");
        }
    }

    /// Derive the compact-layout flag from the new size and push it to the
    /// window's engine.
    pub fn handle_resize(&self, label: &str, size: tauri::PhysicalSize<u32>, scale: f64) {
        let tx = {
            let registry = self.registry.lock().expect("window registry poisoned");
            registry
                .id_for_label(label)
                .and_then(|id| registry.engine_tx(id))
        };
        let Some(tx) = tx else { return };

        let logical = size.to_logical::<f64>(scale);
        let compact = logical.width < COMPACT_WIDTH || logical.height < COMPACT_HEIGHT;
        let _ = tx.try_send(EngineCommand::SetCompact(compact));
    }

    /// Command channel for the issuing window's engine, if it is still
    /// alive.
    pub fn engine_tx_for_label(
        &self,
        label: &str,
    ) -> Option<tokio::sync::mpsc::Sender<EngineCommand>> {
        let registry = self.registry.lock().expect("window registry poisoned");
        registry
            .id_for_label(label)
            .and_then(|id| registry.engine_tx(id))
    }

    /// Snapshot of live windows, for diagnostics and shutdown logging.
    pub fn list_active(&self) -> Vec<WindowSummary> {
        self.registry
            .lock()
            .expect("window registry poisoned")
            .list_active()
    }
}
