//! Overlay window registry.
//!
//! Runtime state for the window lifecycle manager: one record per live
//! overlay window, keyed by a process-unique id. Registry membership is the
//! single source of truth for "is this window alive" -- windows are
//! intentionally unaware of each other and nothing here coordinates state
//! across them.
//!
//! The registry is generic over the native handle type so lifecycle rules
//! can be tested without a window system; the shell instantiates it with
//! `tauri::WebviewWindow`.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::mpsc::Sender;

use crate::ticker::EngineCommand;

/// Process-unique window identifier, assigned at creation.
pub type WindowId = u64;

/// The two overlay widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    Countdown,
    FixedClock,
}

impl WindowKind {
    /// Webview label prefix; the full label is `"{prefix}-{id}"`.
    pub fn label_prefix(self) -> &'static str {
        match self {
            WindowKind::Countdown => "countdown",
            WindowKind::FixedClock => "clock",
        }
    }

    /// Query-string value selecting this kind's view in the shared UI page.
    pub fn view_name(self) -> &'static str {
        match self {
            WindowKind::Countdown => "countdown",
            WindowKind::FixedClock => "fixed-clock",
        }
    }
}

/// Monotonic lifecycle of one window record. A record never re-enters
/// `Active` after it started closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Creating,
    Active,
    Closing,
    Closed,
}

/// One live overlay window.
///
/// `handle` is the exclusively-owned platform window; it leaves the registry
/// exactly once, when the record is finalized. `engine_tx` addresses the
/// window's live-state task; dropping the record drops the channel, which by
/// itself ends that task.
pub struct WindowRecord<H> {
    pub id: WindowId,
    pub kind: WindowKind,
    pub label: String,
    pub lifecycle: Lifecycle,
    pub handle: H,
    pub engine_tx: Option<Sender<EngineCommand>>,
}

/// Serializable record summary for diagnostics and shutdown logging.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSummary {
    pub id: WindowId,
    pub kind: WindowKind,
    pub label: String,
    pub lifecycle: Lifecycle,
}

/// Registry of live overlay windows, keyed by id.
///
/// All mutations happen behind the manager's mutex, so create/close requests
/// are serialized and no id is ever observed partially registered.
pub struct WindowRegistry<H> {
    next_id: WindowId,
    windows: HashMap<WindowId, WindowRecord<H>>,
}

impl<H> Default for WindowRegistry<H> {
    fn default() -> Self {
        Self {
            next_id: 1,
            windows: HashMap::new(),
        }
    }
}

impl<H> WindowRegistry<H> {
    /// Reserve the next process-unique id.
    pub fn allocate(&mut self) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a freshly built window. The record enters in `Creating`;
    /// the page-load event promotes it to `Active`.
    pub fn insert(&mut self, record: WindowRecord<H>) {
        debug_assert!(!self.windows.contains_key(&record.id));
        self.windows.insert(record.id, record);
    }

    pub fn id_for_label(&self, label: &str) -> Option<WindowId> {
        self.windows
            .values()
            .find(|r| r.label == label)
            .map(|r| r.id)
    }

    /// Promote `Creating -> Active` once the window content has loaded.
    /// Any other lifecycle stage is left alone -- the window may already be
    /// closing by the time its content finishes loading.
    pub fn mark_active(&mut self, id: WindowId) -> bool {
        match self.windows.get_mut(&id) {
            Some(record) if record.lifecycle == Lifecycle::Creating => {
                record.lifecycle = Lifecycle::Active;
                true
            }
            _ => false,
        }
    }

    /// Transition into `Closing` ahead of the native close request.
    /// Idempotent: a record that is already closing (or gone) yields `None`
    /// and the caller does nothing.
    pub fn begin_close(&mut self, id: WindowId) -> Option<&H> {
        match self.windows.get_mut(&id) {
            Some(record)
                if matches!(record.lifecycle, Lifecycle::Creating | Lifecycle::Active) =>
            {
                record.lifecycle = Lifecycle::Closing;
                Some(&record.handle)
            }
            _ => None,
        }
    }

    /// The native window was destroyed: mark `Closed` and remove the record.
    /// Returns the record so the caller can tear down its live-state task.
    /// Safe to call for labels the registry never held.
    pub fn finalize(&mut self, label: &str) -> Option<WindowRecord<H>> {
        let id = self.id_for_label(label)?;
        let mut record = self.windows.remove(&id)?;
        record.lifecycle = Lifecycle::Closed;
        Some(record)
    }

    pub fn handle_for(&self, id: WindowId) -> Option<&H> {
        self.windows.get(&id).map(|r| &r.handle)
    }

    /// Handle for a minimize request. Unknown or closing/closed ids yield
    /// `None`; the operation degrades to a no-op.
    pub fn minimize_target(&self, id: WindowId) -> Option<&H> {
        self.windows
            .get(&id)
            .filter(|r| r.lifecycle == Lifecycle::Active)
            .map(|r| &r.handle)
    }

    pub fn engine_tx(&self, id: WindowId) -> Option<Sender<EngineCommand>> {
        self.windows.get(&id).and_then(|r| r.engine_tx.clone())
    }

    /// Snapshot of currently active (or still-creating) windows. Used for
    /// diagnostics and shutdown only, never for cross-window coordination.
    pub fn list_active(&self) -> Vec<WindowSummary> {
        self.windows
            .values()
            .filter(|r| matches!(r.lifecycle, Lifecycle::Creating | Lifecycle::Active))
            .map(|r| WindowSummary {
                id: r.id,
                kind: r.kind,
                label: r.label.clone(),
                lifecycle: r.lifecycle,
            })
            .collect()
    }
}
