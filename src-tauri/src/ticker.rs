//! Per-window live-state tasks.
//!
//! Each overlay window owns exactly one task spawned here. The task owns
//! that window's engine value outright -- no state is shared across windows,
//! so a fault in one window's loop cannot disturb another's countdown.
//!
//! The loop is a cancellable repeating task: it sleeps for the engine's
//! current cadence (1 s for running countdowns, 60 s otherwise), recomputes,
//! and pushes a snapshot to the owning window only when the rendered output
//! changed. Commands arrive over an mpsc channel; `Shutdown` (or the channel
//! closing when the window record is dropped) ends the task and cancels the
//! next scheduled wake.

use chrono::{DateTime, Utc};
use tauri::{AppHandle, Emitter, EventTarget};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use tickdown_core::config::NotificationsConfig;
use tickdown_core::{CountdownEngine, Event, FixedClock};

use crate::alert;

/// Event channel name the widget UI listens on.
const LIVE_UPDATE: &str = "live-update";

/// Commands addressed to one window's live-state task.
///
/// Variants that do not apply to the window's kind (a clock has no target)
/// are ignored rather than rejected; command senders never need to care
/// which kind they are talking to.
#[derive(Debug)]
pub enum EngineCommand {
    SetTarget(Option<DateTime<Utc>>),
    SetTitle(String),
    SetCompact(bool),
    Snapshot(oneshot::Sender<Event>),
    Shutdown,
}

/// The engine value owned by one window's task.
pub enum LiveState {
    Countdown(CountdownEngine),
    Clock(FixedClock),
}

impl LiveState {
    fn display(&self, now: DateTime<Utc>) -> String {
        match self {
            LiveState::Countdown(engine) => engine.display(now),
            LiveState::Clock(clock) => clock.display(now),
        }
    }

    fn snapshot(&self, now: DateTime<Utc>) -> Event {
        match self {
            LiveState::Countdown(engine) => engine.snapshot(now),
            LiveState::Clock(clock) => clock.snapshot(now),
        }
    }

    fn tick_interval(&self) -> std::time::Duration {
        match self {
            LiveState::Countdown(engine) => engine.tick_interval(),
            LiveState::Clock(clock) => clock.tick_interval(),
        }
    }

    /// Advance the state machine. Only countdowns produce events.
    fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self {
            LiveState::Countdown(engine) => engine.tick(now),
            LiveState::Clock(_) => None,
        }
    }
}

/// Spawn the live-state task for one window. The returned sender is stored
/// in the window's registry record; dropping it ends the task.
pub fn spawn(
    app: AppHandle,
    label: String,
    mut state: LiveState,
    notifications: NotificationsConfig,
) -> mpsc::Sender<EngineCommand> {
    let (tx, mut rx) = mpsc::channel::<EngineCommand>(32);

    tauri::async_runtime::spawn(async move {
        let mut last_display: Option<String> = None;

        loop {
            let mut force_render = false;

            tokio::select! {
                cmd = rx.recv() => {
                    match cmd {
                        None | Some(EngineCommand::Shutdown) => break,
                        Some(EngineCommand::SetTarget(target)) => {
                            if let LiveState::Countdown(engine) = &mut state {
                                engine.set_target(target, Utc::now());
                                force_render = true;
                            }
                        }
                        Some(EngineCommand::SetTitle(title)) => {
                            if let LiveState::Countdown(engine) = &mut state {
                                engine.set_title(title);
                                force_render = true;
                            }
                        }
                        Some(EngineCommand::SetCompact(compact)) => {
                            if let LiveState::Countdown(engine) = &mut state {
                                force_render = engine.set_compact(compact);
                            }
                        }
                        Some(EngineCommand::Snapshot(reply)) => {
                            let _ = reply.send(state.snapshot(Utc::now()));
                            continue;
                        }
                    }
                }
                _ = tokio::time::sleep(state.tick_interval()) => {}
            }

            // Every failure below is confined to this tick: log it and let
            // the loop schedule its next wake normally.
            let now = Utc::now();

            if let Some(Event::CountdownElapsed { title, .. }) = state.tick(now) {
                let app = app.clone();
                let notifications = notifications.clone();
                // Fire-and-forget; the permission prompt may stall for as
                // long as the user pleases without touching this loop.
                tauri::async_runtime::spawn_blocking(move || {
                    alert::fire(&app, &title, &notifications);
                });
                force_render = true;
            }

            let display = state.display(now);
            if force_render || last_display.as_deref() != Some(display.as_str()) {
                last_display = Some(display);
                let event = state.snapshot(now);
                if let Err(e) =
                    app.emit_to(EventTarget::labeled(label.clone()), LIVE_UPDATE, &event)
                {
                    warn!(window = %label, error = %e, "failed to push live update");
                }
            }
        }

        debug!(window = %label, "live-state task ended");
    });

    tx
}
