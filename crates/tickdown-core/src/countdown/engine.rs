//! Countdown engine implementation.
//!
//! The countdown engine is a wall-clock-based state machine. It does not use
//! internal threads or timers - the caller is responsible for calling
//! `tick()` periodically with the current instant.
//!
//! ## State Transitions
//!
//! ```text
//! Pending -> Running -> Elapsed
//!    ^          ^          |
//!    |          +----------+  (new target assignment)
//!    +---------------------+  (target cleared)
//! ```
//!
//! Remaining time is always recomputed as `target - now`, never accumulated
//! incrementally, so a window that was suspended or backgrounded catches up
//! correctly on its next tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::format::{self, NO_TARGET};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    /// No target assigned. Displays the degenerate `"0m 0s"`.
    Pending,
    /// Target assigned and not yet reached.
    Running,
    /// Target reached. Left only by assigning a new target.
    Elapsed,
}

/// Core countdown engine, one instance per countdown window.
///
/// Operates on wall-clock instants passed in by the caller -- no internal
/// thread. State is owned by exactly one window and dies with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    target: Option<DateTime<Utc>>,
    title: String,
    state: CountdownState,
    /// Set true exactly once when the countdown first reaches zero.
    /// Monotonic between target assignments.
    completed: bool,
    /// Guards the one-shot completion alert per target assignment.
    alert_fired: bool,
    /// Window is below the compact-layout threshold. Presentation state
    /// co-located here; never affects timing.
    #[serde(default)]
    compact: bool,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownEngine {
    /// Create a new engine with no target assigned.
    pub fn new() -> Self {
        Self {
            target: None,
            title: String::new(),
            state: CountdownState::Pending,
            completed: false,
            alert_fired: false,
            compact: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    /// The display string for the given instant. Pure; does not transition
    /// state or arm the alert -- that is `tick()`'s job.
    pub fn display(&self, now: DateTime<Utc>) -> String {
        match self.target {
            None => NO_TARGET.to_string(),
            Some(target) => format::format_remaining(target - now),
        }
    }

    /// How long the owning tick loop should sleep before the next
    /// recomputation: sub-minute precision only while running.
    pub fn tick_interval(&self) -> std::time::Duration {
        match self.state {
            CountdownState::Running => std::time::Duration::from_secs(1),
            CountdownState::Pending | CountdownState::Elapsed => {
                std::time::Duration::from_secs(60)
            }
        }
    }

    /// Build a full state snapshot event for initial render or redraw.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::CountdownSnapshot {
            state: self.state,
            display: self.display(now),
            title: self.title.clone(),
            target: self.target,
            compact: self.compact,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Assign or clear the target instant.
    ///
    /// Any assignment re-arms the one-shot alert and clears `completed`;
    /// assigning from `Elapsed` transitions back to `Running` so the alert
    /// can fire again for the new target.
    pub fn set_target(&mut self, target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Event {
        self.target = target;
        self.completed = false;
        self.alert_fired = false;
        self.state = match target {
            Some(_) => CountdownState::Running,
            None => CountdownState::Pending,
        };
        Event::TargetSet { target, at: now }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Update the compact-layout flag. Returns true if it changed.
    pub fn set_compact(&mut self, compact: bool) -> bool {
        let changed = self.compact != compact;
        self.compact = compact;
        changed
    }

    /// Call periodically. Returns `Some(Event::CountdownElapsed)` on the
    /// tick that first observes `now >= target` for the current assignment;
    /// every later tick of the same assignment returns `None`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        let target = self.target?;
        if now < target {
            return None;
        }

        self.state = CountdownState::Elapsed;
        self.completed = true;
        if !self.alert_fired {
            self.alert_fired = true;
            return Some(Event::CountdownElapsed {
                title: self.title.clone(),
                at: now,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn starts_pending_with_degenerate_display() {
        let engine = CountdownEngine::new();
        assert_eq!(engine.state(), CountdownState::Pending);
        assert_eq!(engine.display(now()), "0m 0s");
    }

    #[test]
    fn assignment_starts_running() {
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now() + Duration::seconds(90)), now());
        assert_eq!(engine.state(), CountdownState::Running);
        assert_eq!(engine.display(now()), "1m");
    }

    #[test]
    fn tick_before_target_does_nothing() {
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now() + Duration::seconds(90)), now());
        assert!(engine.tick(now()).is_none());
        assert_eq!(engine.state(), CountdownState::Running);
        assert!(!engine.completed());
    }

    #[test]
    fn elapsed_fires_alert_exactly_once() {
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now() + Duration::seconds(10)), now());

        let later = now() + Duration::seconds(11);
        let event = engine.tick(later);
        assert!(matches!(event, Some(Event::CountdownElapsed { .. })));
        assert_eq!(engine.state(), CountdownState::Elapsed);
        assert!(engine.completed());
        assert_eq!(engine.display(later), "Done!");

        // Every subsequent tick observing the same elapsed target is silent.
        for i in 0..10 {
            assert!(engine.tick(later + Duration::seconds(i)).is_none());
        }
    }

    #[test]
    fn past_target_elapses_on_first_tick() {
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now() - Duration::seconds(5)), now());
        assert_eq!(engine.display(now()), "Done!");
        assert!(matches!(
            engine.tick(now()),
            Some(Event::CountdownElapsed { .. })
        ));
    }

    #[test]
    fn reassignment_rearms_alert() {
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now() + Duration::seconds(1)), now());
        assert!(engine.tick(now() + Duration::seconds(2)).is_some());

        engine.set_target(Some(now() + Duration::seconds(60)), now());
        assert_eq!(engine.state(), CountdownState::Running);
        assert!(!engine.completed());
        assert!(engine.tick(now() + Duration::seconds(30)).is_none());
        assert!(engine.tick(now() + Duration::seconds(61)).is_some());
    }

    #[test]
    fn clearing_target_returns_to_pending() {
        let mut engine = CountdownEngine::new();
        engine.set_target(Some(now() + Duration::seconds(1)), now());
        engine.tick(now() + Duration::seconds(2));

        engine.set_target(None, now());
        assert_eq!(engine.state(), CountdownState::Pending);
        assert!(!engine.completed());
        assert_eq!(engine.display(now()), "0m 0s");
        assert!(engine.tick(now()).is_none());
    }

    #[test]
    fn cadence_tightens_only_while_running() {
        let mut engine = CountdownEngine::new();
        assert_eq!(engine.tick_interval().as_secs(), 60);

        engine.set_target(Some(now() + Duration::seconds(90)), now());
        assert_eq!(engine.tick_interval().as_secs(), 1);

        engine.tick(now() + Duration::seconds(91));
        assert_eq!(engine.tick_interval().as_secs(), 60);
    }

    #[test]
    fn compact_flag_reports_changes() {
        let mut engine = CountdownEngine::new();
        assert!(engine.set_compact(true));
        assert!(!engine.set_compact(true));
        assert!(engine.set_compact(false));
    }
}
