//! Integration tests for the countdown engine and display rules.
//!
//! These tests drive the engine the way a window's tick loop does:
//! assign a target, then observe ticks at wall-clock offsets.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use tickdown_core::{format_remaining, CountdownEngine, CountdownState, Event, FixedClock};

fn t0() -> DateTime<Utc> {
    "2026-08-05T09:00:00Z".parse().unwrap()
}

#[test]
fn test_ninety_second_scenario() {
    let mut engine = CountdownEngine::new();
    engine.set_target(Some(t0() + Duration::seconds(90)), t0());

    // After 0s elapsed: minutes tier, seconds dropped.
    assert_eq!(engine.display(t0()), "1m");

    // After 31s elapsed: 59s remain, seconds tier.
    let at = t0() + Duration::seconds(31);
    assert!(engine.tick(at).is_none());
    assert_eq!(engine.display(at), "59s");
}

#[test]
fn test_two_days_three_hours_scenario() {
    let mut engine = CountdownEngine::new();
    engine.set_target(Some(t0() + Duration::days(2) + Duration::hours(3)), t0());
    assert_eq!(engine.display(t0()), "2d 3h");
}

#[test]
fn test_already_past_target_on_first_render() {
    let mut engine = CountdownEngine::new();
    engine.set_target(Some(t0() - Duration::seconds(5)), t0());

    assert_eq!(engine.display(t0()), "Done!");

    // Exactly one completion alert across any number of ticks.
    let mut alerts = 0;
    for i in 0..30 {
        if engine.tick(t0() + Duration::seconds(i)).is_some() {
            alerts += 1;
        }
    }
    assert_eq!(alerts, 1);
}

#[test]
fn test_reassignment_from_elapsed_rearms_alert() {
    let mut engine = CountdownEngine::new();
    engine.set_target(Some(t0() + Duration::seconds(1)), t0());
    assert!(engine.tick(t0() + Duration::seconds(2)).is_some());
    assert_eq!(engine.state(), CountdownState::Elapsed);

    engine.set_target(Some(t0() + Duration::minutes(5)), t0());
    assert_eq!(engine.state(), CountdownState::Running);
    assert!(engine.tick(t0() + Duration::minutes(6)).is_some());
}

#[test]
fn test_no_target_is_distinct_from_done() {
    let engine = CountdownEngine::new();
    assert_eq!(engine.display(t0()), "0m 0s");

    let mut elapsed = CountdownEngine::new();
    elapsed.set_target(Some(t0() - Duration::seconds(1)), t0());
    assert_eq!(elapsed.display(t0()), "Done!");
}

#[test]
fn test_engines_are_independent() {
    // N engines, each with its own target; ticking one never disturbs the
    // others' state or displays.
    let mut engines: Vec<CountdownEngine> = (1..=5)
        .map(|i| {
            let mut e = CountdownEngine::new();
            e.set_target(Some(t0() + Duration::minutes(i)), t0());
            e
        })
        .collect();

    // Drive only the first engine past its target.
    let at = t0() + Duration::minutes(2);
    assert!(engines[0].tick(at).is_some());
    assert_eq!(engines[0].state(), CountdownState::Elapsed);

    for engine in &engines[1..] {
        assert_eq!(engine.state(), CountdownState::Running);
        assert!(!engine.completed());
    }
}

#[test]
fn test_suspended_window_catches_up() {
    // The loop missed many one-second wakes; the first tick afterwards still
    // lands in the right state because remaining time is target - now.
    let mut engine = CountdownEngine::new();
    engine.set_target(Some(t0() + Duration::minutes(10)), t0());

    let resumed = t0() + Duration::hours(3);
    assert!(engine.tick(resumed).is_some());
    assert_eq!(engine.display(resumed), "Done!");
}

#[test]
fn test_snapshot_carries_display_state() {
    let mut engine = CountdownEngine::new();
    engine.set_title("launch".into());
    engine.set_target(Some(t0() + Duration::seconds(45)), t0());

    match engine.snapshot(t0()) {
        Event::CountdownSnapshot {
            state,
            display,
            title,
            compact,
            ..
        } => {
            assert_eq!(state, CountdownState::Running);
            assert_eq!(display, "45s");
            assert_eq!(title, "launch");
            assert!(!compact);
        }
        other => panic!("expected CountdownSnapshot, got {:?}", other),
    }
}

#[test]
fn test_fixed_clock_is_a_pure_projection() {
    let clock = FixedClock::from_zone_id("America/Los_Angeles").unwrap();
    let now: DateTime<Utc> = "2026-01-15T20:00:00Z".parse().unwrap();
    // PST (no DST in January): 20:00 UTC == 12:00 PM.
    assert_eq!(clock.display(now), "12:00 PM");
    // Same instant, same output; nothing mutates.
    assert_eq!(clock.display(now), "12:00 PM");
}

proptest! {
    /// The tier rule matches the days/hours/minutes/seconds decomposition
    /// for every positive duration.
    #[test]
    fn prop_format_matches_decomposition(secs in 1i64..(400 * 86_400)) {
        let formatted = format_remaining(Duration::seconds(secs));
        let days = secs / 86_400;
        let hours = (secs % 86_400) / 3_600;
        let minutes = (secs % 3_600) / 60;
        let seconds = secs % 60;

        let expected = if days > 0 {
            format!("{}d {}h", days, hours)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", seconds)
        };
        prop_assert_eq!(formatted, expected);
    }

    /// Nonpositive durations always render the completion string.
    #[test]
    fn prop_nonpositive_is_done(secs in -(400 * 86_400i64)..=0) {
        prop_assert_eq!(format_remaining(Duration::seconds(secs)), "Done!");
    }
}
