use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::CountdownState;

/// Every observable state change in a window's live-state engine produces an
/// Event. The GUI receives these over the window's event channel; snapshots
/// double as the initial-render payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new target instant was assigned (or cleared) on a countdown.
    TargetSet {
        target: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    /// A countdown first reached zero for the current target assignment.
    /// Emitted exactly once per assignment; the completion alert hangs off
    /// this event.
    CountdownElapsed {
        title: String,
        at: DateTime<Utc>,
    },
    /// Full countdown display state. Emitted when the rendered output
    /// changed, and on demand for initial render.
    CountdownSnapshot {
        state: CountdownState,
        display: String,
        title: String,
        target: Option<DateTime<Utc>>,
        compact: bool,
        at: DateTime<Utc>,
    },
    /// Fixed-clock display state for one named zone.
    ClockSnapshot {
        display: String,
        time_zone: String,
        at: DateTime<Utc>,
    },
}
