//! Fixed-zone clock projection.
//!
//! No state machine here: the displayed value is purely a function of the
//! current instant and one fixed named zone. Seconds are not shown, so the
//! owning tick loop only needs to wake once a minute.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;
use crate::events::Event;

/// Clock for one fixed IANA time zone, one instance per fixed-clock window.
#[derive(Debug, Clone)]
pub struct FixedClock {
    zone: Tz,
}

impl FixedClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Resolve a zone id like `"America/Los_Angeles"` against the bundled
    /// time-zone database.
    pub fn from_zone_id(id: &str) -> Result<Self, CoreError> {
        id.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| CoreError::InvalidTimeZone(id.to_string()))
    }

    pub fn zone_id(&self) -> &'static str {
        self.zone.name()
    }

    /// The time-of-day string for the given instant, e.g. `"07:45 PM"`.
    pub fn display(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.zone).format("%I:%M %p").to_string()
    }

    /// Minute cadence: sub-minute redraws of a minute-precision display are
    /// wasted work.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(60)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::ClockSnapshot {
            display: self.display(now),
            time_zone: self.zone_id().to_string(),
            at: now,
        }
    }
}
