//! Wall-clock source for batch resolution.

use chrono::{Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy)]
enum ClockSource {
    Local,
    Zone(Tz),
    Fixed(NaiveDateTime),
}

/// Produces the local date-time the engine resolves batches against.
#[derive(Debug, Clone, Copy)]
pub struct BatchClock {
    source: ClockSource,
}

impl BatchClock {
    /// Host-local time, or `timezone` when configured.
    #[must_use]
    pub fn new(timezone: Option<Tz>) -> Self {
        let source = timezone.map_or(ClockSource::Local, ClockSource::Zone);
        Self { source }
    }

    #[doc(hidden)]
    #[must_use]
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self {
            source: ClockSource::Fixed(at),
        }
    }

    /// Current wall-clock date and time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        match self.source {
            ClockSource::Local => Local::now().naive_local(),
            ClockSource::Zone(tz) => Utc::now().with_timezone(&tz).naive_local(),
            ClockSource::Fixed(at) => at,
        }
    }
}
