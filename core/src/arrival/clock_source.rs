use crate::prelude::ClockSource;
use chrono::{DateTime, Utc};

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for replays and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
