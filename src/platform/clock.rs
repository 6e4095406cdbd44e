//! Wall-clock time source.

use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use crate::types::TimeOfDay;

pub trait Clock {
    /// Current local time of day.
    fn now(&self) -> TimeOfDay;
}

/// The system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> TimeOfDay {
        chrono::Local::now().time().into()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: Arc<Mutex<TimeOfDay>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(time: TimeOfDay) -> Self {
        Self { time: Arc::new(Mutex::new(time)) }
    }

    pub fn set(&self, time: TimeOfDay) {
        *self.time.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimeOfDay {
        *self.time.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
