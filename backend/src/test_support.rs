//! Shared test doubles for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Bird, BirdId, BirdName, NewBird};

/// Deterministic timestamp used as the starting point for test clocks.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 12, 8, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock whose reading only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Build a stored bird with both timestamps at [`fixture_timestamp`].
pub fn sample_bird(id: u64, name: &str, description: &str) -> Bird {
    let name = BirdName::new(name).expect("valid bird name");
    Bird::create(
        BirdId::from(id),
        NewBird::new(name, description),
        fixture_timestamp(),
    )
}
