//! Scalar Lamport clock.
//!
//! Local events call [`LogicalClock::increment`]; receiving a message stamped
//! with a peer's time calls [`LogicalClock::update`]. If event A causally
//! precedes event B, A's timestamp is strictly smaller than B's.

use crate::error::ClockError;
use parking_lot::Mutex;
use serde::Deserialize;

/// Thread-safe Lamport clock. The counter never moves backwards.
#[derive(Debug)]
pub struct LogicalClock {
    time: Mutex<i64>,
}

impl LogicalClock {
    /// Creates a clock seeded at `initial_time`. Any value is accepted, which
    /// lets callers resume from a persisted timestamp.
    pub fn new(initial_time: i64) -> Self {
        LogicalClock { time: Mutex::new(initial_time) }
    }

    /// Records a local event and returns the new time.
    pub fn increment(&self) -> i64 {
        let mut time = self.time.lock();
        *time += 1;
        tracing::trace!("Lamport clock incremented to {}", *time);
        *time
    }

    /// Records a receive event: `time = max(time, received_time) + 1`.
    pub fn update(&self, received_time: i64) -> i64 {
        let mut time = self.time.lock();
        *time = (*time).max(received_time) + 1;
        tracing::trace!("Lamport clock updated to {} (received {})", *time, received_time);
        *time
    }

    /// Current time, without ticking.
    pub fn now(&self) -> i64 {
        *self.time.lock()
    }

    /// Raises the clock to `new_time` for out-of-band resynchronisation.
    /// No-op unless `new_time` is ahead of the current time.
    pub fn advance(&self, new_time: i64) {
        let mut time = self.time.lock();
        if new_time > *time {
            tracing::debug!("Lamport clock advanced from {} to {}", *time, new_time);
            *time = new_time;
        }
    }

    /// Like [`increment`](Self::increment), but refuses instead of overflowing.
    /// The clock is left unchanged on error.
    pub fn try_increment(&self) -> Result<i64, ClockError> {
        let mut time = self.time.lock();
        let next = time.checked_add(1).ok_or_else(|| {
            tracing::warn!("Refusing Lamport increment: clock is at {}", *time);
            ClockError::Overflow(*time)
        })?;
        *time = next;
        Ok(next)
    }

    /// Like [`update`](Self::update), but refuses instead of overflowing.
    /// The clock is left unchanged on error.
    pub fn try_update(&self, received_time: i64) -> Result<i64, ClockError> {
        let mut time = self.time.lock();
        let base = (*time).max(received_time);
        let next = base.checked_add(1).ok_or_else(|| {
            tracing::warn!(
                "Refusing Lamport update: local {} received {}",
                *time,
                received_time
            );
            ClockError::Overflow(base)
        })?;
        *time = next;
        Ok(next)
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for LogicalClock {
    fn clone(&self) -> Self {
        Self::new(self.now())
    }
}

// Serialized as the bare timestamp so it can sit directly in a record.
impl serde::Serialize for LogicalClock {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.now())
    }
}

impl<'de> serde::Deserialize<'de> for LogicalClock {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(LogicalClock::new)
    }
}
