#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Causal-Clocks provides the two logical-time primitives used to order events
//! across loosely-synchronized processes without wall-clock time:
//!
//! * [`LogicalClock`]: a scalar Lamport clock (`max(local, received) + 1`).
//! * [`VectorClock`]: a per-node counter table with partial-order comparison.
//!
//! Both are thread-safe in isolation and carry no transport, persistence or
//! membership logic. The host system drives them at send/receive time.

// Module for shared data types (NodeId, Timestamps, Relation, records).
pub mod types;

// Module for clock error types.
pub mod error;

// Module for the clocks themselves.
pub mod time;

pub use error::ClockError;
pub use time::{LogicalClock, VectorClock};
pub use types::{NodeId, Relation, Timestamps, VectorClockRecord};

/// Installs a `tracing` subscriber that writes through the test harness.
/// Safe to call from every test; only the first call installs anything.
#[cfg(feature = "test-utils")]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
