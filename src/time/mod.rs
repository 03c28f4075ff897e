//! Logical-time utilities (Lamport, Vector clocks).
//!
//! The scalar Lamport clock lives in `time::lamport`; vector-clock utilities
//! live in `time::vector`. The two never call each other.

pub mod lamport;
pub mod vector;


// Re-export for convenience
pub use lamport::LogicalClock;
pub use vector::*;
