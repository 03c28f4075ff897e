//!
//! Defines error types for the clock primitives.
//!
//! The core clock operations are total and never return these. They surface
//! only from the checked Lamport operations and the JSON snapshot boundary.

/// Errors raised by the checked and serialization entry points of the clocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Advancing the Lamport clock past this value would overflow `i64`.
    #[error("Lamport clock overflow at {0}")]
    Overflow(i64),
    /// A clock snapshot could not be serialized.
    #[error("Snapshot encoding failed: {0}")]
    Encode(String),
    /// A clock snapshot could not be parsed.
    #[error("Snapshot decoding failed: {0}")]
    Decode(String),
}
