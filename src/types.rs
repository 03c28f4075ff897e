use std::collections::HashMap;
use std::fmt;

// Types shared by the clock implementations in `crate::time` and by callers
// that carry clock values in their own message envelopes or records.

/// Opaque, caller-assigned identifier of a node owning a vector clock.
pub type NodeId = String;

/// Plain `{node: counter}` mapping. This is the snapshot form of a
/// `VectorClock`: what `to_map` hands out and what `from_map` loads.
/// An absent key means the counter is 0.
pub type Timestamps = HashMap<NodeId, u64>;

/// Result of comparing two vector clocks.
///
/// Read as "this clock is `<Relation>` the other one".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Relation {
    /// Every counter is <= the other's, at least one strictly.
    Before,
    /// Every counter is >= the other's, at least one strictly.
    After,
    /// Some counter is greater and some other counter is smaller.
    Concurrent,
    /// Identical causal history.
    Equal,
}

impl Relation {
    /// The relation seen from the other clock's side.
    pub fn reverse(self) -> Self {
        match self {
            Relation::Before => Relation::After,
            Relation::After => Relation::Before,
            other => other,
        }
    }

    pub fn is_concurrent(self) -> bool {
        self == Relation::Concurrent
    }

    pub fn happened_before(self) -> bool {
        self == Relation::Before
    }

    pub fn happened_after(self) -> bool {
        self == Relation::After
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::Before => "before",
            Relation::After => "after",
            Relation::Concurrent => "concurrent",
            Relation::Equal => "equal",
        };
        f.write_str(s)
    }
}

/// Serializable form of a vector clock: owner identity plus its table.
/// Suitable for a persistence record or a message envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VectorClockRecord {
    pub node_id: NodeId,
    #[serde(default)]
    pub timestamps: Timestamps,
}
