//! Vector clock implementation.
//!
//! The map-level functions [`merge_into`] and [`compare`] hold the algorithm
//! and take no locks. [`VectorClock`] wraps a table behind a reader/writer
//! lock and runs those functions over snapshots, so a cross-clock operation
//! never holds locks on two clocks at once.

use crate::error::ClockError;
use crate::types::{NodeId, Relation, Timestamps, VectorClockRecord};
use parking_lot::RwLock;
use serde::Deserialize;

/// Raises every entry of `local` to `max(local, incoming)`. Keys only present
/// in `local` are retained; keys only present in `incoming` are added.
pub fn merge_into(local: &mut Timestamps, incoming: &Timestamps) {
    for (node, &incoming_count) in incoming {
        match local.get_mut(node) {
            Some(local_count) => *local_count = (*local_count).max(incoming_count),
            None => {
                local.insert(node.clone(), incoming_count);
            }
        }
    }
}

/// Componentwise ordering observed so far while walking the key union.
struct Dominance {
    all_less_or_equal: bool,
    all_greater_or_equal: bool,
    found_difference: bool,
}

impl Dominance {
    fn observe(&mut self, mine: u64, theirs: u64) {
        if mine < theirs {
            self.all_greater_or_equal = false;
        } else if mine > theirs {
            self.all_less_or_equal = false;
        }
        if mine != theirs {
            self.found_difference = true;
        }
    }

    fn is_concurrent(&self) -> bool {
        !self.all_less_or_equal && !self.all_greater_or_equal
    }

    fn relation(&self) -> Relation {
        if !self.found_difference {
            Relation::Equal
        } else if self.all_less_or_equal {
            Relation::Before
        } else if self.all_greater_or_equal {
            Relation::After
        } else {
            Relation::Concurrent
        }
    }
}

/// Partial-order test of `mine` against `theirs` over the union of their
/// keys, absent keys counting as 0. Each key is visited once: first every key
/// of `mine`, then the keys only `theirs` knows about.
pub fn compare(mine: &Timestamps, theirs: &Timestamps) -> Relation {
    let mut dominance = Dominance {
        all_less_or_equal: true,
        all_greater_or_equal: true,
        found_difference: false,
    };

    for (node, &count) in mine {
        dominance.observe(count, theirs.get(node).copied().unwrap_or(0));
        if dominance.is_concurrent() {
            return Relation::Concurrent;
        }
    }
    for (node, &count) in theirs {
        if mine.contains_key(node) {
            continue;
        }
        dominance.observe(0, count);
        if dominance.is_concurrent() {
            return Relation::Concurrent;
        }
    }

    dominance.relation()
}

/// Thread-safe vector clock owned by a single node.
///
/// Entries appear lazily (own increments, merges, loads) and are never
/// pruned.
#[derive(Debug)]
pub struct VectorClock {
    node_id: NodeId,
    timestamps: RwLock<Timestamps>,
}

impl VectorClock {
    /// Creates an empty clock for `node_id`.
    pub fn new(node_id: impl Into<NodeId>) -> Self {
        VectorClock {
            node_id: node_id.into(),
            timestamps: RwLock::new(Timestamps::new()),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Counter for `node`, 0 if the node is unknown.
    pub fn get(&self, node: &str) -> u64 {
        self.timestamps.read().get(node).copied().unwrap_or(0)
    }

    /// Number of nodes with a materialised entry.
    pub fn len(&self) -> usize {
        self.timestamps.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.read().is_empty()
    }

    /// Ticks this node's own counter. Call on every local event before its
    /// clock value is sent to peers.
    pub fn increment(&self) {
        let mut timestamps = self.timestamps.write();
        let count = match timestamps.get_mut(&self.node_id) {
            Some(count) => {
                *count += 1;
                *count
            }
            None => {
                timestamps.insert(self.node_id.clone(), 1);
                1
            }
        };
        tracing::trace!("Vector clock {} incremented own entry to {}", self.node_id, count);
    }

    /// Folds a peer's clock into this one (entrywise max).
    ///
    /// Does not count the receive as an event: callers that want that call
    /// [`increment`](Self::increment) afterwards.
    pub fn merge(&self, other: &VectorClock) {
        // Snapshot first: `other`'s read guard is gone before our write lock.
        let incoming = other.snapshot();
        self.merge_map(&incoming);
    }

    /// Folds a received `{node: counter}` mapping into this clock.
    pub fn merge_map(&self, incoming: &Timestamps) {
        let mut timestamps = self.timestamps.write();
        let known = timestamps.len();
        merge_into(&mut timestamps, incoming);
        if timestamps.len() > known {
            tracing::debug!(
                "Vector clock {} learned {} new node(s) on merge",
                self.node_id,
                timestamps.len() - known
            );
        }
    }

    /// Relation of this clock to `other`. Both tables are snapshotted under
    /// their own lock before comparing.
    pub fn compare(&self, other: &VectorClock) -> Relation {
        let mine = self.snapshot();
        let theirs = other.snapshot();
        compare(&mine, &theirs)
    }

    /// Relation of this clock to a raw `{node: counter}` mapping.
    pub fn compare_map(&self, theirs: &Timestamps) -> Relation {
        let mine = self.snapshot();
        compare(&mine, theirs)
    }

    /// Independent copy of the full table, for transmission or persistence.
    pub fn to_map(&self) -> Timestamps {
        self.snapshot()
    }

    /// Replaces the whole table with a copy of `data`. Prior entries are
    /// discarded, not merged.
    pub fn from_map(&self, data: &Timestamps) {
        let mut timestamps = self.timestamps.write();
        tracing::debug!(
            "Vector clock {} replaced {} entries with {} loaded entries",
            self.node_id,
            timestamps.len(),
            data.len()
        );
        *timestamps = data.clone();
    }

    pub fn to_record(&self) -> VectorClockRecord {
        VectorClockRecord {
            node_id: self.node_id.clone(),
            timestamps: self.snapshot(),
        }
    }

    pub fn from_record(record: VectorClockRecord) -> Self {
        VectorClock {
            node_id: record.node_id,
            timestamps: RwLock::new(record.timestamps),
        }
    }

    /// Encodes the clock's record as JSON.
    pub fn to_json(&self) -> Result<String, ClockError> {
        serde_json::to_string(&self.to_record()).map_err(|e| ClockError::Encode(e.to_string()))
    }

    /// Decodes a clock from a JSON record produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, ClockError> {
        let record: VectorClockRecord =
            serde_json::from_str(json).map_err(|e| ClockError::Decode(e.to_string()))?;
        Ok(Self::from_record(record))
    }

    fn snapshot(&self) -> Timestamps {
        self.timestamps.read().clone()
    }
}

impl Clone for VectorClock {
    fn clone(&self) -> Self {
        VectorClock {
            node_id: self.node_id.clone(),
            timestamps: RwLock::new(self.snapshot()),
        }
    }
}

impl serde::Serialize for VectorClock {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_record(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for VectorClock {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        VectorClockRecord::deserialize(deserializer).map(VectorClock::from_record)
    }
}
