#![no_main]

// Harness: vector_merge – merged clock dominates both inputs, merge is idempotent.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use causal_clocks::{Relation, Timestamps, VectorClock};

#[derive(Arbitrary, Debug, Clone)]
struct Entry(u8, u64);

#[derive(Arbitrary, Debug, Clone)]
struct Frame {
    local: Vec<Entry>,
    incoming: Vec<Entry>,
}

fn table(entries: &[Entry]) -> Timestamps {
    entries.iter().map(|e| (format!("n{}", e.0 % 8), e.1)).collect()
}

fuzz_target!(|frame: Frame| {
    let local = VectorClock::new("local");
    local.from_map(&table(&frame.local));
    let before = local.clone();
    let incoming = table(&frame.incoming);

    local.merge_map(&incoming);
    assert!(matches!(local.compare(&before), Relation::After | Relation::Equal));
    assert!(matches!(local.compare_map(&incoming), Relation::After | Relation::Equal));

    let once = local.to_map();
    local.merge_map(&incoming);
    assert_eq!(local.to_map(), once);
});
