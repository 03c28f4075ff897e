#![no_main]

// Harness: vector_compare – anti-symmetry and reflexivity of the partial order.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use causal_clocks::{Relation, Timestamps, VectorClock};

#[derive(Arbitrary, Debug, Clone)]
struct Entry(u8, u64);

#[derive(Arbitrary, Debug, Clone)]
struct Pair {
    left: Vec<Entry>,
    right: Vec<Entry>,
}

fn table(entries: &[Entry]) -> Timestamps {
    // Small key space so the two sides overlap.
    entries.iter().map(|e| (format!("n{}", e.0 % 8), e.1)).collect()
}

fuzz_target!(|pair: Pair| {
    let a = VectorClock::new("a");
    a.from_map(&table(&pair.left));
    let b = VectorClock::new("b");
    b.from_map(&table(&pair.right));

    assert_eq!(a.compare(&a), Relation::Equal);
    assert_eq!(a.compare(&b), b.compare(&a).reverse());
});
