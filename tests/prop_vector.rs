use proptest::prelude::*;
use causal_clocks::{Relation, Timestamps, VectorClock};

// Node names come from a small pool so generated tables overlap often.
fn arb_node() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|i| format!("n{}", i))
}

fn arb_timestamps() -> impl Strategy<Value = Timestamps> {
    prop::collection::hash_map(arb_node(), 0u64..8, 0..6)
}

fn clock_from(node_id: &str, timestamps: &Timestamps) -> VectorClock {
    let clock = VectorClock::new(node_id);
    clock.from_map(timestamps);
    clock
}

proptest! {
    #[test]
    fn prop_compare_is_reflexive(t in arb_timestamps()) {
        let a = clock_from("a", &t);
        prop_assert_eq!(a.compare(&a), Relation::Equal);
    }

    #[test]
    fn prop_compare_is_antisymmetric(t1 in arb_timestamps(), t2 in arb_timestamps()) {
        let a = clock_from("a", &t1);
        let b = clock_from("b", &t2);
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    /// Comparison agrees with the componentwise definition over the key union.
    #[test]
    fn prop_compare_matches_componentwise_definition(t1 in arb_timestamps(), t2 in arb_timestamps()) {
        let a = clock_from("a", &t1);
        let b = clock_from("b", &t2);

        let keys: Vec<&String> = t1.keys().chain(t2.keys()).collect();
        let get = |t: &Timestamps, k: &String| t.get(k).copied().unwrap_or(0);
        let le = keys.iter().all(|&k| get(&t1, k) <= get(&t2, k));
        let ge = keys.iter().all(|&k| get(&t1, k) >= get(&t2, k));
        let expected = match (le, ge) {
            (true, true) => Relation::Equal,
            (true, false) => Relation::Before,
            (false, true) => Relation::After,
            (false, false) => Relation::Concurrent,
        };
        prop_assert_eq!(a.compare(&b), expected);
    }

    #[test]
    fn prop_disjoint_positive_clocks_are_concurrent(x in 1u64..100, y in 1u64..100) {
        let a = clock_from("n1", &Timestamps::from([("n1".to_string(), x)]));
        let b = clock_from("n2", &Timestamps::from([("n2".to_string(), y)]));
        prop_assert_eq!(a.compare(&b), Relation::Concurrent);
    }

    #[test]
    fn prop_merge_is_idempotent(t1 in arb_timestamps(), t2 in arb_timestamps()) {
        let a = clock_from("a", &t1);
        let b = clock_from("b", &t2);
        a.merge(&b);
        let once = a.to_map();
        a.merge(&b);
        prop_assert_eq!(a.to_map(), once);
    }

    #[test]
    fn prop_merge_is_commutative(t1 in arb_timestamps(), t2 in arb_timestamps()) {
        let a = clock_from("a", &t1);
        let b = clock_from("b", &t2);

        let a_into_b = b.clone();
        a_into_b.merge(&a);
        let b_into_a = a.clone();
        b_into_a.merge(&b);

        prop_assert_eq!(a_into_b.to_map(), b_into_a.to_map());
    }

    /// The merged clock dominates (or equals) both inputs.
    #[test]
    fn prop_merge_dominates_inputs(t1 in arb_timestamps(), t2 in arb_timestamps()) {
        let a = clock_from("a", &t1);
        let b = clock_from("b", &t2);
        let original = a.clone();
        a.merge(&b);
        prop_assert!(matches!(a.compare(&original), Relation::After | Relation::Equal));
        prop_assert!(matches!(a.compare(&b), Relation::After | Relation::Equal));
    }

    /// Merge followed by a local tick is strictly after the peer.
    #[test]
    fn prop_receive_event_is_after_sender(t1 in arb_timestamps(), t2 in arb_timestamps()) {
        let a = clock_from("a", &t1);
        let b = clock_from("b", &t2);
        a.merge(&b);
        a.increment();
        prop_assert_eq!(a.compare(&b), Relation::After);
        prop_assert_eq!(b.compare(&a), Relation::Before);
    }

    #[test]
    fn prop_round_trip_through_map(t in arb_timestamps()) {
        let x = clock_from("x", &t);
        let y = VectorClock::new("x");
        y.from_map(&x.to_map());
        prop_assert_eq!(y.to_map(), x.to_map());

        let mut snapshot = x.to_map();
        snapshot.insert("intruder".to_string(), 1);
        prop_assert_eq!(x.to_map(), t);
    }

    #[test]
    fn prop_round_trip_through_json(t in arb_timestamps()) {
        let x = clock_from("x", &t);
        let restored = VectorClock::from_json(&x.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored.node_id(), "x");
        prop_assert_eq!(restored.to_map(), t);
    }
}
