#![no_main]

// Harness: lamport_ops – the clock never moves backwards under checked ops.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use causal_clocks::LogicalClock;

#[derive(Arbitrary, Debug, Clone)]
enum Op {
    Increment,
    Update(i64),
    Advance(i64),
}

#[derive(Arbitrary, Debug, Clone)]
struct Frame {
    initial: i64,
    ops: Vec<Op>,
}

fuzz_target!(|frame: Frame| {
    let clock = LogicalClock::new(frame.initial);
    for op in frame.ops {
        let prior = clock.now();
        match op {
            Op::Increment => {
                if let Ok(next) = clock.try_increment() {
                    assert_eq!(next, prior + 1);
                }
            }
            Op::Update(received) => {
                if let Ok(next) = clock.try_update(received) {
                    assert!(next > prior && next > received);
                }
            }
            Op::Advance(target) => clock.advance(target),
        }
        assert!(clock.now() >= prior);
    }
});
