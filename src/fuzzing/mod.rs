//! Model-based fuzzing of the table using quickcheck.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use quickcheck::Arbitrary;

use crate::node::{prefix_mask, range_top};
use crate::PrefixTable;

mod basic;

const DEFAULT_NUM_TESTS: usize = 1000;
const DEFAULT_GEN_SIZE: usize = 100;

fn proptest_runner<A: Arbitrary + Debug, F: Fn(A) -> bool>(f: F) {
    let num_tests: usize = std::env::var("QUICKCHECK_TESTS")
        .ok()
        .and_then(|x| x.parse().ok())
        .unwrap_or(DEFAULT_NUM_TESTS);

    let mut gen = quickcheck::Gen::new(DEFAULT_GEN_SIZE);
    for _ in 0..num_tests {
        let input = A::arbitrary(&mut gen);
        if !f(input.clone()) {
            shrink_failure(f, input)
        }
    }
}

fn shrink_failure<A: Arbitrary + Debug, F: Fn(A) -> bool>(f: F, input: A) -> ! {
    for smaller in input.shrink() {
        if !f(smaller.clone()) {
            shrink_failure(f, smaller)
        }
    }
    // all shrunken inputs pass, so `input` is minimal
    panic!("[QUICKCHECK] Test case failed!\n  Minimal input:\n    {input:?}");
}

macro_rules! qc {
    ($name:ident, $f:ident) => {
        #[test]
        fn $name() {
            proptest_runner($f)
        }
    };
}
pub(crate) use qc;

/// One mutation of the table under test.
#[derive(Debug, PartialEq, Clone, Copy)]
enum Operation {
    Add(TestPrefix),
    Remove(TestPrefix),
}

impl Arbitrary for Operation {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let p = TestPrefix::arbitrary(g);
        // adds outnumber removes so that tables actually grow
        if *g.choose(&[true, true, true, false]).unwrap() {
            Operation::Add(p)
        } else {
            Operation::Remove(p)
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match *self {
            Operation::Add(p) => Box::new(p.shrink().map(Operation::Add)),
            Operation::Remove(p) => Box::new(p.shrink().map(Operation::Remove)),
        }
    }
}

/// A raw `(address, length)` pair. The address is deliberately left untruncated so
/// that the table's own truncation is exercised by every operation.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
struct TestPrefix(u32, u8);

impl TestPrefix {
    /// The canonical entry this prefix occupies in the table.
    fn entry(self) -> (u32, u8) {
        (self.0 & prefix_mask(self.1), self.1)
    }
}

impl Arbitrary for TestPrefix {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // short lengths dominate so that bases collide and nodes multiplex
        #[rustfmt::skip]
        let len: u8 = *g
            .choose(&[
                0,
                1, 1, 1,
                2, 2, 2,
                3, 3, 3,
                4, 4,
                5, 5,
                6, 6,
                7, 7,
                8, 8,
                12, 16, 16, 24, 32, 32,
            ])
            .unwrap();
        TestPrefix(u32::arbitrary(g), len)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        if self.1 == 0 {
            quickcheck::empty_shrinker()
        } else {
            quickcheck::single_shrinker(TestPrefix(self.0, self.1 - 1))
        }
    }
}

/// Reference model: the set of canonical `(base, len)` entries, with the default
/// route stored as `(0, 0)`.
type Model = HashSet<(u32, u8)>;

/// Apply one operation to both the table and the model, and check that they agree on
/// the outcome.
fn apply(table: &mut PrefixTable, model: &mut Model, op: Operation) -> bool {
    match op {
        Operation::Add(p) => {
            let expect = model.insert(p.entry());
            table.insert(p.0, p.1).is_ok() == expect
        }
        Operation::Remove(p) => {
            let expect = model.remove(&p.entry());
            table.remove(p.0, p.1).is_ok() == expect
        }
    }
}

/// Reference lookup with the same node-grouping semantics as the tree: every base
/// competes with its shortest stored length.
fn model_lookup(model: &Model, addr: u32) -> Option<u8> {
    let mut shortest: HashMap<u32, u8> = HashMap::new();
    for &(base, len) in model.iter().filter(|(_, len)| *len > 0) {
        let entry = shortest.entry(base).or_insert(len);
        *entry = (*entry).min(len);
    }
    let best = shortest
        .into_iter()
        .filter(|&(base, len)| base <= addr && addr <= range_top(base, len))
        .map(|(_, len)| len)
        .max();
    match best {
        Some(len) => Some(len),
        None if model.contains(&(0, 0)) => Some(0),
        None => None,
    }
}
