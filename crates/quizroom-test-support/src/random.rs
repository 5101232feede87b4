//! Deterministic `RandomSource` implementations for tests.

use quizroom_core::random::RandomSource;

/// A source that always picks index 0. Suitable for tests that do not
/// depend on specific random values; invite codes come out as the first
/// alphabet character repeated.
#[derive(Debug, Clone, Copy)]
pub struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// A source that returns indices from a predetermined sequence. Panics if
/// the sequence is exhausted. Used in tests that need specific, repeatable
/// codes.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<usize>,
    index: usize,
}

impl SequenceRandom {
    /// Creates a `SequenceRandom` with the given indices.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        let value = self.values[self.index];
        self.index += 1;
        value.min(len.saturating_sub(1))
    }
}
