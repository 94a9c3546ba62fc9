use alloc::vec::Vec;

/// Source of uniform random integers, injected into every operation that draws pieces.
pub trait RandomSource {
    /// Returns a uniformly distributed value in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Deterministic source that replays a fixed list of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound, so any script yields in-range draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceSource {
    values: Vec<usize>,
    position: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % bound
    }
}
