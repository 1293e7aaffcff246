use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index in `[0, outcomes)` for each probabilistic event.
pub trait RandomSource {
    fn next_index(&mut self, outcomes: usize) -> usize;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_index(&mut self, outcomes: usize) -> usize {
        (**self).next_index(outcomes)
    }
}

/// Production source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct RngSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl RngSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for RngSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for RngSource {
    fn next_index(&mut self, outcomes: usize) -> usize {
        if outcomes == 0 {
            return 0;
        }
        self.rng.gen_range(0..outcomes)
    }
}

/// Replays a fixed integer sequence, each value reduced modulo the requested
/// outcome count. The sequence wraps around once exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySource {
    values: Vec<u64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn next_index(&mut self, outcomes: usize) -> usize {
        if outcomes == 0 || self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        (value % outcomes as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{RandomSource, ReplaySource, RngSource};

    #[test]
    fn replay_reduces_modulo_outcome_count() {
        let mut source = ReplaySource::new([0, 3, 5, 22, 7, 4]);
        let drawn: Vec<usize> = (0..6).map(|_| source.next_index(2)).collect();
        assert_eq!(drawn, vec![0, 1, 1, 0, 1, 0]);
        assert_eq!(source.consumed(), 6);
    }

    #[test]
    fn replay_wraps_when_exhausted() {
        let mut source = ReplaySource::new([4, 5]);
        assert_eq!(source.next_index(6), 4);
        assert_eq!(source.next_index(6), 5);
        assert_eq!(source.next_index(6), 4);
    }

    #[test]
    fn seeded_source_is_deterministic() {
        let mut a = RngSource::with_seed(42);
        let mut b = RngSource::with_seed(42);
        for _ in 0..64 {
            assert_eq!(a.next_index(20), b.next_index(20));
        }
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn entropy_source_stays_in_range() {
        let mut source = RngSource::from_entropy();
        for _ in 0..256 {
            assert!(source.next_index(6) < 6);
        }
        assert_eq!(source.seed(), None);
    }
}
