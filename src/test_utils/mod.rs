use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::RandomSource;

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        let values = if values.is_empty() { vec![0] } else { values };
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Always draws 0, so sampling keeps catalog order.
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for SequenceRandom {
    fn draw(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()] % upper
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_cycles_and_bounds() {
        let rng = SequenceRandom::new(vec![7, 2]);
        assert_eq!(rng.draw(5), 2);
        assert_eq!(rng.draw(5), 2);
        assert_eq!(rng.draw(4), 3);
        assert_eq!(rng.draw(0), 0);
    }
}
