//! Injected randomness.
//!
//! The engine never draws random numbers on its own. Every non-deterministic
//! step (random target among ties, random card from a pool, ...) asks a
//! `RandomGenerator` supplied by the caller, so replaying the same sequence
//! of decisions reproduces the same state exactly.
//!
//! Two implementations ship with the crate:
//!
//! - `GameRng`: seedable ChaCha8 generator, forkable for search branches
//! - `ScriptedRandom`: replays a fixed list of decisions
//!
//! ## MCTS Usage
//!
//! ```
//! use hearth_state::core::{GameRng, RandomGenerator};
//!
//! let mut rng = GameRng::new(42);
//! let mut branch = rng.fork();
//!
//! let mut rng2 = GameRng::new(42);
//! let mut branch2 = rng2.fork();
//!
//! // Same seed and fork counter give the same sequence
//! assert_eq!(branch.get(1000), branch2.get(1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of random decisions consumed by the engine.
pub trait RandomGenerator {
    /// Uniform value in `0..exclusive_max`. `exclusive_max` must be positive.
    fn get(&mut self, exclusive_max: usize) -> usize;

    /// Uniform value in `min..=max`.
    fn get_range(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "empty random range {}..={}", min, max);
        min + self.get(max - min + 1)
    }
}

/// Deterministic RNG with forking for MCTS simulations.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }
}

impl RandomGenerator for GameRng {
    fn get(&mut self, exclusive_max: usize) -> usize {
        self.inner.gen_range(0..exclusive_max)
    }
}

/// Replays a recorded list of decisions.
///
/// Each call to `get` consumes the next decision. The decision must be in
/// range for the request; running out of decisions or receiving an out of
/// range one means the replay diverged from the recording, which panics.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    decisions: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Create a replay source from recorded decisions.
    #[must_use]
    pub fn new(decisions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of decisions not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.decisions.len() - self.cursor
    }
}

impl RandomGenerator for ScriptedRandom {
    fn get(&mut self, exclusive_max: usize) -> usize {
        let Some(&value) = self.decisions.get(self.cursor) else {
            panic!("scripted random source exhausted after {} decisions", self.cursor);
        };
        assert!(
            value < exclusive_max,
            "scripted decision {} out of range 0..{}",
            value,
            exclusive_max
        );
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.get(1000), rng2.get(1000));
        }
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.get(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.get(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_get_range_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..200 {
            let value = rng.get_range(3, 5);
            assert!((3..=5).contains(&value));
        }
        assert_eq!(rng.get_range(4, 4), 4);
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut random = ScriptedRandom::new([2, 0, 1]);
        assert_eq!(random.get(3), 2);
        assert_eq!(random.get(1), 0);
        assert_eq!(random.get_range(5, 6), 6);
        assert_eq!(random.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_exhausted_panics() {
        let mut random = ScriptedRandom::new([]);
        random.get(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_scripted_out_of_range_panics() {
        let mut random = ScriptedRandom::new([5]);
        random.get(2);
    }
}
