//! Deterministic random number generation for expansion and rollouts.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Each rollout gets an independent, reproducible stream
//!
//! ```
//! use gomoku_mcts::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut rollout_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! assert_ne!(rng.gen_range_usize(0..1000), rollout_rng.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Bitboard, Move};

/// Deterministic RNG with forking.
///
/// ChaCha8 keeps it fast while the seed alone fixes the whole search.
/// Only ever used by one search at a time, so no synchronization is needed.
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

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Pick a cell uniformly from the set.
    ///
    /// Returns `None` if the set is empty.
    pub fn choose_cell(&mut self, cells: &Bitboard) -> Option<Move> {
        let count = cells.count() as usize;
        if count == 0 {
            return None;
        }
        let n = self.gen_range_usize(0..count);
        cells.nth(n)
    }
}
