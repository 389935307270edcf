//! Per-call search counters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{GameResult, Player};

/// Counters for the most recent `search` call. A warm tree keeps its node
/// statistics across calls; these are reset every time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,

    /// Children added to the tree.
    pub nodes_expanded: u32,

    pub simulations: u32,

    /// Moves played across all rollouts.
    pub rollout_plies: u64,

    /// Rollout outcomes, indexed `[first wins, second wins, draws]`.
    pub outcomes: [u32; 3],

    /// Deepest node expanded, counted from the current root.
    pub max_depth: u16,

    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count one finished rollout.
    pub fn record_rollout(&mut self, result: GameResult, plies: u32) {
        self.simulations += 1;
        self.rollout_plies += u64::from(plies);
        let slot = match result {
            GameResult::Winner(Player::First) => 0,
            GameResult::Winner(Player::Second) => 1,
            GameResult::Draw => 2,
        };
        self.outcomes[slot] += 1;
    }

    /// Rollouts won by `player`.
    #[must_use]
    pub fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::First => self.outcomes[0],
            Player::Second => self.outcomes[1],
        }
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.outcomes[2]
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 * 1_000_000.0 / self.time_us as f64
        }
    }

    /// Mean moves per rollout.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_plies as f64 / self.simulations as f64
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations, {} expanded, depth {}, rollouts {}/{}/{} (avg {:.1} plies), {} us",
            self.iterations,
            self.nodes_expanded,
            self.max_depth,
            self.outcomes[0],
            self.outcomes[1],
            self.outcomes[2],
            self.avg_rollout_length(),
            self.time_us
        )
    }
}
