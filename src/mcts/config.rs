//! Search settings.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};

/// Default iterations per move request.
pub const DEFAULT_ITERATIONS: u32 = 2000;

/// Knobs for one `MctsSearch`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// `C` in the UCT score. Larger values spread visits more evenly.
    pub exploration_constant: f64,

    /// Iterations used by `choose_default_move`.
    pub iterations: u32,

    /// Seed for expansion and rollouts.
    pub seed: u64,

    /// A search stops early once the arena holds this many nodes.
    pub max_nodes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            iterations: DEFAULT_ITERATIONS,
            seed: 42,
            max_nodes: 4_000_000,
        }
    }
}

impl SearchConfig {
    /// Set the UCT exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.iterations, 2000);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_iterations(50)
            .with_max_nodes(1000);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.max_nodes, 1000);
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"iterations": 500}"#).unwrap();
        assert_eq!(config, SearchConfig::default().with_iterations(500));
    }
}
