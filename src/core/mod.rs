//! Core building blocks: sides and outcomes, RNG, errors.
//!
//! Nothing in here knows about the search tree.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{GomokuError, Result};
pub use player::{GameResult, Player};
pub use rng::GameRng;
