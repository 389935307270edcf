//! A single Gomoku position.

use serde::{Deserialize, Serialize};

use super::bitboard::{dilate, has_five};
use super::{Bitboard, Move, CENTRE};
use crate::core::{GameResult, GameRng, GomokuError, Player, Result};

/// One position: both sides' stones, side to move, legal set and outcome.
///
/// `BoardState` is a small `Copy` value. The search clones it whenever a
/// branch needs its own copy and mutates it in place along a rollout.
///
/// Invariants:
/// - `first` and `second` never share a cell.
/// - `legal` never intersects the occupied cells and is recomputed after
///   every move.
/// - Once `winner` is set it never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    first: Bitboard,
    second: Bitboard,
    current: Player,
    winner: Option<Player>,
    legal: Bitboard,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Empty board with the first player to move. The only legal move is
    /// the centre cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            first: Bitboard::new(),
            second: Bitboard::new(),
            current: Player::First,
            winner: None,
            legal: Bitboard::single(CENTRE),
        }
    }

    /// Place a stone for the side to move without validating it.
    ///
    /// `mv` must be in [`legal_moves`](Self::legal_moves). Only the mover can
    /// complete a new five, so only the mover's stones are checked.
    #[inline]
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.legal.contains(mv), "move {} is not legal", mv);

        let stones = match self.current {
            Player::First => &mut self.first,
            Player::Second => &mut self.second,
        };
        stones.set(mv);
        let mover_wins = has_five(*stones);

        self.legal = Self::compute_legal(self.first | self.second);
        if mover_wins && self.winner.is_none() {
            self.winner = Some(self.current);
        }
        self.current = self.current.other();
    }

    /// Validate and place a stone for the side to move.
    ///
    /// On error the state is left unchanged.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.is_terminal() {
            return Err(GomokuError::GameOver);
        }
        if self.occupied().contains(mv) {
            return Err(GomokuError::Occupied(mv));
        }
        if !self.legal.contains(mv) {
            return Err(GomokuError::NotLegal(mv));
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Pick a move uniformly from `candidates`, apply it and return it.
    ///
    /// `candidates` must be a subset of the legal set. Returns `None` without
    /// touching the state if it is empty.
    pub fn random_move(&mut self, candidates: &Bitboard, rng: &mut GameRng) -> Option<Move> {
        let mv = rng.choose_cell(candidates)?;
        self.apply_move(mv);
        Some(mv)
    }

    fn compute_legal(occupied: Bitboard) -> Bitboard {
        if occupied.is_empty() {
            Bitboard::single(CENTRE)
        } else {
            dilate(occupied)
        }
    }

    /// Cells eligible for the next move.
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> Bitboard {
        self.legal
    }

    /// True once a side has won or no legal move remains.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.legal.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Outcome of the position, `None` while the game is undecided.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.winner {
            Some(p) => Some(GameResult::Winner(p)),
            None if self.legal.is_empty() => Some(GameResult::Draw),
            None => None,
        }
    }

    /// Side to move next.
    #[inline]
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Stones held by one side.
    #[inline]
    #[must_use]
    pub fn stones(&self, player: Player) -> Bitboard {
        match player {
            Player::First => self.first,
            Player::Second => self.second,
        }
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.first | self.second
    }

    /// Owner of the stone on `mv`, if any.
    #[must_use]
    pub fn stone_at(&self, mv: Move) -> Option<Player> {
        if self.first.contains(mv) {
            Some(Player::First)
        } else if self.second.contains(mv) {
            Some(Player::Second)
        } else {
            None
        }
    }

    /// Number of stones on the board.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.first.count() + self.second.count()
    }
}
