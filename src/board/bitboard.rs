//! Bitboard over the 225 cells of a 15x15 board.
//!
//! Bit `i` of the flattened 256-bit word array is cell `i`. Bits 225..256 are
//! always zero. Shifting the flattened index by 1 moves one column, by 15 one
//! row, by 14 or 16 one diagonal step. Any shift with a column component has
//! to drop the edge columns first, or stones at the end of one row would
//! reappear at the start of the next.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

use super::{Move, BOARD_SIZE, CELL_COUNT};

const WORDS: usize = 4;

/// Set of board cells packed into four `u64` words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

/// Every cell whose column lies in `lo..=hi`.
const fn columns(lo: usize, hi: usize) -> Bitboard {
    let mut bits = [0u64; WORDS];
    let mut idx = 0;
    while idx < CELL_COUNT {
        let col = idx % BOARD_SIZE;
        if col >= lo && col <= hi {
            bits[idx / 64] |= 1u64 << (idx % 64);
        }
        idx += 1;
    }
    Bitboard { bits }
}

/// All 225 cells.
pub const FULL: Bitboard = columns(0, BOARD_SIZE - 1);
/// Everything except column 0. Applied before shifts moving one column left.
pub const NOT_FIRST_COL: Bitboard = columns(1, BOARD_SIZE - 1);
/// Everything except column 14. Applied before shifts moving one column right.
pub const NOT_LAST_COL: Bitboard = columns(0, BOARD_SIZE - 2);
/// Everything except columns 0 and 1.
pub const NOT_FIRST_TWO_COLS: Bitboard = columns(2, BOARD_SIZE - 1);
/// Everything except columns 13 and 14.
pub const NOT_LAST_TWO_COLS: Bitboard = columns(0, BOARD_SIZE - 3);

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Bitboard holding a single cell.
    #[inline]
    pub fn single(mv: Move) -> Self {
        let mut bb = Self::new();
        bb.set(mv);
        bb
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, mv: Move) {
        let idx = mv.index();
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, mv: Move) {
        let idx = mv.index();
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Check if bit is set at position
    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        let idx = mv.index();
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Check if the two sets share any cell.
    #[inline]
    pub fn intersects(&self, other: &Bitboard) -> bool {
        !(*self & *other).is_empty()
    }

    /// The `n`-th set cell in ascending index order.
    pub fn nth(&self, mut n: usize) -> Option<Move> {
        for (word_idx, &word) in self.bits.iter().enumerate() {
            let ones = word.count_ones() as usize;
            if n >= ones {
                n -= ones;
                continue;
            }
            let mut w = word;
            for _ in 0..n {
                w &= w - 1;
            }
            let idx = word_idx * 64 + w.trailing_zeros() as usize;
            return Some(Move::from_index_unchecked(idx));
        }
        None
    }

    /// Shift every cell towards higher indices by `n`, dropping cells that
    /// fall off the board.
    #[inline]
    pub fn shl(self, n: u32) -> Self {
        debug_assert!(n > 0 && n < 64);
        let mut out = [0u64; WORDS];
        for i in (0..WORDS).rev() {
            out[i] = self.bits[i] << n;
            if i > 0 {
                out[i] |= self.bits[i - 1] >> (64 - n);
            }
        }
        Self { bits: out } & FULL
    }

    /// Shift every cell towards lower indices by `n`.
    #[inline]
    pub fn shr(self, n: u32) -> Self {
        debug_assert!(n > 0 && n < 64);
        let mut out = [0u64; WORDS];
        for i in 0..WORDS {
            out[i] = self.bits[i] >> n;
            if i + 1 < WORDS {
                out[i] |= self.bits[i + 1] << (64 - n);
            }
        }
        Self { bits: out }
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        let mut bits = self.bits;
        for (b, r) in bits.iter_mut().zip(rhs.bits) {
            *b &= r;
        }
        Bitboard { bits }
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        *self = *self & rhs;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        let mut bits = self.bits;
        for (b, r) in bits.iter_mut().zip(rhs.bits) {
            *b |= r;
        }
        Bitboard { bits }
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = *self | rhs;
    }
}

/// Complement within the board; padding bits stay zero.
impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        let mut bits = self.bits;
        for b in bits.iter_mut() {
            *b = !*b;
        }
        Bitboard { bits } & FULL
    }
}

impl FromIterator<Move> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut bb = Bitboard::new();
        for mv in iter {
            bb.set(mv);
        }
        bb
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        // Clear the bit we just found
        self.current_word &= self.current_word - 1;

        Some(Move::from_index_unchecked(idx))
    }
}

/// All empty cells within Chebyshev distance 1 of an occupied cell.
pub fn dilate(occupied: Bitboard) -> Bitboard {
    let left = occupied & NOT_FIRST_COL;
    let right = occupied & NOT_LAST_COL;

    let mut shell = occupied.shr(BOARD_SIZE as u32);
    shell |= occupied.shl(BOARD_SIZE as u32);
    shell |= left.shr(1);
    shell |= right.shl(1);
    shell |= left.shl(BOARD_SIZE as u32 - 1);
    shell |= right.shl(BOARD_SIZE as u32 + 1);
    shell |= left.shr(BOARD_SIZE as u32 + 1);
    shell |= right.shr(BOARD_SIZE as u32 - 1);

    shell & !occupied
}

/// Shift-and reduction along one axis.
///
/// `one` and `two` drop the columns that a shift by `step` and `2 * step`
/// would carry across a row boundary.
#[inline]
fn has_run_of_five(stones: Bitboard, step: u32, one: Bitboard, two: Bitboard) -> bool {
    // runs of >= 2, ending at each set bit
    let m = stones & (stones & one).shl(step);
    // runs of >= 4
    let m = m & (m & two).shl(2 * step);
    // runs of >= 5
    m.intersects(&(m & one).shl(step))
}

/// Check whether `stones` contains five in a row on any axis.
pub fn has_five(stones: Bitboard) -> bool {
    let size = BOARD_SIZE as u32;
    has_run_of_five(stones, 1, NOT_LAST_COL, NOT_LAST_TWO_COLS)
        || has_run_of_five(stones, size, FULL, FULL)
        || has_run_of_five(stones, size + 1, NOT_LAST_COL, NOT_LAST_TWO_COLS)
        || has_run_of_five(stones, size - 1, NOT_FIRST_COL, NOT_FIRST_TWO_COLS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::from_row_col(row, col).unwrap()
    }

    fn cells(list: &[(usize, usize)]) -> Bitboard {
        list.iter().map(|&(r, c)| mv(r, c)).collect()
    }

    #[test]
    fn test_set_clear_contains() {
        let mut bb = Bitboard::new();
        assert!(bb.is_empty());

        bb.set(mv(0, 0));
        bb.set(mv(14, 14));
        bb.set(mv(4, 4)); // index 64, second word
        assert_eq!(bb.count(), 3);
        assert!(bb.contains(mv(14, 14)));
        assert!(bb.contains(mv(4, 4)));

        bb.clear(mv(0, 0));
        assert!(!bb.contains(mv(0, 0)));
        assert_eq!(bb.count(), 2);
    }

    #[test]
    fn test_full_and_masks() {
        assert_eq!(FULL.count(), 225);
        assert_eq!(NOT_FIRST_COL.count(), 210);
        assert_eq!(NOT_LAST_TWO_COLS.count(), 195);
        assert!(!NOT_FIRST_COL.contains(mv(3, 0)));
        assert!(!NOT_LAST_COL.contains(mv(3, 14)));
        assert!(!NOT_FIRST_TWO_COLS.contains(mv(3, 1)));
        assert!(!NOT_LAST_TWO_COLS.contains(mv(3, 13)));
        assert_eq!((!Bitboard::new()).count(), 225);
    }

    #[test]
    fn test_shifts_cross_words() {
        let bb = Bitboard::single(Move::from_index(63).unwrap());
        assert_eq!(bb.shl(1), Bitboard::single(Move::from_index(64).unwrap()));
        assert_eq!(bb.shl(30), Bitboard::single(Move::from_index(93).unwrap()));

        let bb = Bitboard::single(Move::from_index(130).unwrap());
        assert_eq!(bb.shr(3), Bitboard::single(Move::from_index(127).unwrap()));
    }

    #[test]
    fn test_shl_drops_off_board() {
        let bb = Bitboard::single(mv(14, 3));
        assert!(bb.shl(15).is_empty());
        assert!(bb.shr(15).contains(mv(13, 3)));
    }

    #[test]
    fn test_iter_and_nth_agree() {
        let bb = cells(&[(0, 1), (4, 4), (9, 0), (14, 14)]);
        let ones: Vec<_> = bb.iter_ones().collect();
        assert_eq!(ones, vec![mv(0, 1), mv(4, 4), mv(9, 0), mv(14, 14)]);
        for (n, &cell) in ones.iter().enumerate() {
            assert_eq!(bb.nth(n), Some(cell));
        }
        assert_eq!(bb.nth(4), None);
    }

    #[test]
    fn test_dilate_centre() {
        let shell = dilate(Bitboard::single(mv(7, 7)));
        assert_eq!(shell.count(), 8);
        for dr in 6..=8 {
            for dc in 6..=8 {
                assert_eq!(shell.contains(mv(dr, dc)), (dr, dc) != (7, 7));
            }
        }
    }

    #[test]
    fn test_dilate_edges_do_not_wrap() {
        // Right edge: nothing may appear in column 0
        let shell = dilate(Bitboard::single(mv(5, 14)));
        assert_eq!(shell, cells(&[(4, 13), (4, 14), (5, 13), (6, 13), (6, 14)]));

        // Left edge: nothing may appear in column 14
        let shell = dilate(Bitboard::single(mv(5, 0)));
        assert_eq!(shell, cells(&[(4, 0), (4, 1), (5, 1), (6, 0), (6, 1)]));

        // Corners
        assert_eq!(dilate(Bitboard::single(mv(0, 0))).count(), 3);
        assert_eq!(dilate(Bitboard::single(mv(14, 14))).count(), 3);
    }

    #[test]
    fn test_five_on_every_axis() {
        assert!(has_five(cells(&[(3, 2), (3, 3), (3, 4), (3, 5), (3, 6)])));
        assert!(has_five(cells(&[(2, 9), (3, 9), (4, 9), (5, 9), (6, 9)])));
        assert!(has_five(cells(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)])));
        assert!(has_five(cells(&[(1, 8), (2, 7), (3, 6), (4, 5), (5, 4)])));
    }

    #[test]
    fn test_five_touching_edges() {
        assert!(has_five(cells(&[(0, 10), (0, 11), (0, 12), (0, 13), (0, 14)])));
        assert!(has_five(cells(&[(14, 0), (14, 1), (14, 2), (14, 3), (14, 4)])));
        assert!(has_five(cells(&[(10, 14), (11, 13), (12, 12), (13, 11), (14, 10)])));
        assert!(has_five(cells(&[(10, 10), (11, 11), (12, 12), (13, 13), (14, 14)])));
    }

    #[test]
    fn test_four_is_not_five() {
        assert!(!has_five(cells(&[(3, 2), (3, 3), (3, 4), (3, 5)])));
        assert!(!has_five(cells(&[(3, 2), (3, 3), (3, 4), (3, 5), (3, 7)])));
        assert!(!has_five(cells(&[(1, 1), (2, 2), (3, 3), (4, 4), (6, 6)])));
    }

    #[test]
    fn test_row_straddling_run_is_not_five() {
        // Contiguous in flat index space: 42, 43, 44, 45, 46
        let straddle = cells(&[(2, 12), (2, 13), (2, 14), (3, 0), (3, 1)]);
        assert!(!has_five(straddle));

        let straddle = cells(&[(2, 14), (3, 0), (3, 1), (3, 2), (3, 3)]);
        assert!(!has_five(straddle));
    }

    #[test]
    fn test_diagonal_wrap_is_not_five() {
        // Index steps of 16 that cross the right edge
        let wrap = cells(&[(0, 12), (1, 13), (2, 14), (4, 0), (5, 1)]);
        assert!(!has_five(wrap));
        // Index steps of 14 that cross the left edge
        let wrap = cells(&[(0, 2), (1, 1), (2, 0), (2, 14), (3, 13)]);
        assert!(!has_five(wrap));
    }

    #[test]
    fn test_six_counts_as_win() {
        assert!(has_five(cells(&[(8, 0), (8, 1), (8, 2), (8, 3), (8, 4), (8, 5)])));
    }
}
