//! Zobrist keys for position fingerprints.
//!
//! One random key per (intersection, stone color). A fingerprint is the XOR
//! of the keys of all occupied intersections, so two boards with the same
//! layout always hash equal, and distinct layouts collide only with
//! probability around 2^-64.

use crate::color::Color;
use crate::constants::ZOBRIST_SEED;

/// Digest of a full board layout. Only used to compare positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(pub u64);

#[derive(Clone, Debug)]
pub struct ZobristTable {
    keys: Vec<[u64; 2]>,
}

impl ZobristTable {
    /// Build the table for a board with `cells` intersections.
    ///
    /// The seed depends only on the cell count, so boards of equal size share
    /// identical keys.
    pub fn new(cells: usize) -> Self {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED ^ cells as u64);
        let keys = (0..cells).map(|_| [rng.u64(..), rng.u64(..)]).collect();
        Self { keys }
    }

    /// Key of `color` at the row-major cell index. Empty contributes nothing.
    #[inline]
    pub fn key(&self, index: usize, color: Color) -> u64 {
        match color {
            Color::Empty => 0,
            Color::Black => self.keys[index][0],
            Color::White => self.keys[index][1],
        }
    }

    /// Fold a row-major sequence of colors into a fingerprint.
    pub fn hash<I>(&self, colors: I) -> Fingerprint
    where
        I: IntoIterator<Item = Color>,
    {
        let h = colors
            .into_iter()
            .enumerate()
            .fold(0u64, |h, (i, c)| h ^ self.key(i, c));
        Fingerprint(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_size_same_keys() {
        let a = ZobristTable::new(81);
        let b = ZobristTable::new(81);
        for i in 0..81 {
            assert_eq!(a.key(i, Color::Black), b.key(i, Color::Black));
            assert_eq!(a.key(i, Color::White), b.key(i, Color::White));
        }
    }

    #[test]
    fn test_empty_contributes_nothing() {
        let t = ZobristTable::new(9);
        assert_eq!(t.hash(vec![Color::Empty; 9]), Fingerprint(0));
    }

    #[test]
    fn test_colors_hash_differently() {
        let t = ZobristTable::new(9);
        let mut black = vec![Color::Empty; 9];
        black[4] = Color::Black;
        let mut white = vec![Color::Empty; 9];
        white[4] = Color::White;
        assert_ne!(t.hash(black), t.hash(white));
    }
}
