//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization used in modern Tetris.
//! Each bag holds one of each kind, shuffled. Pieces are drawn until the bag
//! is empty, and only then is a new bag shuffled. Refilling early would let a
//! kind repeat inside one bag, so the refill point is part of the contract.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// Pieces per bag
pub const BAG_SIZE: usize = PieceKind::ALL.len();

/// A fresh seed from the thread RNG, for live play.
pub fn random_seed() -> u64 {
    rand::random()
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current bag of pieces
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next piece to hand out
    bag_index: usize,
    rng: StdRng,
    seed: u64,
}

impl Bag {
    /// Create a bag whose shuffles are reproducible from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            bag: PieceKind::ALL,
            // Empty until the first draw shuffles.
            bag_index: BAG_SIZE,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.bag_index = 0;
    }

    /// Draw the next piece, shuffling a new bag only when the current one is empty
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= BAG_SIZE {
            self.refill();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> usize {
        BAG_SIZE - self.bag_index
    }

    /// The undrawn rest of the current bag, in draw order
    pub fn pending(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Seed this bag was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Iterator for Bag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_deterministic() {
        let a: Vec<_> = Bag::new(12345).take(70).collect();
        let b: Vec<_> = Bag::new(12345).take(70).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bag_starts_empty_and_fills_on_first_draw() {
        let mut bag = Bag::new(1);
        assert_eq!(bag.remaining(), 0);

        bag.draw();
        assert_eq!(bag.remaining(), 6);
        assert_eq!(bag.pending().len(), 6);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = Bag::new(1);

        let mut drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort();

        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_bag_does_not_refill_early() {
        let mut bag = Bag::new(7);
        bag.draw();
        let rest = bag.pending().to_vec();

        // The remaining six come out exactly as pending, with no reshuffle
        // until the bag is empty.
        for (i, expected) in rest.iter().enumerate() {
            assert_eq!(bag.remaining(), 6 - i);
            assert_eq!(bag.draw(), *expected);
        }
        assert_eq!(bag.remaining(), 0);

        bag.draw();
        assert_eq!(bag.remaining(), 6);
    }

    #[test]
    fn test_seed_is_reported() {
        assert_eq!(Bag::new(99).seed(), 99);
    }
}
