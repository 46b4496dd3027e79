//! RNG module - deterministic piece generation
//!
//! A small LCG drives every random choice so the same seed replays the same
//! game. The `Randomizer` turns it into a piece stream according to the
//! configured `PieceRule`:
//!
//! - **Uniform**: each kind with probability 1/7, independent draws
//! - **Bag7**: a shuffled bag of all seven kinds, refilled when empty
//! - **Sequence**: a fixed cycle of kinds

use crate::config::PieceRule;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of a power-of-two LCG cycle quickly; take the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Piece stream for a session
#[derive(Debug, Clone)]
pub struct Randomizer {
    rule: PieceRule,
    rng: SimpleRng,
    seed: u32,
    bag: [PieceKind; 7],
    /// Index into `bag` for Bag7, or into the sequence for Sequence
    cursor: usize,
}

impl Randomizer {
    pub fn new(rule: PieceRule, seed: u32) -> Self {
        let mut randomizer = Self {
            rule,
            rng: SimpleRng::new(seed),
            seed,
            bag: PieceKind::ALL,
            cursor: 0,
        };
        if randomizer.rule == PieceRule::Bag7 {
            randomizer.refill_bag();
        }
        randomizer
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match &self.rule {
            PieceRule::Uniform => {
                let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[idx]
            }
            PieceRule::Bag7 => {
                if self.cursor >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.cursor];
                self.cursor += 1;
                kind
            }
            PieceRule::Sequence(kinds) => {
                // Config validation guarantees a non-empty sequence.
                let kind = kinds
                    .get(self.cursor % kinds.len().max(1))
                    .copied()
                    .unwrap_or(PieceKind::I);
                self.cursor = self.cursor.wrapping_add(1);
                kind
            }
        }
    }

    pub fn rule(&self) -> &PieceRule {
        &self.rule
    }

    /// Seed the randomizer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_uniform_covers_all_kinds() {
        let mut randomizer = Randomizer::new(PieceRule::Uniform, 42);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let kind = randomizer.draw();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_uniform_deterministic() {
        let mut a = Randomizer::new(PieceRule::Uniform, 99);
        let mut b = Randomizer::new(PieceRule::Uniform, 99);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut randomizer = Randomizer::new(PieceRule::Bag7, 1);

        for _ in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| randomizer.draw()).collect();
            drawn.sort_by_key(|k| k.as_str());
            drawn.dedup();
            assert_eq!(drawn.len(), 7);
        }
    }

    #[test]
    fn test_sequence_cycles() {
        let mut randomizer =
            Randomizer::new(PieceRule::Sequence(vec![PieceKind::O, PieceKind::T]), 1);
        assert_eq!(randomizer.draw(), PieceKind::O);
        assert_eq!(randomizer.draw(), PieceKind::T);
        assert_eq!(randomizer.draw(), PieceKind::O);
        assert_eq!(randomizer.seed(), 1);
    }
}
