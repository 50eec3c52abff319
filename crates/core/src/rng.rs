//! RNG module - seeded tile generation
//!
//! Tiles are dealt from a 12-card deck (four each of 1, 2 and 3), reshuffled when
//! empty, so small tiles appear at a steady rate. The deck is shuffled by a small
//! PCG generator that is fully determined by its seed.

use crate::board::Rank;

/// PCG-style generator seeded through a Murmur3 avalanche.
#[derive(Debug, Clone)]
pub struct Pcg32 {
    state: u64,
    increment: u64,
}

impl Pcg32 {
    const MULTIPLIER: u64 = 0x5851_f42d_4c95_7f2d;

    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        let mixed = murmur3_avalanche64((u64::from(seed) << 1) | 1);
        let mut rng = Self {
            state: 0,
            increment: (mixed << 1) | 1,
        };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(murmur3_avalanche64(mixed));
        rng.next_u32();
        rng
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(self.increment);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

fn murmur3_avalanche64(mut value: u64) -> u64 {
    value ^= value >> 33;
    value = value.wrapping_mul(0xff51_afd7_ed55_8ccd);
    value ^= value >> 33;
    value = value.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    value ^= value >> 33;
    value
}

/// Cards in one deck.
pub const DECK_SIZE: usize = 12;

/// 12-card deck of small tiles.
#[derive(Debug, Clone)]
pub struct TileDeck {
    cards: [Rank; DECK_SIZE],
    remaining: usize,
}

impl TileDeck {
    /// A freshly shuffled deck.
    pub fn new(rng: &mut Pcg32) -> Self {
        let mut deck = Self {
            cards: [0; DECK_SIZE],
            remaining: 0,
        };
        deck.reset(rng);
        deck
    }

    /// Refill with four each of 1, 2 and 3, then shuffle.
    pub fn reset(&mut self, rng: &mut Pcg32) {
        for (i, card) in self.cards.iter_mut().enumerate() {
            *card = (i / (DECK_SIZE / 3)) as Rank + 1;
        }
        rng.shuffle(&mut self.cards);
        self.remaining = DECK_SIZE;
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Deal the next card, reshuffling first when the deck ran out.
    pub fn draw(&mut self, rng: &mut Pcg32) -> Rank {
        if self.is_empty() {
            self.reset(rng);
        }
        self.remaining -= 1;
        self.cards[self.remaining]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Pcg32::new(12345);
        let mut b = Pcg32::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_seeds_diverge() {
        let mut a = Pcg32::new(1);
        let mut b = Pcg32::new(2);
        let same = (0..32).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 4);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = Pcg32::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(4) < 4);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Pcg32::new(99);
        let mut values: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_deck_deals_four_of_each() {
        let mut rng = Pcg32::new(3);
        let mut deck = TileDeck::new(&mut rng);
        let mut counts = [0usize; 4];
        for _ in 0..DECK_SIZE {
            counts[deck.draw(&mut rng) as usize] += 1;
        }
        assert!(deck.is_empty());
        assert_eq!(counts, [0, 4, 4, 4]);
    }

    #[test]
    fn test_deck_reshuffles_when_empty() {
        let mut rng = Pcg32::new(3);
        let mut deck = TileDeck::new(&mut rng);
        for _ in 0..DECK_SIZE {
            deck.draw(&mut rng);
        }
        let card = deck.draw(&mut rng);
        assert!((1..=3).contains(&card));
        assert_eq!(deck.remaining(), DECK_SIZE - 1);
    }
}
