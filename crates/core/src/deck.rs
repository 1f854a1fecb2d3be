use crate::{Card, Rank, Suit};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// The 52-card French deck, suit by suit in rank order.
pub fn standard_pack() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}

/// A seeded shuffle of [`standard_pack`]. The same seed always yields the
/// same order, which is what deals and tests rely on.
pub fn shuffled_pack(seed: u64) -> Vec<Card> {
    let mut cards = standard_pack();
    let mut rng = StdRng::seed_from_u64(seed);
    cards.shuffle(&mut rng);
    cards
}
