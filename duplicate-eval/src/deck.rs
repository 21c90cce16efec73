//! Deck Sampler (spec.md §4.2): draws distinct cards from the deck without
//! replacement by rejection sampling, exactly as `Player::DealNCards` does
//! in `mc_node.cpp`.

use crate::cards::Card;
use crate::prng::Prng;

/// Fills a buffer of `n` distinct cards in `[0, max_card]`. For each slot,
/// draws `c = floor((max_card + 1) * next_double())` and rejects on
/// collision with any card already placed into the buffer so far. This is
/// not a uniform shuffle of the full deck — it is acceptable for Monte
/// Carlo simulation, per spec.md §4.2's own caveat, because `next_double()`
/// is only *approximately* uniform modulo `max_card + 1`.
pub fn deal_n(prng: &mut Prng, max_card: u8, n: usize) -> Vec<Card> {
    let domain = max_card as u32 + 1;
    let mut cards: Vec<Card> = Vec::with_capacity(n);
    for _ in 0..n {
        loop {
            let r = prng.next_double();
            let c = (domain as f64 * r) as u32;
            let card = Card(c as u8);
            if !cards.contains(&card) {
                cards.push(card);
                break;
            }
        }
    }
    cards
}
