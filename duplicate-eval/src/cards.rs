//! The card data model (spec.md §3): "An integer in `[0, MaxCard]`
//! identifying a specific card. Suits and ranks decoded by the game
//! configuration." `Card` is deliberately a thin index type; only a
//! `Game`'s `num_ranks`/`num_suits` give it meaning.

use std::fmt;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Card(pub u8);

impl Card {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Decodes a `Card` into a `(rank, suit)` pair under the layout
/// `card = rank * num_suits + suit`, with rank 0 the lowest rank dealt
/// (e.g. deuce in a standard 52-card game with `num_ranks == 13`).
pub fn rank_suit(card: Card, num_suits: u8) -> (u8, u8) {
    let n = card.0;
    (n / num_suits, n % num_suits)
}

pub fn rank_char(rank: u8) -> char {
    match rank {
        8 => 'T',
        9 => 'J',
        10 => 'Q',
        11 => 'K',
        12 => 'A',
        x if x < 8 => (b'2' + x) as char,
        _ => '?',
    }
}

pub fn suit_char(suit: u8) -> char {
    match suit {
        0 => 's',
        1 => 'c',
        2 => 'h',
        3 => 'd',
        _ => '?',
    }
}

pub fn card_str(card: Card, num_suits: u8) -> String {
    let (rank, suit) = rank_suit(card, num_suits);
    let mut s = String::with_capacity(2);
    s.push(rank_char(rank));
    s.push(suit_char(suit));
    s
}

pub fn cards_str(cards: &[Card], num_suits: u8) -> String {
    cards.iter().map(|c| card_str(*c, num_suits)).collect()
}

/// Sorts cards in place by raw index, mirroring `SortCards` in
/// `mc_node.cpp`'s `Go` (hole cards, then each street's newly revealed
/// board segment, are each sorted independently before being used to index
/// into the hand indexer).
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_suit_round_trips() {
        for rank in 0..13u8 {
            for suit in 0..4u8 {
                let card = Card(rank * 4 + suit);
                assert_eq!(rank_suit(card, 4), (rank, suit));
            }
        }
    }

    #[test]
    fn sort_cards_orders_by_raw_index() {
        let mut cards = vec![Card(5), Card(1), Card(3)];
        sort_cards(&mut cards);
        assert_eq!(cards, vec![Card(1), Card(3), Card(5)]);
    }
}
