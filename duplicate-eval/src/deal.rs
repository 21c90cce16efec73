//! Top-Level Loop (spec.md §4.7): deals cards, computes hand values and
//! indices, runs the Duplicate Driver, and reports the aggregate EV and
//! reach of the target action sequence. Grounded on `Player::Go` in
//! `mc_node.cpp`.

use itertools::Itertools;
use log::debug;

use crate::aggregator::Aggregator;
use crate::board_tree::BoardTree;
use crate::canonical::{
    hcp_index,
    Canonicalizer,
    SortedHcpTable,
};
use crate::cards::{
    cards_str,
    sort_cards,
    Card,
};
use crate::deck::deal_n;
use crate::duplicate::play_duplicate_hand;
use crate::error::Result;
use crate::game::Game;
use crate::hand_value::HandValueTree;
use crate::prng::Prng;
use crate::strategy::{
    Buckets,
    CfrValues,
};
use crate::tree::NodeRef;

#[allow(clippy::too_many_arguments)]
pub struct EvaluatorInputs<'a> {
    pub game: &'a dyn Game,
    pub hand_value: &'a dyn HandValueTree,
    pub a_root: &'a NodeRef,
    pub b_root: &'a NodeRef,
    pub cfr_a: &'a dyn CfrValues,
    pub cfr_b: &'a dyn CfrValues,
    pub buckets_a: &'a dyn Buckets,
    pub buckets_b: &'a dyn Buckets,
}

/// `Player::Go`: deals `num_duplicate_hands` duplicate hands and
/// accumulates their target-sequence statistics into a fresh `Aggregator`.
pub fn go(
    inputs: &EvaluatorInputs,
    board_tree: &mut dyn BoardTree,
    sorted_hcps: &mut SortedHcpTable,
    all_hole_pairs: &[[Card; 2]],
    num_duplicate_hands: i64,
    target: &str,
    prng: &mut Prng,
) -> Result<Aggregator> {
    let game = inputs.game;
    let n = game.num_players();
    let max_street = game.max_street();
    let num_board_cards = game.num_board_cards(max_street);

    let mut agg = Aggregator::new();
    agg.num_duplicate_hands = num_duplicate_hands;

    for h in 0..num_duplicate_hands {
        let total_cards = 2 * n + num_board_cards;
        let mut dealt = deal_n(prng, game.max_card(), total_cards);

        let mut hole: Vec<[Card; 2]> = Vec::with_capacity(n);
        for p in 0..n {
            let pair = Canonicalizer::canonicalize_hole([dealt[2 * p], dealt[2 * p + 1]]);
            hole.push(pair);
        }
        let mut board: Vec<Card> = dealt.split_off(2 * n);
        // Sort each street's newly revealed segment independently, as
        // `SortCards` does per street in the original `Go`.
        let mut offset = 0usize;
        for st in 0..=max_street {
            let count = game.num_cards_for_street(st);
            if st == 0 {
                continue;
            }
            sort_cards(&mut board[offset..offset + count]);
            offset += count;
        }

        let deck_size = (game.num_ranks() as usize) * (game.num_suits() as usize);
        let mut boards_by_street = vec![0usize; max_street as usize + 1];
        let mut raw_hcps: Vec<Vec<usize>> = vec![vec![0usize; max_street as usize + 1]; n];
        for p in 0..n {
            let raw_hcp = hcp_index(hole[p], deck_size);
            for st in 0..=max_street {
                raw_hcps[p][st as usize] = raw_hcp;
            }
        }
        for st in 0..=max_street {
            let count = game.num_board_cards(st);
            let canon_board = Canonicalizer::canonicalize_board(&board[0..count]);
            let bd = board_tree.lookup_board(&canon_board);
            boards_by_street[st as usize] = bd;
            if st == max_street {
                sorted_hcps.ensure(bd, &canon_board, all_hole_pairs, inputs.hand_value, game, st);
            }
        }

        let mut hvs = vec![0i32; n];
        for p in 0..n {
            let mut seven = [Card(0); 7];
            seven[0] = hole[p][0];
            seven[1] = hole[p][1];
            for (i, c) in board.iter().take(5).enumerate() {
                seven[2 + i] = *c;
            }
            hvs[p] = inputs.hand_value.val(&seven);
        }

        let num_suits = game.num_suits();
        debug!(
            "deal {}: hole={:?} board={} boards_by_street={:?} hvs={:?}",
            h,
            hole.iter().map(|pair| cards_str(pair, num_suits)).collect::<Vec<_>>(),
            cards_str(&board, num_suits),
            boards_by_street,
            hvs
        );

        play_duplicate_hand(
            game,
            inputs.a_root,
            inputs.b_root,
            inputs.cfr_a,
            inputs.cfr_b,
            inputs.buckets_a,
            inputs.buckets_b,
            Some(sorted_hcps),
            &boards_by_street,
            &raw_hcps,
            &hvs,
            target,
            prng,
            &mut agg,
        )?;
    }

    Ok(agg)
}

/// Enumerates every unordered hole-card pair of a `num_cards`-card deck in
/// raw-HCP order, i.e. `all_hole_pairs()[hcp_index(pair, num_cards)] ==
/// pair`. Used to seed `SortedHcpTable::ensure`.
pub fn all_hole_pairs(num_cards: usize) -> Vec<[Card; 2]> {
    (0..num_cards as u8)
        .combinations(2)
        .map(|pair| [Card(pair[0]), Card(pair[1])])
        .collect()
}
