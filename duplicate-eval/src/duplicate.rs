//! Duplicate Driver (spec.md §4.6): for one already-dealt hand, plays `N`
//! sub-hands rotating which seat is occupied by strategy B, canceling
//! positional luck. Grounded on `Player::PlayDuplicateHand` in
//! `mc_node.cpp`.

use crate::aggregator::Aggregator;
use crate::canonical::SortedHcpTable;
use crate::error::Result;
use crate::game::Game;
use crate::prng::Prng;
use crate::strategy::{
    Buckets,
    CfrValues,
};
use crate::tree::NodeRef;
use crate::walker::{
    play,
    PlayState,
    WalkContext,
};

#[allow(clippy::too_many_arguments)]
pub fn play_duplicate_hand(
    game: &dyn Game,
    a_root: &NodeRef,
    b_root: &NodeRef,
    cfr_a: &dyn CfrValues,
    cfr_b: &dyn CfrValues,
    buckets_a: &dyn Buckets,
    buckets_b: &dyn Buckets,
    sorted_hcps: Option<&SortedHcpTable>,
    boards: &[usize],
    raw_hcps: &[Vec<usize>],
    hvs: &[i32],
    target: &str,
    prng: &mut Prng,
    agg: &mut Aggregator,
) -> Result<()> {
    let n = game.num_players();
    let big_blind_p = (game.first_to_act(0) + n - 1) % n;
    let small_blind_p = (big_blind_p + n - 1) % n;

    for b_pos in 0..n {
        let mut contributions = vec![0i32; n];
        contributions[small_blind_p] = game.small_blind();
        contributions[big_blind_p] = game.big_blind();
        let folded = vec![false; n];
        let nodes: Vec<NodeRef> = (0..n).map(|p| if p == b_pos { b_root.clone() } else { a_root.clone() }).collect();

        let ctx = WalkContext {
            game,
            cfr_a,
            cfr_b,
            buckets_a,
            buckets_b,
            sorted_hcps,
            boards,
            raw_hcps,
            hvs,
            b_pos,
            target,
        };
        let state = PlayState {
            nodes,
            contributions,
            folded,
            num_remaining: n,
            last_bet_to: game.big_blind(),
            last_player_acting: None,
            last_st: None,
            action_sequence: String::new(),
        };
        play(&ctx, state, prng, agg)?;
    }
    Ok(())
}
