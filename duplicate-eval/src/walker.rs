//! Tree Walker (spec.md §4.5): the reentrant traversal over the N seats'
//! synchronized betting-tree nodes. Ported field-for-field from
//! `Player::Play` in `mc_node.cpp`, including the one quirk worth calling
//! out: `num_succs` and `default_succ_index` are always read off seat 0's
//! node, never the acting seat's own node, even when the acting seat is
//! walking a structurally different (B) tree. The original carries this as
//! a documented assumption ("Won't work for asymmetric maybe"); this port
//! keeps it rather than silently correcting it, since `spec.md` §9 notes
//! asymmetric-strategy support is explicitly out of scope.

use more_asserts::assert_ge;

use crate::aggregator::Aggregator;
use crate::canonical::SortedHcpTable;
use crate::error::{
    Error,
    Result,
};
use crate::game::{
    Game,
    Street,
};
use crate::prng::Prng;
use crate::strategy::{
    offset,
    Buckets,
    CfrValues,
};
use crate::terminal;
use crate::tree::NodeRef;

pub struct WalkContext<'a> {
    pub game: &'a dyn Game,
    pub cfr_a: &'a dyn CfrValues,
    pub cfr_b: &'a dyn CfrValues,
    pub buckets_a: &'a dyn Buckets,
    pub buckets_b: &'a dyn Buckets,
    pub sorted_hcps: Option<&'a SortedHcpTable>,
    /// Per-street canonical board index for the current deal.
    pub boards: &'a [usize],
    /// `raw_hcps[seat][street]`.
    pub raw_hcps: &'a [Vec<usize>],
    /// Per-seat showdown hand value for the current deal.
    pub hvs: &'a [i32],
    pub b_pos: usize,
    pub target: &'a str,
}

#[derive(Clone)]
pub struct PlayState {
    pub nodes: Vec<NodeRef>,
    pub contributions: Vec<i32>,
    pub folded: Vec<bool>,
    pub num_remaining: usize,
    pub last_bet_to: i32,
    pub last_player_acting: Option<usize>,
    pub last_st: Option<Street>,
    pub action_sequence: String,
}

fn find_matching_succ(node: &NodeRef, new_bet_to: i32) -> Result<usize> {
    for ps in 0..node.num_succs() {
        if Some(ps) == node.call_succ_index() || Some(ps) == node.fold_succ_index() {
            continue;
        }
        if node.ith_succ(ps).last_bet_to() == new_bet_to {
            return Ok(ps);
        }
    }
    Err(Error::TreeMismatch(format!(
        "no successor with LastBetTo() == {} among this seat's non-call/fold successors",
        new_bet_to
    )))
}

pub fn play(ctx: &WalkContext, mut state: PlayState, prng: &mut Prng, agg: &mut Aggregator) -> Result<()> {
    if state.action_sequence == ctx.target {
        agg.num_target_p1_outcomes += 1;
    }

    if state.nodes[0].terminal() {
        let outcome = if state.num_remaining == 1 {
            terminal::fold_outcome(ctx.game.num_players(), &state.contributions, &state.folded)?
        } else {
            terminal::showdown_outcome(
                ctx.game.num_players(),
                &state.contributions,
                &state.folded,
                ctx.hvs,
                state.nodes[0].last_bet_to(),
            )?
        };
        if state.action_sequence == ctx.target {
            agg.sum_target_p1_outcomes += outcome;
        }
        return Ok(());
    }

    assert_ge!(state.num_remaining, 2);

    let st = state.nodes[0].street();
    let k = state.nodes[0].num_succs();
    let dsi = state.nodes[0].default_succ_index();

    let mut actual_pa = match state.last_st {
        None => ctx.game.first_to_act(st),
        Some(prev) if st > prev => ctx.game.first_to_act(st),
        Some(_) => (state.last_player_acting.unwrap() + 1) % ctx.game.num_players(),
    };
    while state.folded[actual_pa] {
        actual_pa = (actual_pa + 1) % ctx.game.num_players();
    }

    let bd = ctx.boards[st as usize];
    let raw_hcp = ctx.raw_hcps[actual_pa][st as usize];
    let num_hcps = ctx.game.num_hole_card_pairs(st);
    let sorted_hcp = if st == ctx.game.max_street() {
        ctx.sorted_hcps.map(|t| t.sorted_rank(bd, raw_hcp))
    } else {
        None
    };
    let a_offset = offset(ctx.buckets_a, st, bd, num_hcps, raw_hcp, sorted_hcp, k);
    let b_offset = offset(ctx.buckets_b, st, bd, num_hcps, raw_hcp, sorted_hcp, k);

    let acting_node = state.nodes[actual_pa].clone();
    let nt = acting_node.nonterminal_id();
    let node_pa = acting_node.player_acting();
    let r = prng.next_double();
    let probs = if actual_pa == ctx.b_pos {
        ctx.cfr_b.rm_probs(st, node_pa, nt, b_offset, k, dsi)?
    } else {
        ctx.cfr_a.rm_probs(st, node_pa, nt, a_offset, k, dsi)?
    };

    let mut cum = 0.0;
    let mut s = k - 1;
    for (i, p) in probs.iter().enumerate().take(k.saturating_sub(1)) {
        cum += p;
        if r < cum {
            s = i;
            break;
        }
    }

    let call_idx = acting_node.call_succ_index();
    let fold_idx = acting_node.fold_succ_index();

    let mut next_nodes = Vec::with_capacity(state.nodes.len());
    let mut seat0_action = String::new();

    if Some(s) == call_idx {
        for (p, node) in state.nodes.iter().enumerate() {
            let csi = node
                .call_succ_index()
                .ok_or_else(|| Error::TreeMismatch(format!("seat {} has no call successor", p)))?;
            next_nodes.push(node.ith_succ(csi));
            if p == 0 {
                seat0_action = node.action_name(csi).to_string();
            }
        }
        state.contributions[actual_pa] = state.last_bet_to;
    } else if Some(s) == fold_idx {
        for (p, node) in state.nodes.iter().enumerate() {
            let fsi = node
                .fold_succ_index()
                .ok_or_else(|| Error::TreeMismatch(format!("seat {} has no fold successor", p)))?;
            next_nodes.push(node.ith_succ(fsi));
            if p == 0 {
                seat0_action = node.action_name(fsi).to_string();
            }
        }
        state.folded[actual_pa] = true;
        state.num_remaining -= 1;
    } else {
        let new_bet_to = acting_node.ith_succ(s).last_bet_to();
        for (p, node) in state.nodes.iter().enumerate() {
            let ps = find_matching_succ(node, new_bet_to)?;
            next_nodes.push(node.ith_succ(ps));
            if p == 0 {
                seat0_action = node.action_name(ps).to_string();
            }
        }
        state.contributions[actual_pa] = new_bet_to;
        state.last_bet_to = new_bet_to;
    }

    state.nodes = next_nodes;
    state.last_player_acting = Some(actual_pa);
    state.last_st = Some(st);
    state.action_sequence.push_str(&seat0_action);

    play(ctx, state, prng, agg)
}
