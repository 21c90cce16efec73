//! Builds a concrete, configurable-depth two-player limit betting tree.
//!
//! spec.md places the real `BettingTree::Create` (loaded from a betting
//! abstraction file) out of scope; this is the from-parameters stand-in,
//! grounded on the `Action`/`Rule`/`Abstraction` shapes in
//! `cfr/src/games/texas_holdem/{rule,abstraction}.rs`, generalized from
//! pot-relative bet sizing to fixed-limit bet sizing per street (the
//! simplest abstraction that still exercises every node accessor the Tree
//! Walker needs, including non-aligned bet-size successors across A and B
//! when their `BettingAbstractionConfig`s differ).

use std::rc::Rc;

use crate::config::Params;
use crate::error::Result;
use crate::game::{
    Game,
    Street,
};
use crate::tree::{
    Arena,
    BettingTree,
};

#[derive(Debug, Clone)]
pub struct BettingAbstractionConfig {
    /// Fixed raise increment on each street (e.g. `[100, 100, 200, 200]` for
    /// standard fixed-limit hold'em, small bet preflop/flop, big bet
    /// turn/river).
    pub bet_size_by_street: Vec<i32>,
    pub max_raises_per_street: u32,
}

impl BettingAbstractionConfig {
    pub fn initialize(params: &Params, game: &dyn Game) -> Result<Self> {
        let small = params.get_i32("small_bet", game.big_blind())?;
        let big = params.get_i32("big_bet", 2 * game.big_blind())?;
        let max_raises = params.get_u32("max_raises_per_street", 3)?;
        let mut bet_size_by_street = vec![small; (game.max_street() as usize) + 1];
        for st in bet_size_by_street.iter_mut().skip(2) {
            *st = big;
        }
        Ok(BettingAbstractionConfig {
            bet_size_by_street,
            max_raises_per_street: max_raises,
        })
    }

    fn bet_size(&self, st: Street) -> i32 {
        self.bet_size_by_street[st as usize]
    }
}

pub fn build_limit_tree(game: &dyn Game, config: &BettingAbstractionConfig) -> Rc<BettingTree> {
    let mut arena = Arena::new();
    let first = game.first_to_act(0);
    let to_call = game.big_blind() - game.small_blind();
    let root = build_decision(
        &mut arena,
        game,
        config,
        0,
        first,
        to_call,
        game.big_blind(),
        0,
        false,
    );
    arena.finish(root)
}

#[allow(clippy::too_many_arguments)]
fn build_decision(
    arena: &mut Arena,
    game: &dyn Game,
    config: &BettingAbstractionConfig,
    street: Street,
    player_acting: usize,
    to_call: i32,
    bet_to: i32,
    raises_so_far: u32,
    street_has_acted: bool,
) -> usize {
    let next_player = 1 - player_acting;
    let mut succs = vec![];
    let mut names = vec![];
    let mut fold_succ_index = None;
    let call_succ_index;

    if to_call > 0 {
        let idx = arena.push_fold_terminal(street, bet_to - to_call);
        fold_succ_index = Some(succs.len());
        succs.push(idx);
        names.push("f".to_string());
    }

    {
        let new_bet_to = bet_to;
        let street_over = to_call > 0 || street_has_acted;
        let idx = if street_over {
            advance_after_call(arena, game, config, street, new_bet_to)
        } else {
            build_decision(arena, game, config, street, next_player, 0, new_bet_to, raises_so_far, true)
        };
        call_succ_index = Some(succs.len());
        succs.push(idx);
        names.push("c".to_string());
    }

    if raises_so_far < config.max_raises_per_street {
        // The non-acting player's contribution always already equals
        // `bet_to` (only one side can owe chips at a time), so its
        // shortfall against the new high-water mark is just the raise
        // increment, independent of what the raiser itself owed.
        let new_bet_to = bet_to + config.bet_size(street);
        let new_to_call = new_bet_to - bet_to;
        let idx = build_decision(
            arena,
            game,
            config,
            street,
            next_player,
            new_to_call,
            new_bet_to,
            raises_so_far + 1,
            true,
        );
        succs.push(idx);
        names.push("r".to_string());
    }

    let default_succ_index = call_succ_index.unwrap();
    arena.push_nonterminal(street, player_acting, bet_to, succs, call_succ_index, fold_succ_index, default_succ_index, names)
}

fn advance_after_call(
    arena: &mut Arena,
    game: &dyn Game,
    config: &BettingAbstractionConfig,
    street: Street,
    bet_to: i32,
) -> usize {
    if street == game.max_street() {
        arena.push_showdown_terminal(street, bet_to)
    } else {
        let next_street = street + 1;
        let first = game.first_to_act(next_street);
        build_decision(arena, game, config, next_street, first, 0, bet_to, 0, false)
    }
}
