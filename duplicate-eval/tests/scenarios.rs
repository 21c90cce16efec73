//! End-to-end scenario tests, one per named scenario (S3, S5, S6) and the
//! boundary behaviors not already exercised as unit tests alongside their
//! implementing modules (S1/S2/S4 have direct unit-test coverage in
//! `src/prng.rs` and `src/walker.rs`).

use std::collections::HashMap;

use duplicate_eval::aggregator::Aggregator;
use duplicate_eval::canonical::SortedHcpTable;
use duplicate_eval::cards::Card;
use duplicate_eval::duplicate::play_duplicate_hand;
use duplicate_eval::game::ConfiguredGame;
use duplicate_eval::hand_value::SimpleHandValueTree;
use duplicate_eval::prng::Prng;
use duplicate_eval::strategy::{
    offset,
    NoAbstractionBuckets,
    TableBuckets,
    TableCfrValues,
};
use duplicate_eval::tree::Arena;
use duplicate_eval::tree_builder::{
    build_limit_tree,
    BettingAbstractionConfig,
};

fn heads_up_game() -> ConfiguredGame {
    ConfiguredGame::new(2, 13, 4, 50, 100, "holdem".to_string())
}

fn no_raise_config() -> BettingAbstractionConfig {
    BettingAbstractionConfig {
        bet_size_by_street: vec![100, 100, 200, 200],
        max_raises_per_street: 0,
    }
}

/// Scenario S3: both strategies always call down to a forced tie.
#[test]
fn scenario_s3_call_down_tie_splits_every_sub_hand_evenly() {
    let game = heads_up_game();
    let config = no_raise_config();
    let tree = build_limit_tree(&game, &config);
    let root = tree.root();

    // Every decision node offers either [fold, call] (when some chips are
    // owed) or just [call] (a check, when nothing is owed yet this street);
    // putting all regret mass on "call" in both shapes forces the walker to
    // call down to showdown regardless of which shape it lands on.
    let mut regrets = HashMap::new();
    for nt in 0..10u32 {
        regrets.insert(nt, vec![0.0, 1.0, 1.0]);
    }
    let cfr = TableCfrValues::from_regrets(regrets);
    let buckets = NoAbstractionBuckets;

    let boards = vec![0usize; 1];
    let raw_hcps = vec![vec![0usize], vec![0usize]];
    let hvs = vec![7i32, 7i32]; // forced tie

    // One call closes the preflop blind; each of the three later streets
    // needs two calls (one per seat) to close, for 7 total decision visits.
    let target = "c".repeat(1 + 2 * game.max_street() as usize);
    let mut prng = Prng::seeded(3);
    let mut agg = Aggregator::new();
    agg.num_duplicate_hands = 1;
    play_duplicate_hand(
        &game, &root, &root, &cfr, &cfr, &buckets, &buckets, None, &boards, &raw_hcps, &hvs, &target, &mut prng,
        &mut agg,
    )
    .unwrap();

    assert_eq!(agg.num_target_p1_outcomes, 2);
    assert_eq!(agg.average(), Some(0.0));
}

/// Scenario S5: reach equals the exact fraction of sub-hands that visited
/// the target sequence.
#[test]
fn scenario_s5_reach_matches_k_over_2h() {
    let game = heads_up_game();
    let config = no_raise_config();
    let tree = build_limit_tree(&game, &config);
    let root = tree.root();

    let mut regrets = HashMap::new();
    for nt in 0..10u32 {
        regrets.insert(nt, vec![0.0, 1.0, 1.0]);
    }
    let cfr = TableCfrValues::from_regrets(regrets);
    let buckets = NoAbstractionBuckets;
    let boards = vec![0usize; 1];
    let raw_hcps = vec![vec![0usize], vec![0usize]];
    let hvs = vec![7i32, 7i32];

    let target = "c".repeat(1 + 2 * game.max_street() as usize);
    let mut prng = Prng::seeded(11);
    let mut agg = Aggregator::new();
    let num_duplicate_hands = 3;
    for _ in 0..num_duplicate_hands {
        play_duplicate_hand(
            &game, &root, &root, &cfr, &cfr, &buckets, &buckets, None, &boards, &raw_hcps, &hvs, &target, &mut prng,
            &mut agg,
        )
        .unwrap();
    }
    agg.num_duplicate_hands = num_duplicate_hands;

    assert_eq!(agg.num_target_p1_outcomes, 2 * num_duplicate_hands);
    assert_eq!(agg.reach(), Some(1.0));
}

/// Boundary: an empty target sequence matches only the root visit of each
/// sub-hand (action_sequence is "" only before the first action is taken),
/// so its reach is exactly N/2 for a 2-seat game.
#[test]
fn boundary_empty_target_sequence_counts_only_the_root_visit() {
    let game = heads_up_game();
    let mut arena = Arena::new();
    let leaf = arena.push_fold_terminal(0, 50);
    let root_idx = arena.push_nonterminal(0, 1, 100, vec![leaf, leaf], Some(1), Some(0), 1, vec!["f".into(), "c".into()]);
    let tree = arena.finish(root_idx);
    let root = tree.root();

    let mut regrets = HashMap::new();
    regrets.insert(0u32, vec![1.0, 0.0]);
    let cfr = TableCfrValues::from_regrets(regrets);
    let buckets = NoAbstractionBuckets;
    let boards = vec![0usize; 1];
    let raw_hcps = vec![vec![0usize], vec![0usize]];
    let hvs = vec![0i32, 0i32];

    let mut prng = Prng::seeded(5);
    let mut agg = Aggregator::new();
    agg.num_duplicate_hands = 1;
    play_duplicate_hand(
        &game, &root, &root, &cfr, &cfr, &buckets, &buckets, None, &boards, &raw_hcps, &hvs, "", &mut prng, &mut agg,
    )
    .unwrap();

    assert_eq!(agg.num_target_p1_outcomes, game.num_players() as i64);
    assert_eq!(agg.reach(), Some(game.num_players() as f64 / 2.0));
}

/// Boundary: zero duplicate hands means the driver is never invoked and the
/// aggregator reports nothing to print.
#[test]
fn boundary_zero_duplicate_hands_reports_nothing() {
    let agg = Aggregator::new();
    assert_eq!(agg.average(), None);
    assert_eq!(agg.reach(), None);
}

/// Scenario S6: a river strategy with no abstraction (indexed by sorted HCP)
/// must produce the same offsets as an equivalent bucket map that is the
/// identity permutation of that same sorted-HCP order.
#[test]
fn scenario_s6_bucketing_matches_sorted_hcp_when_identity_permutation() {
    let hv = SimpleHandValueTree::new(13, 4);
    let game = heads_up_game();
    let board = vec![Card(0), Card(4), Card(8), Card(12), Card(16)];

    // Every remaining card as a singleton "pair" would collide with itself,
    // so build hole pairs from the cards NOT on the board, in raw-HCP order
    // over the full 52-card deck.
    let deck_size = 52usize;
    let mut all_pairs = vec![];
    for a in 0..deck_size {
        for b in (a + 1)..deck_size {
            all_pairs.push([Card(a as u8), Card(b as u8)]);
        }
    }

    let mut sorted_hcps = SortedHcpTable::new();
    sorted_hcps.ensure(0, &board, &all_pairs, &hv, &game, 3);

    // Identity bucket map: bucket(st, bd * num_hcps + raw_hcp) == sorted_rank.
    let num_hcps = game.num_hole_card_pairs(3);
    let mut table = HashMap::new();
    for (raw_hcp, hole) in all_pairs.iter().enumerate() {
        if hole.iter().any(|c| board.contains(c)) {
            continue;
        }
        let rank = sorted_hcps.sorted_rank(0, raw_hcp);
        table.insert((3u8, raw_hcp), rank);
    }
    let bucket_buckets = TableBuckets::new(table);
    let no_abstraction = NoAbstractionBuckets;

    let k = 3; // arbitrary fold/call/raise width, same on both sides
    for raw_hcp in 0..all_pairs.len() {
        let hole = all_pairs[raw_hcp];
        if hole.iter().any(|c| board.contains(c)) {
            continue;
        }
        let sorted_hcp = sorted_hcps.sorted_rank(0, raw_hcp);
        let via_sorted = offset(&no_abstraction, 3, 0, num_hcps, raw_hcp, Some(sorted_hcp), k);
        let via_bucket = offset(&bucket_buckets, 3, 0, num_hcps, raw_hcp, None, k);
        assert_eq!(via_sorted, via_bucket, "raw_hcp {} disagreed", raw_hcp);
    }
}
