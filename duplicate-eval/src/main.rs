//! CLI entry point (spec.md §6.1): wires every external collaborator
//! together from on-disk parameter files and runs the Top-Level Loop.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use duplicate_eval::board_tree::InMemoryBoardTree;
use duplicate_eval::canonical::SortedHcpTable;
use duplicate_eval::config::Params;
use duplicate_eval::deal::{
    all_hole_pairs,
    go,
    EvaluatorInputs,
};
use duplicate_eval::error::{
    Error,
    Result,
};
use duplicate_eval::game::{
    ConfiguredGame,
    Game,
};
use duplicate_eval::hand_value::SimpleHandValueTree;
use duplicate_eval::prng::Prng;
use duplicate_eval::strategy::{
    Buckets,
    NoAbstractionBuckets,
    TableBuckets,
    TableCfrValues,
};
use duplicate_eval::tree_builder::{
    build_limit_tree,
    BettingAbstractionConfig,
};

/// `<prog> <game params> <A card params> <B card params> <A betting params>
/// <B betting params> <A CFR params> <B CFR params> <A it> <B it>
/// <num duplicate hands> <action sequence>` (spec.md §6.1).
#[derive(Parser)]
#[command(name = "duplicate-eval")]
struct Args {
    game_params: PathBuf,
    a_card_params: PathBuf,
    b_card_params: PathBuf,
    a_betting_params: PathBuf,
    b_betting_params: PathBuf,
    a_cfr_dir: PathBuf,
    b_cfr_dir: PathBuf,
    a_it: i32,
    b_it: i32,
    num_duplicate_hands: i64,
    action_sequence: String,
}

/// `<A/B card params>`'s only evaluator-relevant field: an optional path to a
/// JSON bucket map (`[[street, composite_index, bucket], ...]`); absent means
/// "no abstraction on every street", the card-abstraction counterpart of
/// `NoAbstractionBuckets`.
fn load_buckets(params: &Params) -> Result<Box<dyn Buckets>> {
    let bucket_file = match params.get("bucket_file") {
        None => return Ok(Box::new(NoAbstractionBuckets)),
        Some(path) => PathBuf::from(path),
    };
    let text = std::fs::read_to_string(&bucket_file)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", bucket_file.display(), e)))?;
    let rows: Vec<(u8, usize, usize)> = serde_json::from_str(&text)
        .map_err(|e| Error::Config(format!("malformed bucket file {}: {}", bucket_file.display(), e)))?;
    let mut table = std::collections::HashMap::with_capacity(rows.len());
    for (st, composite_index, bucket) in rows {
        table.insert((st, composite_index), bucket);
    }
    Ok(Box::new(TableBuckets::new(table)))
}

fn run(args: Args) -> Result<()> {
    let game_params = Params::read_from_file(&args.game_params)?;
    let game = ConfiguredGame::initialize(&game_params)?;

    let a_card_params = Params::read_from_file(&args.a_card_params)?;
    let b_card_params = Params::read_from_file(&args.b_card_params)?;
    let buckets_a = load_buckets(&a_card_params)?;
    let buckets_b = load_buckets(&b_card_params)?;

    let a_betting_params = Params::read_from_file(&args.a_betting_params)?;
    let b_betting_params = Params::read_from_file(&args.b_betting_params)?;
    let a_config = BettingAbstractionConfig::initialize(&a_betting_params, &game)?;
    let b_config = BettingAbstractionConfig::initialize(&b_betting_params, &game)?;
    let a_tree = build_limit_tree(&game, &a_config);
    let b_tree = build_limit_tree(&game, &b_config);
    let a_root = a_tree.root();
    let b_root = b_tree.root();

    let cfr_a = TableCfrValues::read(&args.a_cfr_dir, args.a_it, "x")?;
    let cfr_b = TableCfrValues::read(&args.b_cfr_dir, args.b_it, "x")?;

    let hand_value = SimpleHandValueTree::new(game.num_ranks(), game.num_suits());
    let mut board_tree = InMemoryBoardTree::new();
    let mut sorted_hcps = SortedHcpTable::new();
    let deck_size = (game.num_ranks() as usize) * (game.num_suits() as usize);
    let hole_pairs = all_hole_pairs(deck_size);

    let inputs = EvaluatorInputs {
        game: &game,
        hand_value: &hand_value,
        a_root: &a_root,
        b_root: &b_root,
        cfr_a: &cfr_a,
        cfr_b: &cfr_b,
        buckets_a: buckets_a.as_ref(),
        buckets_b: buckets_b.as_ref(),
    };

    let mut prng = Prng::from_wall_clock();
    let agg = go(
        &inputs,
        &mut board_tree,
        &mut sorted_hcps,
        &hole_pairs,
        args.num_duplicate_hands,
        &args.action_sequence,
        &mut prng,
    )?;

    if let (Some(avg), Some(reach)) = (agg.average(), agg.reach()) {
        println!("Avg P1 target outcome: {}  ({})", avg, agg.num_target_p1_outcomes);
        println!(
            "P1 target reach: {}  ({}/{})",
            reach, agg.num_target_p1_outcomes, agg.num_duplicate_hands
        );
    }

    Ok(())
}

/// Parses argv, mapping a `clap` failure onto `Error::Usage` (wrong argv
/// count or an unknown flag) or `Error::Parse` (an argument that failed to
/// parse as an integer). `--help`/`--version` still print and exit 0.
fn parse_args() -> Result<Args> {
    use clap::error::ErrorKind;
    Args::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{}", e);
            std::process::exit(0);
        }
        ErrorKind::ValueValidation | ErrorKind::InvalidValue => Error::Parse(e.to_string()),
        _ => Error::Usage(e.to_string()),
    })
}

fn try_main() -> Result<()> {
    let args = parse_args()?;
    if args.num_duplicate_hands < 0 {
        return Err(Error::Parse("num_duplicate_hands must be >= 0".to_string()));
    }
    run(args)
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
