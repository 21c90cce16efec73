//! The `Game` external collaborator (spec.md §6): street layout, blinds and
//! card counts that every other component is parameterized over. The real
//! production system loads this from a bespoke game-parameter file format
//! that spec.md §1 places out of scope; `ConfiguredGame` reads the same
//! handful of fields from the minimal `config::Params` reader instead.

use crate::config::Params;
use crate::error::Result;

/// A street index in `[0, MaxStreet]`. Street 0 is preflop.
pub type Street = u8;

pub trait Game {
    fn num_players(&self) -> usize;
    fn max_street(&self) -> Street;
    fn max_card(&self) -> u8;
    fn num_ranks(&self) -> u8;
    fn num_suits(&self) -> u8;
    fn small_blind(&self) -> i32;
    fn big_blind(&self) -> i32;
    fn game_name(&self) -> &str;

    /// The seat that acts first on the given street.
    fn first_to_act(&self, st: Street) -> usize;

    /// How many new cards are dealt for the given street: 2 hole cards per
    /// seat on street 0 handled separately by the caller; this is the board
    /// increment (0/3/1/1 for a standard preflop/flop/turn/river layout).
    fn num_cards_for_street(&self, st: Street) -> usize;

    /// Cumulative board cards visible by the end of the given street.
    fn num_board_cards(&self, st: Street) -> usize;

    /// Number of distinct (unordered, non-canonicalized) hole-card pairs a
    /// single seat can hold, used to size per-board HCP tables.
    fn num_hole_card_pairs(&self, st: Street) -> usize;
}

#[derive(Debug, Clone)]
pub struct ConfiguredGame {
    num_players: usize,
    max_street: Street,
    num_ranks: u8,
    num_suits: u8,
    small_blind: i32,
    big_blind: i32,
    game_name: String,
    first_to_act: Vec<usize>,
    /// Cumulative board-card counts by street, e.g. `[0, 3, 4, 5]`.
    board_cards_by_street: Vec<usize>,
}

impl ConfiguredGame {
    /// Builds the game straight from already-parsed fields; used by tests
    /// and by `initialize` below.
    pub fn new(
        num_players: usize,
        num_ranks: u8,
        num_suits: u8,
        small_blind: i32,
        big_blind: i32,
        game_name: String,
    ) -> Self {
        ConfiguredGame {
            num_players,
            max_street: 3,
            num_ranks,
            num_suits,
            small_blind,
            big_blind,
            game_name,
            // Big blind acts last preflop in heads-up play; small blind
            // (the dealer, heads-up) acts first post-flop.
            first_to_act: vec![1, 0, 0, 0],
            board_cards_by_street: vec![0, 3, 4, 5],
        }
    }

    /// `Game::Initialize(params)` (spec.md §6): reads the handful of fields
    /// this evaluator needs from a parameter file.
    pub fn initialize(params: &Params) -> Result<Self> {
        let num_players = params.get_u32("num_players", 2)? as usize;
        let num_ranks = params.get_u32("num_ranks", 13)? as u8;
        let num_suits = params.get_u32("num_suits", 4)? as u8;
        let small_blind = params.get_i32("small_blind", 50)?;
        let big_blind = params.get_i32("big_blind", 100)?;
        let game_name = params.get_str("game_name", "holdem");
        Ok(Self::new(num_players, num_ranks, num_suits, small_blind, big_blind, game_name))
    }
}

impl Game for ConfiguredGame {
    fn num_players(&self) -> usize {
        self.num_players
    }

    fn max_street(&self) -> Street {
        self.max_street
    }

    fn max_card(&self) -> u8 {
        self.num_ranks * self.num_suits - 1
    }

    fn num_ranks(&self) -> u8 {
        self.num_ranks
    }

    fn num_suits(&self) -> u8 {
        self.num_suits
    }

    fn small_blind(&self) -> i32 {
        self.small_blind
    }

    fn big_blind(&self) -> i32 {
        self.big_blind
    }

    fn game_name(&self) -> &str {
        &self.game_name
    }

    fn first_to_act(&self, st: Street) -> usize {
        self.first_to_act[st as usize % self.first_to_act.len()]
    }

    fn num_cards_for_street(&self, st: Street) -> usize {
        if st == 0 {
            2 * self.num_players
        } else {
            self.board_cards_by_street[st as usize] - self.board_cards_by_street[st as usize - 1]
        }
    }

    fn num_board_cards(&self, st: Street) -> usize {
        self.board_cards_by_street[st as usize]
    }

    fn num_hole_card_pairs(&self, st: Street) -> usize {
        let _ = st;
        let n = (self.num_ranks as usize) * (self.num_suits as usize);
        n * (n - 1) / 2
    }
}
