pub mod aggregator;
pub mod board_tree;
pub mod canonical;
pub mod cards;
pub mod config;
pub mod deal;
pub mod deck;
pub mod duplicate;
pub mod error;
pub mod game;
pub mod hand_value;
pub mod prng;
pub mod strategy;
pub mod terminal;
pub mod tree;
pub mod tree_builder;
pub mod walker;
