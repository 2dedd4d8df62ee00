//! KINROW Core - Adversarial search engine
//!
//! This crate provides generic two-player, zero-sum game search and a
//! k-in-a-row game to drive it:
//! - Immutable board with order-independent equality and hashing
//! - Line detection for k marks in a row
//! - The `Game` abstraction and its k-in-a-row implementation
//! - Depth-bounded minimax and alpha-beta, both memoized per search call
//! - Heuristics for cut-off positions
//! - Player policies and a turn-taking game driver

pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod play;
pub mod policy;
pub mod search;
pub mod win;

// Re-exports for convenient access
pub use board::{Board, Cell, Mark, Square, LINE_DIRECTIONS};
pub use config::{GameConfig, HeuristicKind, PlayerConfig, Strategy};
pub use error::{GameError, SearchError};
pub use eval::{BoardHeuristic, Heuristic, OpenLines, ZeroHeuristic};
pub use game::{Game, KInARow, MAX_BOARD_SQUARES};
pub use play::{play_game, GameRecord, Strategies};
pub use policy::{Policy, RandomPolicy, SearchPolicy};
pub use search::{
    alphabeta_search, cutoff_depth, minimax_search, AlphaBeta, Cutoff, DepthCutoff, Minimax,
    SearchAlgorithm, SearchResult, SearchStats,
};
pub use win::{has_k_in_row, run_length};
