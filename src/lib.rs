// Isolation game agent: rules, heuristics, iterative-deepening alpha-beta search
pub mod agents;
pub mod arena;
pub mod board;
pub mod config;
pub mod error;
pub mod search;

pub use board::{Board, Move, Player};
pub use search::{select_move, Heuristic, SearchParams, SearchResult, Searcher};
