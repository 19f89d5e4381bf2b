pub mod alphabeta;
pub mod eval;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{select_move, Algorithm, SearchParams, SearchResult, Searcher, Timeout};
pub use eval::Heuristic;
