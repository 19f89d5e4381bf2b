use std::path::PathBuf;

use crate::board::{Move, Player};

/// Errors raised by the game rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal move {mv} for player {player}")]
    IllegalMove { mv: Move, player: Player },

    #[error("invalid board dimensions {width}x{height} (each side must be 1..={max})")]
    InvalidDimensions { width: usize, height: usize, max: usize },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("unknown heuristic '{0}'")]
    UnknownHeuristic(String),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("game error: {0}")]
    Game(#[from] GameError),
}

/// Errors raised while running a tournament.
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
