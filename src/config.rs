use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{Board, MAX_SIDE};
use crate::error::{ConfigError, GameError};
use crate::search::eval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Greedy,
    Minimax,
    #[value(name = "alphabeta")]
    AlphaBeta,
}

/// How to build one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpec {
    pub name: String,
    pub kind: AgentKind,
    pub heuristic: String,
    /// Search depth for `minimax`; ignored by the other kinds.
    pub depth: u32,
    pub use_tt: bool,
}

impl Default for AgentSpec {
    fn default() -> Self {
        AgentSpec {
            name: "AB_Improved".into(),
            kind: AgentKind::AlphaBeta,
            heuristic: "improved".into(),
            depth: 3,
            use_tt: false,
        }
    }
}

impl AgentSpec {
    pub fn new(name: &str, kind: AgentKind, heuristic: &str) -> Self {
        AgentSpec { name: name.into(), kind, heuristic: heuristic.into(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("agent name must not be empty".into()));
        }
        if self.kind != AgentKind::Random && eval::by_name(&self.heuristic).is_none() {
            return Err(ConfigError::UnknownHeuristic(self.heuristic.clone()));
        }
        if self.kind == AgentKind::Minimax && self.depth == 0 {
            return Err(ConfigError::Validation(format!("{}: depth must be > 0", self.name)));
        }
        Ok(())
    }
}

/// Round-robin tournament settings, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub width: usize,
    pub height: usize,
    pub time_limit_ms: u64,
    /// Rounds per pairing; each round is played twice with sides swapped.
    pub matches: usize,
    pub seed: u64,
    pub threads: usize,
    pub agents: Vec<AgentSpec>,
    pub opponents: Vec<AgentSpec>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        use AgentKind::*;
        TournamentConfig {
            width: 7,
            height: 7,
            time_limit_ms: 150,
            matches: 5,
            seed: 1,
            threads: 1,
            agents: vec![
                AgentSpec::new("AB_Improved", AlphaBeta, "improved"),
                AgentSpec::new("AB_Aggressive", AlphaBeta, "aggressive"),
                AgentSpec::new("AB_Lookahead", AlphaBeta, "lookahead"),
                AgentSpec::new("AB_Phased", AlphaBeta, "phased"),
            ],
            opponents: vec![
                AgentSpec::new("Random", Random, "null"),
                AgentSpec::new("MM_Open", Minimax, "open"),
                AgentSpec::new("MM_Center", Minimax, "center"),
                AgentSpec::new("MM_Improved", Minimax, "improved"),
                AgentSpec::new("AB_Open", AlphaBeta, "open"),
                AgentSpec::new("AB_Center", AlphaBeta, "center"),
                AgentSpec::new("AB_Improved", AlphaBeta, "improved"),
            ],
        }
    }
}

impl TournamentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TournamentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.width > MAX_SIDE || self.height > MAX_SIDE {
            return Err(GameError::InvalidDimensions { width: self.width, height: self.height, max: MAX_SIDE }.into());
        }
        if self.width * self.height < 2 {
            return Err(ConfigError::Validation("board needs at least two cells for an opening".into()));
        }
        if self.time_limit_ms == 0 {
            return Err(ConfigError::Validation("time_limit_ms must be > 0".into()));
        }
        if self.matches == 0 {
            return Err(ConfigError::Validation("matches must be > 0".into()));
        }
        if self.agents.is_empty() || self.opponents.is_empty() {
            return Err(ConfigError::Validation("agents and opponents must not be empty".into()));
        }
        for spec in self.agents.iter().chain(&self.opponents) { spec.validate()?; }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration { Duration::from_millis(self.time_limit_ms) }

    pub fn board(&self) -> Result<Board, GameError> { Board::new(self.width, self.height) }
}
