use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Move};
use crate::config::{AgentKind, AgentSpec};
use crate::error::ConfigError;
use crate::search::alphabeta::{deadline_after, Algorithm, SearchParams, Searcher, DEFAULT_TIMER_THRESHOLD};
use crate::search::eval::{self, Heuristic};
use crate::search::tt::Tt;

/// A move-selection strategy.
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Choose a move for the active player of `board`. `None` means the agent gives up.
    fn select(&mut self, board: &Board, time_limit: Duration) -> Option<Move>;

    /// Called before every game.
    fn reset(&mut self) {}
}

pub struct RandomAgent {
    name: String,
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(name: &str, seed: u64) -> Self {
        Self { name: name.to_string(), rng: SmallRng::seed_from_u64(seed) }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str { &self.name }

    fn select(&mut self, board: &Board, _time_limit: Duration) -> Option<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() { None } else { Some(moves[self.rng.gen_range(0..moves.len())]) }
    }
}

/// Picks the move whose resulting position scores best, one ply deep.
pub struct GreedyAgent {
    name: String,
    heuristic: Box<dyn Heuristic>,
}

impl GreedyAgent {
    pub fn new(name: &str, heuristic: Box<dyn Heuristic>) -> Self {
        Self { name: name.to_string(), heuristic }
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str { &self.name }

    fn select(&mut self, board: &Board, _time_limit: Duration) -> Option<Move> {
        let me = board.active_player();
        let mut best: Option<(Move, f64)> = None;
        for m in board.legal_moves() {
            let s = self.heuristic.score(&board.apply_move(m), me);
            if best.map_or(true, |(_, bs)| s > bs) { best = Some((m, s)); }
        }
        best.map(|(m, _)| m)
    }
}

/// Fixed-depth plain minimax. Falls back to the first legal move on timeout.
pub struct MinimaxAgent {
    name: String,
    heuristic: Box<dyn Heuristic>,
    depth: u32,
    timer_threshold: Duration,
}

impl MinimaxAgent {
    pub fn new(name: &str, heuristic: Box<dyn Heuristic>, depth: u32) -> Self {
        Self { name: name.to_string(), heuristic, depth, timer_threshold: DEFAULT_TIMER_THRESHOLD }
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str { &self.name }

    fn select(&mut self, board: &Board, time_limit: Duration) -> Option<Move> {
        let fallback = board.legal_moves().first().copied();
        let mut searcher = Searcher::new(self.heuristic.as_ref());
        searcher.set_deadline(deadline_after(Instant::now(), time_limit, self.timer_threshold));
        match searcher.search_depth(board, self.depth, Algorithm::Minimax) {
            Ok(r) => r.best_move,
            Err(_) => {
                log::debug!("{}: depth {} timed out, using fallback", self.name, self.depth);
                fallback
            }
        }
    }
}

/// Iterative-deepening alpha-beta; owns its transposition table when enabled.
pub struct AlphaBetaAgent {
    name: String,
    heuristic: Box<dyn Heuristic>,
    params: SearchParams,
    tt: Option<Tt>,
    last_depth: u32,
}

impl AlphaBetaAgent {
    pub fn new(name: &str, heuristic: Box<dyn Heuristic>) -> Self {
        Self { name: name.to_string(), heuristic, params: SearchParams::default(), tt: None, last_depth: 0 }
    }

    pub fn with_tt(mut self, tt: Tt) -> Self {
        self.tt = Some(tt);
        self.params.use_tt = true;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<u32>) -> Self {
        self.params.max_depth = depth;
        self
    }

    /// Depth reached by the most recent search.
    pub fn last_depth(&self) -> u32 { self.last_depth }
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str { &self.name }

    fn select(&mut self, board: &Board, time_limit: Duration) -> Option<Move> {
        let params = SearchParams { time_limit: Some(time_limit), ..self.params };
        let mut searcher = Searcher::new(self.heuristic.as_ref());
        if let Some(tt) = self.tt.as_ref() { searcher = searcher.with_tt(tt); }
        let r = searcher.select_move(board, params);
        self.last_depth = r.depth;
        r.best_move
    }

    fn reset(&mut self) {
        if let Some(tt) = self.tt.as_ref() { tt.clear(); }
        self.last_depth = 0;
    }
}

fn heuristic(spec: &AgentSpec) -> Result<Box<dyn Heuristic>, ConfigError> {
    eval::by_name(&spec.heuristic).ok_or_else(|| ConfigError::UnknownHeuristic(spec.heuristic.clone()))
}

/// Build an agent from its configuration. `seed` only matters for random agents.
pub fn build_agent(spec: &AgentSpec, seed: u64) -> Result<Box<dyn Agent>, ConfigError> {
    spec.validate()?;
    let agent: Box<dyn Agent> = match spec.kind {
        AgentKind::Random => Box::new(RandomAgent::new(&spec.name, seed)),
        AgentKind::Greedy => Box::new(GreedyAgent::new(&spec.name, heuristic(spec)?)),
        AgentKind::Minimax => Box::new(MinimaxAgent::new(&spec.name, heuristic(spec)?, spec.depth)),
        AgentKind::AlphaBeta => {
            let a = AlphaBetaAgent::new(&spec.name, heuristic(spec)?);
            if spec.use_tt { Box::new(a.with_tt(Tt::new())) } else { Box::new(a) }
        }
    };
    Ok(agent)
}
