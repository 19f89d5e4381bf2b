//! Timed games between agents.

use std::time::{Duration, Instant};

use log::info;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agents::Agent;
use crate::board::{Board, Move, Player};

pub mod tournament;

pub use tournament::{run_tournament, run_tournament_with, AgentSummary, PairingResult, TournamentReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The loser had no legal move on its turn.
    NoLegalMoves,
    Timeout,
    IllegalMove,
    /// The agent returned no move although one existed.
    Forfeit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub first: String,
    pub second: String,
    /// Moves played by the agents, excluding any opening already on the board.
    pub moves: Vec<Move>,
    pub winner: Player,
    pub reason: EndReason,
}

impl GameRecord {
    pub fn plies(&self) -> usize { self.moves.len() }

    pub fn winner_name(&self) -> &str {
        match self.winner { Player::One => &self.first, Player::Two => &self.second }
    }
}

/// Play `board` to the end. `first` controls player one, `second` player two,
/// whichever side is to move. Exceeding `time_limit` on a move forfeits the game.
pub fn play_game(first: &mut dyn Agent, second: &mut dyn Agent, board: Board, time_limit: Duration) -> GameRecord {
    first.reset();
    second.reset();
    let mut board = board;
    let mut moves: Vec<Move> = Vec::new();
    let (winner, reason) = loop {
        let active = board.active_player();
        if !board.has_legal_move(active) { break (active.other(), EndReason::NoLegalMoves); }
        let agent: &mut dyn Agent = match active { Player::One => &mut *first, Player::Two => &mut *second };
        let t0 = Instant::now();
        let choice = agent.select(&board, time_limit);
        let elapsed = t0.elapsed();
        if elapsed > time_limit {
            info!("{} exceeded the time limit ({:?} > {:?})", agent.name(), elapsed, time_limit);
            break (active.other(), EndReason::Timeout);
        }
        let Some(mv) = choice else { break (active.other(), EndReason::Forfeit) };
        match board.try_apply_move(mv) {
            Ok(next) => {
                board = next;
                moves.push(mv);
            }
            Err(e) => {
                info!("{}: {}", agent.name(), e);
                break (active.other(), EndReason::IllegalMove);
            }
        }
    };
    GameRecord { first: first.name().to_string(), second: second.name().to_string(), moves, winner, reason }
}

/// Place both pieces on distinct random blank cells.
pub fn random_opening(board: &Board, rng: &mut SmallRng) -> Board {
    let mut b = *board;
    for _ in 0..2 {
        let moves = b.legal_moves();
        if moves.is_empty() { break; }
        b = b.apply_move(moves[rng.gen_range(0..moves.len())]);
    }
    b
}
