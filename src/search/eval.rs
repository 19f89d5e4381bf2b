//! Static evaluation functions.
//!
//! Every heuristic scores a board from the point of view of `player`. Decided
//! positions score `+inf`/`-inf` so a heuristic can stand in for the utility.

use crate::board::{Board, Move, Player};
use std::collections::HashSet;

pub const WIN_SCORE: f64 = f64::INFINITY;
pub const LOSS_SCORE: f64 = f64::NEG_INFINITY;

/// Pure evaluation of `(board, player)`.
pub trait Heuristic: Send + Sync {
    fn score(&self, board: &Board, player: Player) -> f64;

    fn name(&self) -> &str { "custom" }
}

impl<F> Heuristic for F
where
    F: Fn(&Board, Player) -> f64 + Send + Sync,
{
    fn score(&self, board: &Board, player: Player) -> f64 { self(board, player) }
}

fn decided(board: &Board, player: Player) -> Option<f64> {
    if board.is_loser(player) { return Some(LOSS_SCORE); }
    if board.is_winner(player) { return Some(WIN_SCORE); }
    None
}

fn mobility(board: &Board, player: Player) -> f64 {
    board.legal_moves_for(player).len() as f64
}

fn center_distance_sq(board: &Board, cell: Move) -> f64 {
    let cy = (board.height() as f64 - 1.0) / 2.0;
    let cx = (board.width() as f64 - 1.0) / 2.0;
    let dy = cell.row as f64 - cy;
    let dx = cell.col as f64 - cx;
    dy * dy + dx * dx
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullScore;

impl Heuristic for NullScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        decided(board, player).unwrap_or(0.0)
    }
    fn name(&self) -> &str { "null" }
}

/// Number of moves available to `player`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoveScore;

impl Heuristic for OpenMoveScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        decided(board, player).unwrap_or_else(|| mobility(board, player))
    }
    fn name(&self) -> &str { "open" }
}

/// Own moves minus opponent moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedScore;

impl Heuristic for ImprovedScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        decided(board, player)
            .unwrap_or_else(|| mobility(board, player) - mobility(board, player.other()))
    }
    fn name(&self) -> &str { "improved" }
}

/// Closer to the center is better: negative squared distance of the piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterScore;

impl Heuristic for CenterScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        if let Some(s) = decided(board, player) { return s; }
        match board.location(player) {
            Some(loc) => -center_distance_sq(board, loc),
            None => 0.0,
        }
    }
    fn name(&self) -> &str { "center" }
}

/// Own moves minus `weight` times opponent moves; `weight > 1` chases the opponent.
#[derive(Debug, Clone, Copy)]
pub struct AggressiveScore {
    pub weight: f64,
}

impl Default for AggressiveScore {
    fn default() -> Self { Self { weight: 2.0 } }
}

impl Heuristic for AggressiveScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        decided(board, player)
            .unwrap_or_else(|| mobility(board, player) - self.weight * mobility(board, player.other()))
    }
    fn name(&self) -> &str { "aggressive" }
}

/// Distinct cells reachable in at most two knight hops, own minus opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookaheadScore;

fn two_hop_reach(board: &Board, player: Player) -> usize {
    let first = board.legal_moves_for(player);
    if board.location(player).is_none() { return first.len(); }
    let mut seen: HashSet<Move> = first.iter().copied().collect();
    for &m in &first {
        seen.extend(board.knight_targets(m));
    }
    seen.len()
}

impl Heuristic for LookaheadScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        if let Some(s) = decided(board, player) { return s; }
        two_hop_reach(board, player) as f64 - two_hop_reach(board, player.other()) as f64
    }
    fn name(&self) -> &str { "lookahead" }
}

/// Improved score plus a center bonus that fades as the board fills up.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhasedScore;

impl Heuristic for PhasedScore {
    fn score(&self, board: &Board, player: Player) -> f64 {
        if let Some(s) = decided(board, player) { return s; }
        let mob = mobility(board, player) - mobility(board, player.other());
        let open_frac = board.blank_count() as f64 / board.cell_count() as f64;
        let center = match board.location(player) {
            Some(loc) => -center_distance_sq(board, loc),
            None => 0.0,
        };
        mob + open_frac * center * 0.5
    }
    fn name(&self) -> &str { "phased" }
}

pub const HEURISTIC_NAMES: &[&str] = &["null", "open", "improved", "center", "aggressive", "lookahead", "phased"];

pub fn by_name(name: &str) -> Option<Box<dyn Heuristic>> {
    let h: Box<dyn Heuristic> = match name {
        "null" => Box::new(NullScore),
        "open" => Box::new(OpenMoveScore),
        "improved" => Box::new(ImprovedScore),
        "center" => Box::new(CenterScore),
        "aggressive" => Box::new(AggressiveScore::default()),
        "lookahead" => Box::new(LookaheadScore),
        "phased" => Box::new(PhasedScore),
        _ => return None,
    };
    Some(h)
}
