//! Isolation rules on a rectangular grid.
//!
//! Both pieces start off the board. A player whose piece is unplaced may move to any
//! blank cell; afterwards the piece moves like a chess knight. Every cell a piece has
//! stood on stays blocked for the rest of the game, and the active player without a
//! legal move loses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::search::zobrist;

mod cells;

pub use cells::CellSet;

pub const MAX_SIDE: usize = 16;
pub const MAX_CELLS: usize = MAX_SIDE * MAX_SIDE;
pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 7;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self { Player::One => Player::Two, Player::Two => Player::One }
    }

    pub fn index(self) -> usize {
        match self { Player::One => 0, Player::Two => 1 }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Player::One => write!(f, "1"), Player::Two => write!(f, "2") }
    }
}

/// A move is the destination cell of the active player's piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub fn new(row: u8, col: u8) -> Self { Self { row, col } }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable game state. Applying a move yields a new board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    blocked: CellSet,
    locations: [Option<Move>; 2],
    active: Player,
    move_count: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH as u8,
            height: DEFAULT_HEIGHT as u8,
            blocked: CellSet::default(),
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(GameError::InvalidDimensions { width, height, max: MAX_SIDE });
        }
        Ok(Self { width: width as u8, height: height as u8, ..Self::default() })
    }

    /// Build a position by blocking `blocked` cells up front, then replaying `moves`.
    pub fn from_moves(width: usize, height: usize, blocked: &[Move], moves: &[Move]) -> Result<Self, GameError> {
        let mut board = Self::new(width, height)?;
        for &cell in blocked {
            if !board.in_bounds(cell) {
                return Err(GameError::IllegalMove { mv: cell, player: board.active });
            }
            let idx = board.cell_index(cell);
            board.blocked.insert(idx);
        }
        for &mv in moves { board = board.try_apply_move(mv)?; }
        Ok(board)
    }

    pub fn width(&self) -> usize { self.width as usize }
    pub fn height(&self) -> usize { self.height as usize }
    pub fn active_player(&self) -> Player { self.active }
    pub fn inactive_player(&self) -> Player { self.active.other() }
    pub fn move_count(&self) -> u32 { self.move_count }
    pub fn location(&self, player: Player) -> Option<Move> { self.locations[player.index()] }
    pub fn blocked(&self) -> &CellSet { &self.blocked }

    pub fn cell_count(&self) -> usize { self.width() * self.height() }

    pub(crate) fn cell_index(&self, cell: Move) -> usize {
        cell.row as usize * self.width() + cell.col as usize
    }

    pub fn in_bounds(&self, cell: Move) -> bool {
        (cell.row as usize) < self.height() && (cell.col as usize) < self.width()
    }

    pub fn is_blank(&self, cell: Move) -> bool {
        self.in_bounds(cell) && !self.blocked.contains(self.cell_index(cell))
    }

    /// Blank cells in row-major order.
    pub fn blank_cells(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(self.cell_count() - self.blocked.len());
        for r in 0..self.height {
            for c in 0..self.width {
                let m = Move::new(r, c);
                if self.is_blank(m) { out.push(m); }
            }
        }
        out
    }

    pub fn blank_count(&self) -> usize { self.cell_count() - self.blocked.len() }

    /// Blank knight destinations from `from`, in fixed offset order.
    pub fn knight_targets(&self, from: Move) -> Vec<Move> {
        let mut out = Vec::with_capacity(8);
        for &(dr, dc) in &KNIGHT_OFFSETS {
            let r = from.row as i32 + dr;
            let c = from.col as i32 + dc;
            if r < 0 || c < 0 { continue; }
            let m = Move::new(r as u8, c as u8);
            if self.is_blank(m) { out.push(m); }
        }
        out
    }

    /// Legal moves of the active player, in stable order.
    pub fn legal_moves(&self) -> Vec<Move> { self.legal_moves_for(self.active) }

    pub fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        match self.location(player) {
            None => self.blank_cells(),
            Some(loc) => self.knight_targets(loc),
        }
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        match self.location(player) {
            None => self.blank_count() > 0,
            Some(loc) => KNIGHT_OFFSETS.iter().any(|&(dr, dc)| {
                let r = loc.row as i32 + dr;
                let c = loc.col as i32 + dc;
                r >= 0 && c >= 0 && self.is_blank(Move::new(r as u8, c as u8))
            }),
        }
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        match self.location(self.active) {
            None => self.is_blank(mv),
            Some(loc) => {
                let dr = mv.row as i32 - loc.row as i32;
                let dc = mv.col as i32 - loc.col as i32;
                KNIGHT_OFFSETS.contains(&(dr, dc)) && self.is_blank(mv)
            }
        }
    }

    /// Move the active piece to `mv` and pass the turn. `mv` must come from
    /// [`Board::legal_moves`]; use [`Board::try_apply_move`] for untrusted input.
    pub fn apply_move(&self, mv: Move) -> Board {
        debug_assert!(self.is_legal(mv), "illegal move {mv} for player {}", self.active);
        let mut next = *self;
        let idx = self.cell_index(mv);
        next.blocked.insert(idx);
        next.locations[self.active.index()] = Some(mv);
        next.active = self.active.other();
        next.move_count += 1;
        next
    }

    pub fn try_apply_move(&self, mv: Move) -> Result<Board, GameError> {
        if !self.is_legal(mv) {
            return Err(GameError::IllegalMove { mv, player: self.active });
        }
        Ok(self.apply_move(mv))
    }

    pub fn is_loser(&self, player: Player) -> bool {
        self.active == player && !self.has_legal_move(player)
    }

    pub fn is_winner(&self, player: Player) -> bool { self.is_loser(player.other()) }

    pub fn winner(&self) -> Option<Player> {
        if self.has_legal_move(self.active) { None } else { Some(self.active.other()) }
    }

    pub fn is_over(&self) -> bool { !self.has_legal_move(self.active) }

    /// +inf if `player` has won, -inf if lost, 0 while the game is running.
    pub fn utility(&self, player: Player) -> f64 {
        match self.winner() {
            Some(w) if w == player => f64::INFINITY,
            Some(_) => f64::NEG_INFINITY,
            None => 0.0,
        }
    }

    pub fn fingerprint(&self) -> u64 { zobrist::compute(self) }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let m = Move::new(r, c);
                let ch = if self.locations[0] == Some(m) {
                    '1'
                } else if self.locations[1] == Some(m) {
                    '2'
                } else if self.is_blank(m) {
                    '.'
                } else {
                    '-'
                };
                if c > 0 { write!(f, " ")?; }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_targets_from_corner() {
        let b = Board::default();
        let t = b.knight_targets(Move::new(0, 0));
        assert_eq!(t, vec![Move::new(1, 2), Move::new(2, 1)]);
    }

    #[test]
    fn display_marks_pieces_and_blocked_cells() {
        let b = Board::new(3, 3).unwrap();
        let b = b.apply_move(Move::new(0, 0));
        let b = b.apply_move(Move::new(1, 1));
        let b = b.apply_move(Move::new(1, 2));
        assert_eq!(b.to_string(), "- . .\n. 2 1\n. . .\n");
    }
}
