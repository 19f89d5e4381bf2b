use crate::board::{Board, Move, Player};
use crate::search::eval::{Heuristic, LOSS_SCORE, WIN_SCORE};
use crate::search::tt::{Bound, Entry, Tt};
use crate::search::zobrist;
use log::debug;
use std::time::{Duration, Instant};

pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(150);
pub const DEFAULT_TIMER_THRESHOLD: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Plain minimax, every child expanded.
    Minimax,
    AlphaBeta,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub max_depth: Option<u32>,
    pub time_limit: Option<Duration>,
    /// Safety margin taken off `time_limit` so the answer lands before the budget runs out.
    pub timer_threshold: Duration,
    pub use_tt: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            time_limit: Some(DEFAULT_TIME_LIMIT),
            timer_threshold: DEFAULT_TIMER_THRESHOLD,
            use_tt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: f64,
    /// Deepest fully completed iteration; 0 when the fallback move is returned, in
    /// which case `score` is the heuristic value of the position after that move.
    pub depth: u32,
    pub nodes: u64,
    /// The score is a proven win or loss; deeper search cannot change it.
    pub proven: bool,
}

/// Deadline expired mid-search. Unwinds the recursion; never escapes `select_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout;

/// `start + limit - threshold`, or `None` when that lies beyond what `Instant` can hold.
pub fn deadline_after(start: Instant, limit: Duration, threshold: Duration) -> Option<Instant> {
    start.checked_add(limit.saturating_sub(threshold))
}

pub struct Searcher<'a> {
    heuristic: &'a dyn Heuristic,
    tt: Option<&'a Tt>,
    use_tt: bool,
    perspective: Player,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(heuristic: &'a dyn Heuristic) -> Self {
        Self { heuristic, tt: None, use_tt: false, perspective: Player::One, deadline: None, nodes: 0 }
    }

    /// Attach a transposition table. It is consulted only when `SearchParams::use_tt`
    /// is set (or always for `search_depth`).
    pub fn with_tt(mut self, tt: &'a Tt) -> Self {
        self.tt = Some(tt);
        self.use_tt = true;
        self
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn set_deadline(&mut self, deadline: Option<Instant>) { self.deadline = deadline; }

    /// Iterative deepening alpha-beta from depth 1 until the time budget, `max_depth`,
    /// or a proven result stops it. Only completed iterations contribute to the answer.
    pub fn select_move(&mut self, board: &Board, params: SearchParams) -> SearchResult {
        self.nodes = 0;
        self.perspective = board.active_player();
        self.use_tt = params.use_tt && self.tt.is_some();
        let moves = board.legal_moves();
        if moves.is_empty() {
            return SearchResult { best_move: None, score: board.utility(self.perspective), depth: 0, nodes: 0, proven: true };
        }
        let score = self.heuristic.score(&board.apply_move(moves[0]), self.perspective);
        let mut result = SearchResult { best_move: Some(moves[0]), score, depth: 0, nodes: 0, proven: false };
        if moves.len() == 1 {
            debug!("single legal move {}", moves[0]);
            result.proven = score.is_infinite();
            return result;
        }
        let start = Instant::now();
        self.deadline = params.time_limit.and_then(|t| deadline_after(start, t, params.timer_threshold));

        let mut depth = 1u32;
        loop {
            if let Some(max) = params.max_depth { if depth > max { break; } }
            if let Some(tt) = self.active_tt() { tt.bump_generation(); }
            match self.search_root(board, &moves, depth, Algorithm::AlphaBeta) {
                Ok((mv, score)) => {
                    result.best_move = Some(mv);
                    result.score = score;
                    result.depth = depth;
                    result.proven = score.is_infinite();
                    debug!("depth {} best {} score {} nodes {} elapsed {:?}", depth, mv, score, self.nodes, start.elapsed());
                    if result.proven { break; }
                }
                Err(Timeout) => {
                    debug!("timeout in depth {}, keeping depth {}", depth, result.depth);
                    break;
                }
            }
            depth += 1;
        }
        result.nodes = self.nodes;
        result
    }

    /// One fixed-depth search from the root using the current deadline.
    pub fn search_depth(&mut self, board: &Board, depth: u32, algorithm: Algorithm) -> Result<SearchResult, Timeout> {
        self.nodes = 0;
        self.perspective = board.active_player();
        self.use_tt = self.tt.is_some();
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Ok(SearchResult { best_move: None, score: board.utility(self.perspective), depth: 0, nodes: 0, proven: true });
        }
        let (mv, score) = self.search_root(board, &moves, depth.max(1), algorithm)?;
        Ok(SearchResult { best_move: Some(mv), score, depth: depth.max(1), nodes: self.nodes, proven: score.is_infinite() })
    }

    /// Value of `board` for the root player at `depth` plies. Public for equivalence testing.
    pub fn evaluate(&mut self, board: &Board, depth: u32, algorithm: Algorithm, perspective: Player) -> Result<f64, Timeout> {
        self.nodes = 0;
        self.perspective = perspective;
        match algorithm {
            Algorithm::Minimax => self.minimax(board, depth),
            Algorithm::AlphaBeta => self.alphabeta(board, depth, LOSS_SCORE, WIN_SCORE),
        }
    }

    fn active_tt(&self) -> Option<&'a Tt> {
        if self.use_tt { self.tt } else { None }
    }

    fn check_time(&self) -> Result<(), Timeout> {
        if let Some(dl) = self.deadline { if Instant::now() >= dl { return Err(Timeout); } }
        Ok(())
    }

    fn tt_key(&self, board: &Board) -> u64 {
        zobrist::with_perspective(board.fingerprint(), self.perspective)
    }

    fn tt_put(&self, board: &Board, depth: u32, score: f64, best: Option<Move>, bound: Bound) {
        if let Some(tt) = self.active_tt() {
            tt.put(Entry { key: self.tt_key(board), depth, score, best, bound, gen: 0 });
        }
    }

    fn hash_move_first(&self, board: &Board, moves: &mut [Move]) {
        let Some(tt) = self.active_tt() else { return };
        if let Some(ttm) = tt.get(self.tt_key(board)).and_then(|e| e.best) {
            if let Some(pos) = moves.iter().position(|&mv| mv == ttm) {
                moves[..=pos].rotate_right(1);
            }
        }
    }

    fn search_root(&mut self, board: &Board, moves: &[Move], depth: u32, algorithm: Algorithm) -> Result<(Move, f64), Timeout> {
        let mut ordered = moves.to_vec();
        self.hash_move_first(board, &mut ordered);
        self.nodes += 1;
        let mut alpha = LOSS_SCORE;
        let beta = WIN_SCORE;
        let mut best_move = ordered[0];
        let mut best = LOSS_SCORE;
        for &m in &ordered {
            self.check_time()?;
            let child = board.apply_move(m);
            let score = match algorithm {
                Algorithm::Minimax => self.minimax(&child, depth - 1)?,
                Algorithm::AlphaBeta => self.alphabeta(&child, depth - 1, alpha, beta)?,
            };
            if score > best { best = score; best_move = m; }
            if algorithm == Algorithm::AlphaBeta {
                if best > alpha { alpha = best; }
                if alpha >= beta { break; }
            }
        }
        self.tt_put(board, depth, best, Some(best_move), Bound::Exact);
        Ok((best_move, best))
    }

    fn minimax(&mut self, board: &Board, depth: u32) -> Result<f64, Timeout> {
        self.nodes += 1;
        let moves = board.legal_moves();
        if moves.is_empty() { return Ok(board.utility(self.perspective)); }
        if depth == 0 { return Ok(self.heuristic.score(board, self.perspective)); }
        let maximizing = board.active_player() == self.perspective;
        let mut best = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        for m in moves {
            self.check_time()?;
            let v = self.minimax(&board.apply_move(m), depth - 1)?;
            best = if maximizing { best.max(v) } else { best.min(v) };
        }
        Ok(best)
    }

    fn alphabeta(&mut self, board: &Board, depth: u32, mut alpha: f64, mut beta: f64) -> Result<f64, Timeout> {
        self.nodes += 1;
        let mut moves = board.legal_moves();
        if moves.is_empty() { return Ok(board.utility(self.perspective)); }
        if depth == 0 { return Ok(self.heuristic.score(board, self.perspective)); }

        if let Some(tt) = self.active_tt() {
            if let Some(en) = tt.get(self.tt_key(board)) {
                if en.depth >= depth {
                    match en.bound {
                        Bound::Exact => return Ok(en.score),
                        Bound::Lower => if en.score >= beta { return Ok(en.score); },
                        Bound::Upper => if en.score <= alpha { return Ok(en.score); },
                    }
                }
            }
            self.hash_move_first(board, &mut moves);
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let maximizing = board.active_player() == self.perspective;
        let mut value = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        let mut best_move: Option<Move> = None;
        for m in moves {
            self.check_time()?;
            let v = self.alphabeta(&board.apply_move(m), depth - 1, alpha, beta)?;
            if maximizing {
                if v > value || best_move.is_none() { value = v; best_move = Some(m); }
                if value > alpha { alpha = value; }
            } else {
                if v < value || best_move.is_none() { value = v; best_move = Some(m); }
                if value < beta { beta = value; }
            }
            if alpha >= beta { break; }
        }

        let bound = if value <= orig_alpha { Bound::Upper } else if value >= orig_beta { Bound::Lower } else { Bound::Exact };
        self.tt_put(board, depth, value, best_move, bound);
        Ok(value)
    }
}

/// Pick a move for the active player within `time_limit`. Returns `None` only when
/// the active player has no legal move.
pub fn select_move(board: &Board, heuristic: &dyn Heuristic, time_limit: Duration) -> Option<Move> {
    let params = SearchParams { time_limit: Some(time_limit), ..SearchParams::default() };
    Searcher::new(heuristic).select_move(board, params).best_move
}
