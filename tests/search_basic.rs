use isolation::{Board, Move, Player};
use std::time::Duration;

fn line() -> Vec<Move> {
    [(0, 0), (1, 2), (2, 1), (2, 0), (0, 2), (0, 1), (1, 0), (2, 2)]
        .iter().map(|&(r, c)| Move::new(r, c)).collect()
}

#[test]
fn terminal_state_returns_without_recursion() {
    use isolation::search::alphabeta::{Algorithm, Searcher};
    use isolation::search::eval::ImprovedScore;
    let b = Board::from_moves(3, 3, &[], &line()).unwrap();
    let h = ImprovedScore;
    let mut s = Searcher::new(&h);
    for algo in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let v = s.evaluate(&b, 5, algo, Player::One).unwrap();
        assert_eq!(v, f64::NEG_INFINITY);
        assert_eq!(s.nodes(), 1, "terminal node should not expand children");
    }
}

#[test]
fn select_move_on_terminal_state_returns_none() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    let b = Board::from_moves(3, 3, &[], &line()).unwrap();
    let h = ImprovedScore;
    let r = Searcher::new(&h).select_move(&b, SearchParams::default());
    assert_eq!(r.best_move, None);
    assert_eq!(r.nodes, 0);
    assert_eq!(isolation::select_move(&b, &h, Duration::from_millis(50)), None);
}

#[test]
fn single_legal_move_is_returned_regardless_of_heuristic() {
    use isolation::search::eval::{CenterScore, NullScore, OpenMoveScore};
    // Six of nine cells used; player one at (0, 2) can only reach (1, 0).
    let b = Board::from_moves(3, 3, &[], &line()[..6]).unwrap();
    assert_eq!(b.legal_moves(), vec![Move::new(1, 0)]);
    let anti = |_: &Board, _: Player| -> f64 { -1000.0 };
    let hs: Vec<&dyn isolation::Heuristic> = vec![&NullScore, &OpenMoveScore, &CenterScore, &anti];
    for h in hs {
        assert_eq!(isolation::select_move(&b, h, Duration::from_millis(100)), Some(Move::new(1, 0)));
    }
}

#[test]
fn single_legal_move_reports_heuristic_score() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::{ImprovedScore, OpenMoveScore};
    // (1, 0) leaves player two at (2, 0) with no knight move.
    let b = Board::from_moves(3, 3, &[], &line()[..6]).unwrap();
    let r = Searcher::new(&ImprovedScore).select_move(&b, SearchParams::default());
    assert_eq!(r.best_move, Some(Move::new(1, 0)));
    assert_eq!(r.depth, 0);
    assert_eq!(r.score, f64::INFINITY);
    assert!(r.proven);

    // Finite when the move does not end the game.
    // Player one at (0, 0) with (2, 1) blocked can only reach (1, 2).
    let b = Board::from_moves(5, 5, &[Move::new(2, 1)], &[Move::new(0, 0), Move::new(4, 4)]).unwrap();
    assert_eq!(b.legal_moves().len(), 1);
    let r = Searcher::new(&OpenMoveScore).select_move(&b, SearchParams::default());
    let next = b.apply_move(r.best_move.unwrap());
    assert_eq!(r.score, next.legal_moves_for(Player::One).len() as f64);
    assert!(!r.proven);
}

#[test]
fn unbounded_time_limit_does_not_overflow_deadline() {
    use isolation::search::eval::OpenMoveScore;
    let b = Board::new(4, 4).unwrap().apply_move(Move::new(0, 0)).apply_move(Move::new(3, 3));
    let mv = isolation::select_move(&b, &OpenMoveScore, Duration::MAX).expect("legal move");
    assert!(b.is_legal(mv));
}

#[test]
fn interrupted_iteration_is_discarded() {
    use isolation::search::alphabeta::{Algorithm, SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    let b = Board::default().apply_move(Move::new(3, 3)).apply_move(Move::new(2, 2));
    let h = ImprovedScore;
    for ms in [20, 35, 60, 90] {
        let params = SearchParams { time_limit: Some(Duration::from_millis(ms)), ..SearchParams::default() };
        let timed = Searcher::new(&h).select_move(&b, params);
        assert!(timed.depth >= 1, "{ms} ms should finish depth 1");
        let full = Searcher::new(&h).search_depth(&b, timed.depth, Algorithm::AlphaBeta).unwrap();
        assert_eq!(timed.best_move, full.best_move, "{ms} ms budget, depth {}", timed.depth);
        assert_eq!(timed.score, full.score);
    }
}

#[test]
fn center_heuristic_prefers_center_at_depth_one() {
    use isolation::search::alphabeta::{Algorithm, SearchParams, Searcher};
    use isolation::search::eval::{CenterScore, Heuristic};
    let b = Board::default();
    let h = CenterScore;
    let corner = h.score(&b.apply_move(Move::new(0, 0)), Player::One);
    let center = h.score(&b.apply_move(Move::new(3, 3)), Player::One);
    assert!(center > corner);

    let mut s = Searcher::new(&h);
    let r = s.search_depth(&b, 1, Algorithm::AlphaBeta).unwrap();
    assert_eq!(r.best_move, Some(Move::new(3, 3)));

    let params = SearchParams { max_depth: Some(1), time_limit: Some(Duration::from_secs(5)), ..SearchParams::default() };
    let r = Searcher::new(&h).select_move(&b, params);
    assert_eq!(r.best_move, Some(Move::new(3, 3)));
    assert_eq!(r.depth, 1);
}

#[test]
fn near_zero_time_limit_still_returns_legal_move() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    let b = Board::default().apply_move(Move::new(3, 3)).apply_move(Move::new(2, 2));
    let h = ImprovedScore;
    let params = SearchParams { time_limit: Some(Duration::from_millis(1)), ..SearchParams::default() };
    let r = Searcher::new(&h).select_move(&b, params);
    let mv = r.best_move.expect("fallback move");
    assert!(b.is_legal(mv));
    assert_eq!(r.depth, 0, "no iteration can finish inside the timer threshold");
    assert_eq!(mv, b.legal_moves()[0]);

    let mv = isolation::select_move(&b, &h, Duration::ZERO).expect("fallback move");
    assert!(b.is_legal(mv));
}

#[test]
fn repeated_search_is_idempotent() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    let b = Board::new(5, 5).unwrap().apply_move(Move::new(2, 2)).apply_move(Move::new(0, 1));
    let h = ImprovedScore;
    let params = SearchParams { max_depth: Some(4), time_limit: Some(Duration::from_secs(30)), ..SearchParams::default() };
    let r1 = Searcher::new(&h).select_move(&b, params);
    let r2 = Searcher::new(&h).select_move(&b, params);
    assert_eq!(r1.best_move, r2.best_move);
    assert_eq!(r1.score, r2.score);
    assert!(r1.depth >= 1 && r1.depth <= 4);
    assert_eq!(r1.depth, r2.depth);
}

#[test]
fn small_board_is_solved_without_limits() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::OpenMoveScore;
    let b = Board::new(4, 4).unwrap().apply_move(Move::new(0, 0)).apply_move(Move::new(3, 3));
    let h = OpenMoveScore;
    let params = SearchParams { max_depth: None, time_limit: None, ..SearchParams::default() };
    let r = Searcher::new(&h).select_move(&b, params);
    assert!(r.proven);
    assert!(r.score.is_infinite());
    assert!(b.is_legal(r.best_move.unwrap()));
}

#[test]
fn search_returns_within_time_budget() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    use std::time::Instant;
    let b = Board::default();
    let h = ImprovedScore;
    let params = SearchParams { time_limit: Some(Duration::from_millis(100)), ..SearchParams::default() };
    let t0 = Instant::now();
    let r = Searcher::new(&h).select_move(&b, params);
    let elapsed = t0.elapsed();
    assert!(r.best_move.is_some());
    assert!(elapsed < Duration::from_millis(300), "search exceeded time: {:?}", elapsed);
}

#[test]
fn finds_immediate_win() {
    use isolation::search::alphabeta::{Algorithm, Searcher};
    use isolation::search::eval::NullScore;
    // Player two's only move (2, 2) leaves player one at (1, 0) stuck.
    let b = Board::from_moves(3, 3, &[], &line()[..7]).unwrap();
    assert_eq!(b.active_player(), Player::Two);
    let h = NullScore;
    let r = Searcher::new(&h).search_depth(&b, 2, Algorithm::AlphaBeta).unwrap();
    assert_eq!(r.best_move, Some(Move::new(2, 2)));
    assert_eq!(r.score, f64::INFINITY);
    assert!(r.proven);
}
