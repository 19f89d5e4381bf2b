use isolation::{Board, Move};
use std::time::Duration;

fn position() -> Board {
    Board::default().apply_move(Move::new(3, 3)).apply_move(Move::new(2, 5))
}

#[test]
fn tt_exact_after_search() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    use isolation::search::tt::{Bound, Tt};
    use isolation::search::zobrist;
    let b = position();
    let tt = Tt::new();
    let h = ImprovedScore;
    let params = SearchParams { max_depth: Some(3), time_limit: None, use_tt: true, ..SearchParams::default() };
    let r = Searcher::new(&h).with_tt(&tt).select_move(&b, params);
    let key = zobrist::with_perspective(b.fingerprint(), b.active_player());
    let e = tt.get(key).expect("tt entry missing");
    assert_eq!(e.bound, Bound::Exact, "expected exact bound at the root");
    assert!(e.depth >= 3, "expected stored depth >= 3, got {}", e.depth);
    assert_eq!(e.best, r.best_move);
}

#[test]
fn tt_does_not_change_root_value() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    use isolation::search::tt::Tt;
    let b = position();
    let h = ImprovedScore;
    let params = SearchParams { max_depth: Some(4), time_limit: Some(Duration::from_secs(30)), ..SearchParams::default() };
    let plain = Searcher::new(&h).select_move(&b, params);
    let tt = Tt::new();
    let cached = Searcher::new(&h).with_tt(&tt).select_move(&b, SearchParams { use_tt: true, ..params });
    assert_eq!(plain.score, cached.score);
    assert_eq!(plain.depth, cached.depth);
    assert!(b.is_legal(cached.best_move.unwrap()));
}

#[test]
fn tt_ignored_unless_enabled() {
    use isolation::search::alphabeta::{SearchParams, Searcher};
    use isolation::search::eval::ImprovedScore;
    use isolation::search::tt::Tt;
    let tt = Tt::new();
    let h = ImprovedScore;
    let params = SearchParams { max_depth: Some(2), time_limit: None, use_tt: false, ..SearchParams::default() };
    Searcher::new(&h).with_tt(&tt).select_move(&position(), params);
    assert!(tt.is_empty());
}
