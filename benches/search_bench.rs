use criterion::{criterion_group, criterion_main, Criterion, black_box};
use isolation::search::alphabeta::{Algorithm, SearchParams, Searcher};
use isolation::search::eval::ImprovedScore;
use isolation::{Board, Move};

fn opening() -> Board {
    Board::default().apply_move(Move::new(3, 3)).apply_move(Move::new(2, 5))
}

fn bench_search(c: &mut Criterion) {
    let b = opening();
    let h = ImprovedScore;
    c.bench_function("alphabeta_depth_5_opening", |ben| {
        ben.iter(|| {
            let mut s = Searcher::new(&h);
            let r = s.search_depth(black_box(&b), 5, Algorithm::AlphaBeta).unwrap();
            black_box(r.nodes)
        })
    });
    c.bench_function("minimax_depth_4_opening", |ben| {
        ben.iter(|| {
            let mut s = Searcher::new(&h);
            let r = s.search_depth(black_box(&b), 4, Algorithm::Minimax).unwrap();
            black_box(r.nodes)
        })
    });
    c.bench_function("iterative_deepening_max_depth_5", |ben| {
        ben.iter(|| {
            let p = SearchParams { max_depth: Some(5), time_limit: None, ..SearchParams::default() };
            let r = Searcher::new(&h).select_move(black_box(&b), p);
            black_box(r.nodes)
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
