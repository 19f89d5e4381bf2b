use clap::Parser;
use isolation::arena::random_opening;
use isolation::search::alphabeta::{SearchParams, Searcher};
use isolation::search::eval;
use isolation::search::tt::Tt;
use isolation::Board;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "isolation-bench", version, about = "Benchmark iterative-deepening search speed")]
struct Args {
    /// Board width
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = 7)]
    height: usize,

    /// Heuristic name
    #[arg(long, default_value = "improved")]
    heuristic: String,

    /// Time limit in milliseconds (ignored if depth is set)
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Fixed maximum depth (overrides movetime when > 0)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Use a transposition table
    #[arg(long, default_value_t = false)]
    use_tt: bool,

    /// Transposition table size in MB (approximate)
    #[arg(long, default_value_t = 16)]
    hash_mb: usize,

    /// Seed for the random opening
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let h = eval::by_name(&args.heuristic).ok_or_else(|| anyhow::anyhow!("unknown heuristic '{}'", args.heuristic))?;
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let board = random_opening(&Board::new(args.width, args.height)?, &mut rng);

    let mut tt = Tt::new();
    tt.set_capacity_mb(args.hash_mb);
    let mut s = Searcher::new(h.as_ref());
    if args.use_tt { s = s.with_tt(&tt); }
    let mut p = SearchParams { use_tt: args.use_tt, ..SearchParams::default() };
    if args.depth > 0 {
        p.max_depth = Some(args.depth);
        p.time_limit = None;
    } else {
        p.time_limit = Some(Duration::from_millis(args.movetime));
    }

    let t0 = Instant::now();
    let res = s.select_move(&board, p);
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    println!(
        "bestmove={} score={} depth={} nodes={} elapsed={:.3}s nps={:.1}",
        res.best_move.map(|m| m.to_string()).unwrap_or_else(|| "(none)".to_string()),
        res.score, res.depth, res.nodes, dt.as_secs_f64(), nps
    );
    Ok(())
}
