use anyhow::{Context, Result};
use clap::Parser;
use isolation::agents::{build_agent, Agent};
use isolation::arena::{play_game, random_opening};
use isolation::config::{AgentKind, AgentSpec};
use isolation::Board;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play one game of Isolation between two agents", long_about = None)]
struct Args {
    /// Board width
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = 7)]
    height: usize,

    /// Time limit per move in milliseconds
    #[arg(long, default_value_t = 150)]
    time_limit_ms: u64,

    /// Agent controlling player one
    #[arg(long, value_enum, default_value_t = AgentKind::AlphaBeta)]
    p1: AgentKind,

    /// Heuristic for player one (null|open|improved|center|aggressive|lookahead|phased)
    #[arg(long, default_value = "improved")]
    p1_heuristic: String,

    /// Agent controlling player two
    #[arg(long, value_enum, default_value_t = AgentKind::Minimax)]
    p2: AgentKind,

    /// Heuristic for player two
    #[arg(long, default_value = "open")]
    p2_heuristic: String,

    /// Depth for minimax agents
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Use a transposition table for alpha-beta agents
    #[arg(long)]
    use_tt: bool,

    /// Start from two random placements instead of an empty board
    #[arg(long)]
    random_opening: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the board after every move
    #[arg(long)]
    verbose: bool,

    /// Optional: write the game record as JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn spec(name: &str, kind: AgentKind, heuristic: &str, args: &Args) -> AgentSpec {
    AgentSpec { depth: args.depth, use_tt: args.use_tt, ..AgentSpec::new(name, kind, heuristic) }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut board = Board::new(args.width, args.height)?;
    if args.random_opening {
        let mut rng = SmallRng::seed_from_u64(args.seed);
        board = random_opening(&board, &mut rng);
    }
    let p1_name = format!("P1_{:?}_{}", args.p1, args.p1_heuristic);
    let p2_name = format!("P2_{:?}_{}", args.p2, args.p2_heuristic);
    let mut p1: Box<dyn Agent> = build_agent(&spec(&p1_name, args.p1, &args.p1_heuristic, &args), args.seed)
        .context("building player one")?;
    let mut p2: Box<dyn Agent> = build_agent(&spec(&p2_name, args.p2, &args.p2_heuristic, &args), args.seed.wrapping_add(1))
        .context("building player two")?;

    println!("{} vs {} on {}x{}", p1.name(), p2.name(), args.width, args.height);
    println!("{}", board);
    let time_limit = Duration::from_millis(args.time_limit_ms);
    let record = play_game(p1.as_mut(), p2.as_mut(), board, time_limit);

    if args.verbose {
        let mut b = board;
        for (i, &mv) in record.moves.iter().enumerate() {
            b = b.apply_move(mv);
            println!("ply {}: player {} -> {}\n{}", i + 1, b.inactive_player(), mv, b);
        }
    }
    println!("Winner: {} (player {}) after {} plies, {:?}", record.winner_name(), record.winner, record.plies(), record.reason);

    if let Some(path) = args.json_out.as_ref() {
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
