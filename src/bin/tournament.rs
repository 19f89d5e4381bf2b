use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use isolation::arena::run_tournament_with;
use isolation::config::TournamentConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "isolation-tournament", about = "Round-robin tournament: test agents vs baseline opponents")]
struct Args {
    /// Optional JSON config; the built-in roster is used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override: rounds per pairing (each round = two games, sides swapped)
    #[arg(long)]
    matches: Option<usize>,

    /// Override: time limit per move in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Override: worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Override: random seed for openings
    #[arg(long)]
    seed: Option<u64>,

    /// Optional: write the report as JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = match args.config.as_deref() {
        Some(p) => TournamentConfig::load(p).with_context(|| format!("loading {}", p.display()))?,
        None => TournamentConfig::default(),
    };
    if let Some(m) = args.matches { config.matches = m; }
    if let Some(t) = args.time_limit_ms { config.time_limit_ms = t; }
    if let Some(t) = args.threads { config.threads = t; }
    if let Some(s) = args.seed { config.seed = s; }

    let rounds = config.agents.len() * config.opponents.len() * config.matches;
    eprintln!(
        "Playing {} rounds ({} games) on {}x{}, {} ms/move, threads={}",
        rounds, rounds * 2, config.width, config.height, config.time_limit_ms, config.threads
    );
    let pb = ProgressBar::new(rounds as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} rounds [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let report = run_tournament_with(&config, || pb.inc(1))?;
    pb.finish_and_clear();

    println!("{}", report.table());
    if let Some(path) = args.json_out.as_ref() {
        report.write_json(path).with_context(|| format!("writing {}", path.display()))?;
        eprintln!("Wrote report to {}", path.display());
    }
    Ok(())
}
