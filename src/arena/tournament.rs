use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agents::build_agent;
use crate::arena::{play_game, random_opening, EndReason, GameRecord};
use crate::board::Player;
use crate::config::TournamentConfig;
use crate::error::{ConfigError, TournamentError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub agent: String,
    pub opponent: String,
    pub wins: usize,
    pub losses: usize,
    /// Games lost by the test agent through timeout, illegal move or forfeit.
    pub forfeits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub agent: String,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub pairings: Vec<PairingResult>,
    pub summary: Vec<AgentSummary>,
    pub games: usize,
}

#[derive(Clone, Copy)]
struct Round {
    agent: usize,
    opponent: usize,
    round: usize,
}

fn mix(seed: u64, a: u64, b: u64) -> u64 {
    seed ^ a.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ b.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
}

/// Run the tournament with no progress reporting.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentReport, TournamentError> {
    run_tournament_with(config, || {})
}

/// Every test agent plays `matches` rounds against every opponent. A round is one
/// random opening played twice with sides swapped; the opening depends only on the
/// opponent and round index so all test agents face the same positions.
/// `on_round` is called after each finished round, from worker threads.
pub fn run_tournament_with<F>(config: &TournamentConfig, on_round: F) -> Result<TournamentReport, TournamentError>
where
    F: Fn() + Sync,
{
    config.validate()?;
    let board = config.board().map_err(ConfigError::from)?;
    let time_limit = config.time_limit();

    let mut rounds = Vec::with_capacity(config.agents.len() * config.opponents.len() * config.matches);
    for agent in 0..config.agents.len() {
        for opponent in 0..config.opponents.len() {
            for round in 0..config.matches { rounds.push(Round { agent, opponent, round }); }
        }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads.max(1)).build()?;
    let played: Vec<Result<(Round, [GameRecord; 2]), ConfigError>> = pool.install(|| {
        rounds.par_iter().map(|&r| {
            let mut rng = SmallRng::seed_from_u64(mix(config.seed, r.opponent as u64, r.round as u64));
            let opening = random_opening(&board, &mut rng);
            let agent_seed = mix(config.seed, 1 + r.agent as u64, r.round as u64);
            let opp_seed = mix(config.seed, r.opponent as u64, 1 + r.round as u64);
            let mut agent = build_agent(&config.agents[r.agent], agent_seed)?;
            let mut opp = build_agent(&config.opponents[r.opponent], opp_seed)?;
            let g1 = play_game(agent.as_mut(), opp.as_mut(), opening, time_limit);
            let g2 = play_game(opp.as_mut(), agent.as_mut(), opening, time_limit);
            on_round();
            Ok((r, [g1, g2]))
        }).collect()
    });

    let mut pairings: Vec<PairingResult> = Vec::with_capacity(config.agents.len() * config.opponents.len());
    for a in &config.agents {
        for o in &config.opponents {
            pairings.push(PairingResult { agent: a.name.clone(), opponent: o.name.clone(), ..Default::default() });
        }
    }
    let mut games = 0usize;
    for item in played {
        let (r, records) = item?;
        let p = &mut pairings[r.agent * config.opponents.len() + r.opponent];
        // Test agent is player one in the first game, player two in the second.
        for (rec, seat) in records.iter().zip([Player::One, Player::Two]) {
            games += 1;
            if rec.winner == seat {
                p.wins += 1;
            } else {
                p.losses += 1;
                if rec.reason != EndReason::NoLegalMoves { p.forfeits += 1; }
            }
        }
    }
    for p in &pairings {
        info!("{} vs {}: {} - {}", p.agent, p.opponent, p.wins, p.losses);
    }

    let summary = config.agents.iter().enumerate().map(|(ai, a)| {
        let rows = &pairings[ai * config.opponents.len()..(ai + 1) * config.opponents.len()];
        let wins: usize = rows.iter().map(|p| p.wins).sum();
        let losses: usize = rows.iter().map(|p| p.losses).sum();
        let total = wins + losses;
        let win_rate = if total > 0 { 100.0 * wins as f64 / total as f64 } else { 0.0 };
        AgentSummary { agent: a.name.clone(), wins, losses, win_rate }
    }).collect();

    Ok(TournamentReport { pairings, summary, games })
}

impl TournamentReport {
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let mut w = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut w, self)?;
        w.flush()
    }

    /// Plain-text results table, one row per pairing plus win rates.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<16} {:<16} {:>5} {:>6} {:>9}", "agent", "opponent", "won", "lost", "forfeits");
        for p in &self.pairings {
            let _ = writeln!(out, "{:<16} {:<16} {:>5} {:>6} {:>9}", p.agent, p.opponent, p.wins, p.losses, p.forfeits);
        }
        let _ = writeln!(out);
        for s in &self.summary {
            let _ = writeln!(out, "{:<16} win rate {:>6.2}%", s.agent, s.win_rate);
        }
        out
    }
}
