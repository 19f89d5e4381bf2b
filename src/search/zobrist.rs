use crate::board::{Board, Player, MAX_CELLS};
use std::sync::OnceLock;

// Key layout: [blocked | player one location | player two location] x MAX_CELLS
const LAYERS: usize = 3;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<Vec<u64>> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64] {
    TABLE.get_or_init(|| {
        let mut t = vec![0u64; LAYERS * MAX_CELLS];
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

fn init_side() -> u64 {
    *SIDE_KEY.get_or_init(|| splitmix64(0xABCDEF1234567890))
}

/// Position fingerprint over blocked cells, piece locations, side to move and board size.
pub fn compute(board: &Board) -> u64 {
    let table = init_table();
    let mut key = splitmix64(((board.width() as u64) << 8) | board.height() as u64);
    for idx in board.blocked().iter() {
        key ^= table[idx];
    }
    for &player in &[Player::One, Player::Two] {
        if let Some(loc) = board.location(player) {
            let layer = 1 + player.index();
            key ^= table[layer * MAX_CELLS + board.cell_index(loc)];
        }
    }
    if board.active_player() == Player::Two { key ^= init_side(); }
    key
}

/// Mix a perspective player into a fingerprint so both sides can share one table.
pub fn with_perspective(key: u64, player: Player) -> u64 {
    match player {
        Player::One => key,
        Player::Two => key ^ splitmix64(!init_side()),
    }
}
