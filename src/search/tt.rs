use crate::board::Move;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: f64,
    pub best: Option<Move>,
    pub bound: Bound,
    pub gen: u32,
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_ENTRIES: usize = 1 << 16;

#[derive(Default, Clone, Copy)]
struct Slot(Option<Entry>);

#[derive(Default)]
struct Bucket {
    slots: [Slot; DEFAULT_WAYS],
}

/// Set-associative transposition table. Buckets are individually locked so the
/// table can be shared by reference between searches.
#[derive(Default)]
pub struct Tt {
    buckets: Vec<Mutex<Bucket>>,
    gen: AtomicU32,
}

fn lock(b: &Mutex<Bucket>) -> MutexGuard<'_, Bucket> {
    // A panicking writer cannot leave a bucket half-written; recover the guard.
    b.lock().unwrap_or_else(|e| e.into_inner())
}

/// Shallowest entry, oldest generation among equals.
fn victim(slots: &[Slot]) -> usize {
    slots
        .iter()
        .enumerate()
        .min_by_key(|(_, s)| s.0.map(|cur| (cur.depth, cur.gen)))
        .map_or(0, |(i, _)| i)
}

impl Tt {
    pub fn new() -> Self {
        let mut t = Self { buckets: Vec::new(), gen: AtomicU32::new(0) };
        t.set_capacity_entries(DEFAULT_ENTRIES);
        t
    }

    pub fn with_capacity(entries: usize) -> Self {
        let mut t = Self::default();
        t.set_capacity_entries(entries);
        t
    }

    pub fn clear(&self) {
        for b in &self.buckets { *lock(b) = Bucket::default(); }
    }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        let g = lock(&self.buckets[self.bucket_index(key)]);
        let found = g.slots.iter().filter_map(|s| s.0).find(|e| e.key == key);
        found
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| lock(b).slots.iter().filter(|s| s.0.is_some()).count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, || Mutex::new(Bucket::default()));
    }

    pub fn set_capacity_mb(&mut self, mb: usize) {
        // ~48 bytes per entry
        let entries = ((mb.saturating_mul(1024) * 1024) / 48).max(DEFAULT_WAYS);
        self.set_capacity_entries(entries);
    }

    pub fn put(&self, mut e: Entry) {
        if self.buckets.is_empty() { return; }
        e.gen = self.gen.load(Ordering::Relaxed);
        let mut g = lock(&self.buckets[self.bucket_index(e.key)]);
        let slot = match g.slots.iter().position(|s| s.0.is_some_and(|cur| cur.key == e.key)) {
            Some(i) if g.slots[i].0.is_some_and(|cur| cur.depth > e.depth) => return,
            Some(i) => i,
            None => g.slots.iter().position(|s| s.0.is_none()).unwrap_or_else(|| victim(&g.slots)),
        };
        g.slots[slot].0 = Some(e);
    }

    pub fn bump_generation(&self) { self.gen.fetch_add(1, Ordering::Relaxed); }
}
