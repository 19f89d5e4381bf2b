use super::MAX_CELLS;

const WORDS: usize = MAX_CELLS / 64;

/// Fixed-capacity bit set over cell indices (row * width + col).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellSet([u64; WORDS]);

impl CellSet {
    pub fn insert(&mut self, idx: usize) {
        debug_assert!(idx < MAX_CELLS);
        self.0[idx / 64] |= 1u64 << (idx % 64);
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < MAX_CELLS && (self.0[idx / 64] >> (idx % 64)) & 1 == 1
    }

    pub fn len(&self) -> usize { self.0.iter().map(|w| w.count_ones() as usize).sum() }

    pub fn is_empty(&self) -> bool { self.0.iter().all(|&w| w == 0) }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().flat_map(|(wi, &w)| {
            let mut bits = w;
            std::iter::from_fn(move || {
                if bits == 0 { return None; }
                let b = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(wi * 64 + b)
            })
        })
    }
}
