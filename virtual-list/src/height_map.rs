use alloc::vec::Vec;

use crate::key::IndexMap;

/// Measured row heights keyed by row index.
///
/// Every mutation is equality-gated: writing the value already stored (or removing an absent
/// entry) leaves [`HeightMap::version`] untouched, so dependants can skip recomputation.
#[derive(Clone, Debug, Default)]
pub struct HeightMap {
    entries: IndexMap<u32>,
    version: u64,
}

impl HeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every effective change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.entries.get(&index).copied()
    }

    /// Measured height of `index`, or `min_row_height` when unknown.
    ///
    /// A zero entry is treated as unknown.
    pub fn height_or(&self, index: usize, min_row_height: u32) -> u32 {
        match self.get(index) {
            Some(h) if h > 0 => h,
            _ => min_row_height,
        }
    }

    /// Stores `height` for `index` if it differs from the current entry.
    ///
    /// Returns `true` when the map changed.
    pub fn replace(&mut self, index: usize, height: u32) -> bool {
        if self.get(index) == Some(height) {
            return false;
        }
        self.entries.insert(index, height);
        self.bump();
        true
    }

    /// Stores a measurement, ignoring values below `min_row_height`.
    pub fn record(&mut self, index: usize, height: u32, min_row_height: u32) -> bool {
        if height < min_row_height {
            vtrace!(index, height, min_row_height, "HeightMap: measurement below minimum");
            return false;
        }
        self.replace(index, height)
    }

    pub fn remove(&mut self, index: usize) -> Option<u32> {
        let removed = self.entries.remove(&index);
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    /// Drops every entry at `index >= count`.
    pub fn truncate(&mut self, count: usize) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&i, _| i < count);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            self.bump();
        }
        dropped
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.bump();
        }
    }

    /// Iterates over `(index, height)` pairs in unspecified order.
    pub fn for_each(&self, mut f: impl FnMut(usize, u32)) {
        for (&i, &h) in self.entries.iter() {
            f(i, h);
        }
    }

    /// Indexes with an entry, sorted ascending.
    pub fn indexes(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.entries.keys().copied().collect();
        out.sort_unstable();
        out
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
