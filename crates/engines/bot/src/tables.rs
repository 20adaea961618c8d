//! Move-ordering memory kept between searches: killer moves per depth and
//! a (from, to) history weight.

use chess_core::Move;

/// Deepest ply the killer table covers. A search entered at exactly this
/// depth probes the opening book first.
pub const MAX_DEPTH: i32 = 60;

/// Two killer slots per depth `0..=MAX_DEPTH`.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: vec![[None; 2]; MAX_DEPTH as usize + 1],
        }
    }

    /// Killer slots at `depth`; empty outside `0..=MAX_DEPTH`.
    pub fn get(&self, depth: i32) -> [Option<Move>; 2] {
        Self::index(depth)
            .map(|d| self.slots[d])
            .unwrap_or([None; 2])
    }

    /// Record a quiet move that caused a cutoff. Slot 0 moves down to slot 1
    /// unless `mv` already is slot 0.
    pub fn store(&mut self, depth: i32, mv: Move) {
        let Some(d) = Self::index(depth) else {
            return;
        };
        let slot = &mut self.slots[d];
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    pub fn clear(&mut self) {
        self.slots.fill([None; 2]);
    }

    fn index(depth: i32) -> Option<usize> {
        (0..=MAX_DEPTH).contains(&depth).then_some(depth as usize)
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// History heuristic weights indexed by (from, to).
#[derive(Debug, Clone)]
pub struct HistoryTable {
    weights: Box<[[i32; 64]; 64]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            weights: Box::new([[0; 64]; 64]),
        }
    }

    pub fn get(&self, mv: Move) -> i32 {
        self.weights[mv.from as usize][mv.to as usize]
    }

    /// Add `depth²` for a quiet move that improved the best score.
    pub fn reward(&mut self, mv: Move, depth: i32) {
        let w = &mut self.weights[mv.from as usize][mv.to as usize];
        *w = w.saturating_add(depth.saturating_mul(depth));
    }

    pub fn clear(&mut self) {
        for row in self.weights.iter_mut() {
            row.fill(0);
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tables_tests.rs"]
mod tables_tests;
