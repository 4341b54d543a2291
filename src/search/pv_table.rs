//! Fixed-size principal-variation table keyed by Zobrist hash.
//!
//! One slot per `hash % len`, always replaced on store. A probe only checks
//! the full 32-bit key, so different positions that share a key collide.

use crate::game_state::chess_move::Move;

/// Slots in the default table.
pub const PV_TABLE_ENTRIES: usize = 10_000;

/// Ordering score given to the stored best move of a position.
pub const PV_MOVE_SCORE: i32 = 2_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PvStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct PvTable {
    entries: Vec<Option<Move>>,
    stats: PvStats,
}

impl Default for PvTable {
    fn default() -> Self {
        Self::with_entries(PV_TABLE_ENTRIES)
    }
}

impl PvTable {
    pub fn with_entries(count: usize) -> Self {
        Self {
            entries: vec![None; count.max(1)],
            stats: PvStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = PvStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    #[inline]
    pub fn stats(&self) -> PvStats {
        self.stats
    }

    #[inline]
    fn idx(&self, hash: u32) -> usize {
        hash as usize % self.entries.len()
    }

    /// Best move stored for the position with this hash.
    pub fn probe(&mut self, hash: u32) -> Option<Move> {
        self.stats.probes += 1;
        let idx = self.idx(hash);
        let hit = self.entries[idx].filter(|mv| mv.hash == hash);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Store `mv` under the hash of the position it was generated from.
    pub fn store(&mut self, mv: Move) {
        self.stats.stores += 1;
        let idx = self.idx(mv.hash);
        self.entries[idx] = Some(mv);
    }

    /// Raise the score of the stored best move for `hash`, matched by its
    /// squares, to `PV_MOVE_SCORE`. Returns whether the table had an entry,
    /// even if no move in `moves` matched it.
    pub fn promote_last_best_move(&mut self, moves: &mut [Move], hash: u32) -> bool {
        let Some(pv_move) = self.probe(hash) else {
            return false;
        };
        if let Some(mv) = moves.iter_mut().find(|mv| mv.same_squares(&pv_move)) {
            mv.score = mv.score.max(PV_MOVE_SCORE);
        }
        true
    }
}
