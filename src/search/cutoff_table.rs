//! Per-depth killer lists: quiet moves that caused a beta cutoff or raised
//! alpha at a given search depth.

use smallvec::SmallVec;

use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::Square;

/// Ordering score given to a move that caused a beta cutoff at this depth.
pub const BETA_MOVE_SCORE: i32 = 1_000_000;
/// Ordering score given to a move that raised alpha at this depth.
pub const ALPHA_MOVE_SCORE: i32 = 900_000;
/// Moves kept per depth and list; the oldest entry is dropped first.
pub const CUTOFF_MOVES_PER_DEPTH: usize = 16;

type CutoffList = SmallVec<[(Square, Square); CUTOFF_MOVES_PER_DEPTH]>;

#[derive(Debug, Clone, Default)]
pub struct CutoffTables {
    beta_moves: Vec<CutoffList>,
    alpha_moves: Vec<CutoffList>,
}

impl CutoffTables {
    pub fn new(max_depth: usize) -> Self {
        let mut tables = Self::default();
        tables.reset(max_depth);
        tables
    }

    /// Empty both lists for depths `0..=max_depth`.
    pub fn reset(&mut self, max_depth: usize) {
        self.beta_moves.clear();
        self.alpha_moves.clear();
        self.beta_moves.resize_with(max_depth + 1, CutoffList::new);
        self.alpha_moves.resize_with(max_depth + 1, CutoffList::new);
    }

    pub fn store_beta_move(&mut self, mv: &Move, depth: usize) {
        push_unique(&mut self.beta_moves, mv, depth);
    }

    pub fn store_alpha_move(&mut self, mv: &Move, depth: usize) {
        push_unique(&mut self.alpha_moves, mv, depth);
    }

    pub fn beta_moves(&self, depth: usize) -> &[(Square, Square)] {
        self.beta_moves.get(depth).map(|list| list.as_slice()).unwrap_or(&[])
    }

    pub fn alpha_moves(&self, depth: usize) -> &[(Square, Square)] {
        self.alpha_moves.get(depth).map(|list| list.as_slice()).unwrap_or(&[])
    }

    pub fn promote_beta_moves(&self, moves: &mut [Move], depth: usize) {
        promote(moves, self.beta_moves(depth), BETA_MOVE_SCORE);
    }

    pub fn promote_alpha_moves(&self, moves: &mut [Move], depth: usize) {
        promote(moves, self.alpha_moves(depth), ALPHA_MOVE_SCORE);
    }
}

fn push_unique(lists: &mut Vec<CutoffList>, mv: &Move, depth: usize) {
    if depth >= lists.len() {
        lists.resize_with(depth + 1, CutoffList::new);
    }
    let list = &mut lists[depth];
    let key = (mv.from, mv.to);
    if list.contains(&key) {
        return;
    }
    if list.len() == CUTOFF_MOVES_PER_DEPTH {
        list.remove(0);
    }
    list.push(key);
}

fn promote(moves: &mut [Move], cutoffs: &[(Square, Square)], score: i32) {
    for &(from, to) in cutoffs {
        if let Some(mv) = moves.iter_mut().find(|mv| mv.from == from && mv.to == to) {
            mv.score = mv.score.max(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::generate_all_valid_moves;

    fn start_moves() -> Vec<Move> {
        let mut game = GameState::new_game();
        generate_all_valid_moves(&mut game).into_iter().collect()
    }

    #[test]
    fn stored_moves_are_promoted_at_their_depth_only() {
        let mut moves = start_moves();
        let mut tables = CutoffTables::new(4);
        tables.store_beta_move(&moves[5], 2);
        tables.store_alpha_move(&moves[6], 2);

        tables.promote_beta_moves(&mut moves, 1);
        tables.promote_alpha_moves(&mut moves, 1);
        assert!(moves.iter().all(|mv| mv.score < ALPHA_MOVE_SCORE));

        tables.promote_beta_moves(&mut moves, 2);
        tables.promote_alpha_moves(&mut moves, 2);
        assert_eq!(moves[5].score, BETA_MOVE_SCORE);
        assert_eq!(moves[6].score, ALPHA_MOVE_SCORE);
    }

    #[test]
    fn promotion_never_lowers_a_score() {
        let mut moves = start_moves();
        let mut tables = CutoffTables::new(2);
        moves[0].score = 2_000_000;
        tables.store_alpha_move(&moves[0], 1);
        tables.promote_alpha_moves(&mut moves, 1);
        assert_eq!(moves[0].score, 2_000_000);
    }

    #[test]
    fn lists_are_deduplicated_and_capped() {
        let moves = start_moves();
        let mut tables = CutoffTables::new(1);
        tables.store_beta_move(&moves[0], 1);
        tables.store_beta_move(&moves[0], 1);
        assert_eq!(tables.beta_moves(1).len(), 1);

        for mv in moves.iter().take(CUTOFF_MOVES_PER_DEPTH + 2) {
            tables.store_beta_move(mv, 1);
        }
        let stored = tables.beta_moves(1);
        assert_eq!(stored.len(), CUTOFF_MOVES_PER_DEPTH);
        assert!(!stored.contains(&(moves[0].from, moves[0].to)));
        assert_eq!(stored.last(), Some(&(moves[17].from, moves[17].to)));
    }

    #[test]
    fn reset_clears_and_deeper_stores_grow() {
        let moves = start_moves();
        let mut tables = CutoffTables::new(2);
        tables.store_alpha_move(&moves[1], 9);
        assert_eq!(tables.alpha_moves(9).len(), 1);
        tables.reset(2);
        assert!(tables.alpha_moves(9).is_empty());
        assert!(tables.beta_moves(0).is_empty());
    }
}
