//! Most-valuable-victim / least-valuable-attacker ordering scores.
//!
//! Captures score `CAPTURE_BASE + victim + 6 - attacker / 100`, where victim
//! and attacker use the ladder pawn 100, knight 200, ... king 600. Quiet moves
//! score by how much the piece-square table gains from the move.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::PieceKind;
use crate::search::board_scoring::evaluate_piece_on_board;

/// Added to every capture so captures sort ahead of quiet moves.
pub const CAPTURE_BASE: i32 = 1_000_000;

const fn build_table() -> [[i32; 6]; 6] {
    let mut table = [[0; 6]; 6];
    let mut victim = 0;
    while victim < 6 {
        let mut attacker = 0;
        while attacker < 6 {
            let victim_value = (victim as i32 + 1) * 100;
            let attacker_value = (attacker as i32 + 1) * 100;
            table[victim][attacker] = victim_value + 6 - attacker_value / 100;
            attacker += 1;
        }
        victim += 1;
    }
    table
}

/// `[victim][attacker]`.
const MVV_LVA: [[i32; 6]; 6] = build_table();

#[inline]
pub fn capture_score(victim: PieceKind, attacker: PieceKind) -> i32 {
    MVV_LVA[victim.index()][attacker.index()]
}

/// Ordering score of a pseudo-legal move on `board`.
pub fn score_move(board: &BoardState, mv: &Move) -> i32 {
    match mv.captured {
        Some(victim) => CAPTURE_BASE + capture_score(victim.kind, mv.piece.kind),
        None => {
            evaluate_piece_on_board(board, mv.piece, mv.to)
                - evaluate_piece_on_board(board, mv.piece, mv.from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_matches_table() {
        assert_eq!(capture_score(PieceKind::Queen, PieceKind::Pawn), 505);
        assert_eq!(capture_score(PieceKind::Pawn, PieceKind::Queen), 101);
        assert_eq!(capture_score(PieceKind::King, PieceKind::King), 600);
    }

    #[test]
    fn bigger_victims_and_smaller_attackers_rank_higher() {
        assert!(
            capture_score(PieceKind::Rook, PieceKind::Queen)
                > capture_score(PieceKind::Knight, PieceKind::Pawn)
        );
        assert!(
            capture_score(PieceKind::Rook, PieceKind::Pawn)
                > capture_score(PieceKind::Rook, PieceKind::Knight)
        );
    }
}
