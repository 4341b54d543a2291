use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Piece, Square};
use crate::move_generation::legal_move_shared::{push_step_into, KNIGHT_OFFSETS};
use crate::move_generation::move_generator::MoveList;

pub fn generate_knight_moves_into(board: &BoardState, piece: Piece, from: Square, moves: &mut MoveList) {
    for offset in KNIGHT_OFFSETS {
        push_step_into(board, piece, from, offset, moves);
    }
}
