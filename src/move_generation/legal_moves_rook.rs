use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Piece, Square};
use crate::move_generation::legal_move_shared::{slide_into, ROOK_DIRECTIONS};
use crate::move_generation::move_generator::MoveList;

pub fn generate_rook_moves_into(board: &BoardState, piece: Piece, from: Square, moves: &mut MoveList) {
    slide_into(board, piece, from, &ROOK_DIRECTIONS, moves);
}
