use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::{Move, MoveFlag};
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::MoveList;

/// `(d_row, d_col)` steps.
pub type Offset = (i8, i8);

pub const KNIGHT_OFFSETS: [Offset; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_OFFSETS: [Offset; 8] = [
    (1, 0),
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

pub const ROOK_DIRECTIONS: [Offset; 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRECTIONS: [Offset; 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Pseudo-legal move from `from` to `to` for `piece`, tagged with the current
/// position hash.
#[inline]
pub fn build_move(board: &BoardState, piece: Piece, from: Square, to: Square, flag: MoveFlag) -> Move {
    Move {
        piece,
        captured: board.piece_at(to),
        from,
        to,
        flag,
        hash: board.zobrist_key(),
        score: 0,
    }
}

/// Push a move to `(d_row, d_col)` unless it is off the board or blocked by
/// an own piece. Returns true if the target square was empty.
#[inline]
pub fn push_step_into(
    board: &BoardState,
    piece: Piece,
    from: Square,
    (d_row, d_col): Offset,
    moves: &mut MoveList,
) -> bool {
    match board.get_piece(from.row() + d_row, from.col() + d_col) {
        SquareContent::OffBoard => false,
        SquareContent::Occupied(other) if other.color == piece.color => false,
        content => {
            if let Some(to) = from.offset(d_row, d_col) {
                moves.push(build_move(board, piece, from, to, MoveFlag::None));
            }
            content == SquareContent::Empty
        }
    }
}

/// Walk each direction until the edge or a piece, capturing enemy blockers.
pub fn slide_into(
    board: &BoardState,
    piece: Piece,
    from: Square,
    directions: &[Offset],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in directions {
        let mut distance = 1;
        while push_step_into(board, piece, from, (d_row * distance, d_col * distance), moves) {
            distance += 1;
        }
    }
}
