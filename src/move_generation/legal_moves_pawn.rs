use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::MoveFlag;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::build_move;
use crate::move_generation::move_generator::MoveList;

pub fn generate_pawn_moves_into(board: &BoardState, piece: Piece, from: Square, moves: &mut MoveList) {
    let dir = piece.color.forward();
    let (row, col) = (from.row(), from.col());

    if board.is_empty(row + dir, col) {
        if let Some(to) = from.offset(dir, 0) {
            push_advance(board, piece, from, to, moves);
        }

        // Only from the home rank: two rows behind it is off the board.
        if board.get_piece(row - 2 * dir, col) == SquareContent::OffBoard
            && board.is_empty(row + 2 * dir, col)
        {
            if let Some(to) = from.offset(2 * dir, 0) {
                moves.push(build_move(board, piece, from, to, MoveFlag::None));
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(dir, d_col) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != piece.color => {
                push_advance(board, piece, from, to, moves);
            }
            None if board.en_passant() == Some(to) => {
                let passed = Piece::new(piece.color.opposite(), PieceKind::Pawn);
                let beside = from.offset(0, d_col).and_then(|sq| board.piece_at(sq));
                if beside == Some(passed) {
                    let mut mv = build_move(board, piece, from, to, MoveFlag::EnPassant);
                    mv.captured = Some(passed);
                    moves.push(mv);
                }
            }
            _ => {}
        }
    }
}

/// Push a forward move or capture, expanding it into the four promotions on
/// the last rank.
fn push_advance(board: &BoardState, piece: Piece, from: Square, to: Square, moves: &mut MoveList) {
    let last_row = match piece.color {
        Color::Light => 8,
        Color::Dark => 1,
    };

    if to.row() == last_row {
        for kind in PieceKind::PROMOTIONS {
            moves.push(build_move(board, piece, from, to, MoveFlag::Promotion(kind)));
        }
    } else {
        moves.push(build_move(board, piece, from, to, MoveFlag::None));
    }
}
