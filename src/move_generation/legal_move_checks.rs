//! Attack detection by scanning outward from the target square.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    Offset, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

#[inline]
pub fn king_square(board: &BoardState, color: Color) -> Option<Square> {
    board.king_position(color)
}

/// A side without a king is never in check.
#[inline]
pub fn is_king_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`.
pub fn is_square_attacked(board: &BoardState, square: Square, attacker_color: Color) -> bool {
    let (row, col) = (square.row(), square.col());
    let occupied_by = |kinds: &[PieceKind], d_row: i8, d_col: i8| match board.get_piece(row + d_row, col + d_col) {
        SquareContent::Occupied(piece) => piece.color == attacker_color && kinds.contains(&piece.kind),
        _ => false,
    };

    // A pawn attacks diagonally forward, so look one row back from its view.
    let pawn_row = -attacker_color.forward();
    if occupied_by(&[PieceKind::Pawn], pawn_row, -1) || occupied_by(&[PieceKind::Pawn], pawn_row, 1) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(d_row, d_col)| occupied_by(&[PieceKind::Knight], d_row, d_col))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(d_row, d_col)| occupied_by(&[PieceKind::King], d_row, d_col))
    {
        return true;
    }

    slider_attacks(board, square, attacker_color, &ROOK_DIRECTIONS, PieceKind::Rook)
        || slider_attacks(board, square, attacker_color, &BISHOP_DIRECTIONS, PieceKind::Bishop)
}

fn slider_attacks(
    board: &BoardState,
    square: Square,
    attacker_color: Color,
    directions: &[Offset],
    slider: PieceKind,
) -> bool {
    for &(d_row, d_col) in directions {
        let (mut row, mut col) = (square.row() + d_row, square.col() + d_col);
        loop {
            match board.get_piece(row, col) {
                SquareContent::Empty => {
                    row += d_row;
                    col += d_col;
                }
                SquareContent::Occupied(piece) => {
                    if piece.color == attacker_color
                        && (piece.kind == slider || piece.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                SquareContent::OffBoard => break,
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn pawn_attacks_depend_on_color() {
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let board = game.board();
        assert!(is_square_attacked(board, sq("d3"), Color::Light));
        assert!(is_square_attacked(board, sq("f3"), Color::Light));
        assert!(!is_square_attacked(board, sq("e3"), Color::Light));
        assert!(is_square_attacked(board, sq("c4"), Color::Dark));
        assert!(!is_square_attacked(board, sq("c6"), Color::Dark));
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let game = GameState::from_fen("4k3/8/8/8/8/2N5/8/R3K2b w - - 0 1").expect("FEN should parse");
        let board = game.board();
        assert!(is_square_attacked(board, sq("a8"), Color::Light));
        assert!(is_square_attacked(board, sq("d1"), Color::Light));
        assert!(is_square_attacked(board, sq("d5"), Color::Dark));
        assert!(is_square_attacked(board, sq("g2"), Color::Dark));
        assert!(!is_square_attacked(board, sq("b8"), Color::Light));
        assert!(!is_square_attacked(board, sq("e2"), Color::Dark));
    }

    #[test]
    fn check_detection_and_missing_king() {
        let checked = GameState::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(checked.board(), Color::Light));
        assert!(!is_king_in_check(checked.board(), Color::Dark));

        let kingless = GameState::from_fen("8/8/8/8/8/8/8/7r w - - 0 1").expect("FEN should parse");
        assert!(!is_king_in_check(kingless.board(), Color::Light));
    }
}
