use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::MoveFlag;
use crate::game_state::chess_rules::{DARK_KING_START, LIGHT_KING_START};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{build_move, push_step_into, KING_OFFSETS};
use crate::move_generation::move_generator::MoveList;

struct CastleRule {
    right_kingside: bool,
    rook_col: i8,
    must_be_empty: &'static [i8],
    king_path: &'static [i8],
    king_to_col: i8,
}

const KINGSIDE: CastleRule = CastleRule {
    right_kingside: true,
    rook_col: 8,
    must_be_empty: &[6, 7],
    king_path: &[6, 7],
    king_to_col: 7,
};

const QUEENSIDE: CastleRule = CastleRule {
    right_kingside: false,
    rook_col: 1,
    must_be_empty: &[2, 3, 4],
    king_path: &[4, 3],
    king_to_col: 3,
};

pub fn generate_king_moves_into(board: &BoardState, piece: Piece, from: Square, moves: &mut MoveList) {
    for offset in KING_OFFSETS {
        push_step_into(board, piece, from, offset, moves);
    }

    let color = piece.color;
    let home = match color {
        Color::Light => LIGHT_KING_START,
        Color::Dark => DARK_KING_START,
    };
    if from != home || board.castling_rights() & castling_rights_of(color) == 0 {
        return;
    }
    if is_square_attacked(board, from, color.opposite()) {
        return;
    }

    for rule in [KINGSIDE, QUEENSIDE] {
        push_castle_into(board, piece, from, &rule, moves);
    }
}

fn push_castle_into(board: &BoardState, piece: Piece, from: Square, rule: &CastleRule, moves: &mut MoveList) {
    let color = piece.color;
    let row = from.row();
    let (right, flag) = if rule.right_kingside {
        (
            castling_rights_of(color) & (CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE),
            MoveFlag::kingside_castle(color),
        )
    } else {
        (
            castling_rights_of(color) & (CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE),
            MoveFlag::queenside_castle(color),
        )
    };

    if !board.has_castling_right(right) {
        return;
    }
    if board.get_piece(row, rule.rook_col) != SquareContent::Occupied(Piece::new(color, PieceKind::Rook)) {
        return;
    }
    if !rule.must_be_empty.iter().all(|&col| board.is_empty(row, col)) {
        return;
    }
    let path_attacked = rule.king_path.iter().any(|&col| {
        Square::from_row_col(row, col).is_some_and(|sq| is_square_attacked(board, sq, color.opposite()))
    });
    if path_attacked {
        return;
    }

    if let Some(to) = Square::from_row_col(row, rule.king_to_col) {
        moves.push(build_move(board, piece, from, to, flag));
    }
}
