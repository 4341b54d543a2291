use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;

pub fn generate_fen(board: &BoardState) -> String {
    let side_to_move = match board.side_to_move() {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let en_passant = board
        .en_passant()
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(board),
        side_to_move,
        generate_castling_field(board.castling_rights()),
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

fn generate_board_field(board: &BoardState) -> String {
    let mut out = String::new();

    for row in (1..=8).rev() {
        let mut empty_count = 0u8;

        for col in 1..=8 {
            if let Some(piece) = board.get_piece(row, col).piece() {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row > 1 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ]
    .iter()
    .filter(|(right, _)| rights & right != 0)
    .map(|&(_, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}
