//! FEN-to-BoardState parser.
//!
//! Builds a fully indexed board from a Forsyth-Edwards Notation string through
//! the public `BoardState` setters, so piece indexes and the Zobrist key come
//! out exactly as incremental play would leave them.

use crate::chess_errors::FenError;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<BoardState, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = BoardState::new_empty();

    parse_board(board_part, &mut board)?;
    board.set_side_to_move(parse_side_to_move(side_part)?);
    board.set_castling_rights(parse_castling_rights(castling_part)?);
    board.set_en_passant(parse_en_passant_square(en_passant_part)?);
    board.set_halfmove_clock(parse_clock(halfmove_part)?);
    board.set_fullmove_number(parse_clock(fullmove_part)?);

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut BoardState) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 8 - fen_rank_idx as i8;
        let mut col = 1i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidPiece(ch));
                }
                col += empty_count as i8;
                if col > 9 {
                    return Err(FenError::RankWidth { rank: row as usize });
                }
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
            let square =
                Square::from_row_col(row, col).ok_or(FenError::RankWidth { rank: row as usize })?;
            board.set_piece(square, Some(piece));
            col += 1;
        }

        if col != 9 {
            return Err(FenError::RankWidth { rank: row as usize });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::InvalidSide(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant(en_passant_part.to_owned()))
}

fn parse_clock(text: &str) -> Result<u16, FenError> {
    text.parse::<u16>()
        .map_err(|_| FenError::InvalidClock(text.to_owned()))
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::search::zobrist::compute_zobrist_key;

    #[test]
    fn parse_starting_fen() {
        let board = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(board.side_to_move(), Color::Light);
        assert_eq!(board.castling_rights(), CASTLE_ALL);
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.fullmove_number(), 0);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(
            board.get_piece(1, 5),
            SquareContent::Occupied(Piece::new(Color::Light, PieceKind::King))
        );
        assert_eq!(
            board.get_piece(8, 4),
            SquareContent::Occupied(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(board.piece_count(Color::Dark, PieceKind::Pawn), 8);
        assert_eq!(board.zobrist_key(), compute_zobrist_key(&board));
    }

    #[test]
    fn parse_flags_and_clocks() {
        let board = parse_fen("4k3/8/8/3pP3/8/8/8/4K2R b Kq d6 3 41").expect("FEN should parse");
        assert_eq!(board.side_to_move(), Color::Dark);
        assert_eq!(board.castling_rights(), CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(board.en_passant(), algebraic_to_square("d6").ok());
        assert_eq!(board.halfmove_clock(), 3);
        assert_eq!(board.fullmove_number(), 41);
        assert_eq!(board.zobrist_key(), compute_zobrist_key(&board));
    }

    #[test]
    fn kingless_boards_are_accepted() {
        let board = parse_fen("8/8/8/8/8/8/8/7R w - - 0 1").expect("FEN should parse");
        assert_eq!(board.king_position(Color::Light), None);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        let cases = [
            ("8/8/8/8/8/8/8 w - - 0 1", FenError::RankCount(7)),
            ("8/8/8/8/8/8/8/7 w - - 0 1", FenError::RankWidth { rank: 1 }),
            ("9/8/8/8/8/8/8/8 w - - 0 1", FenError::InvalidPiece('9')),
            ("ppppppppp/8/8/8/8/8/8/8 w - - 0 1", FenError::RankWidth { rank: 8 }),
            ("8/8/8/8/8/8/8/7x w - - 0 1", FenError::InvalidPiece('x')),
            ("8/8/8/8/8/8/8/8 x - - 0 1", FenError::InvalidSide("x".to_owned())),
            ("8/8/8/8/8/8/8/8 w X - 0 1", FenError::InvalidCastling('X')),
            ("8/8/8/8/8/8/8/8 w - z9 0 1", FenError::InvalidEnPassant("z9".to_owned())),
            ("8/8/8/8/8/8/8/8 w - - a 1", FenError::InvalidClock("a".to_owned())),
            ("8/8/8/8/8/8/8/8 w - - 0", FenError::MissingField("fullmove number")),
            ("8/8/8/8/8/8/8/8 w - - 0 1 extra", FenError::TrailingFields),
        ];
        for (fen, expected) in cases {
            assert_eq!(parse_fen(fen), Err(expected), "{fen}");
        }
    }
}
