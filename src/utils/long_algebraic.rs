//! Long algebraic move text (`e2e4`, `e7e8q`) to and from [`Move`].
//!
//! Parsing resolves the text against the legal moves of the position, so the
//! returned move carries the flags, captured piece and hash the generator
//! would have produced.

use crate::chess_errors::NotationError;
use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::generate_all_valid_moves;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: &Move) -> String {
    mv.to_string()
}

/// Find the legal move of `game_state` written as `long_algebraic`.
///
/// A promotion without a suffix resolves to a queen.
pub fn long_algebraic_to_move(
    long_algebraic: &str,
    game_state: &mut GameState,
) -> Result<Move, NotationError> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(NotationError::InvalidMoveText(long_algebraic.to_owned()));
    }
    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text.as_bytes().get(4) {
        Some(&suffix) => Some(
            char_to_promotion(char::from(suffix))
                .ok_or_else(|| NotationError::InvalidMoveText(long_algebraic.to_owned()))?,
        ),
        None => None,
    };

    generate_all_valid_moves(game_state)
        .into_iter()
        .find(|mv| {
            mv.from == from
                && mv.to == to
                && match (mv.promotion(), promotion) {
                    (None, _) => true,
                    (Some(kind), Some(wanted)) => kind == wanted,
                    (Some(kind), None) => kind == PieceKind::Queen,
                }
        })
        .ok_or_else(|| NotationError::NoMatchingMove(long_algebraic.to_owned()))
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_move::MoveFlag;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn simple_move_round_trip() {
        let mut start = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &mut start).expect("move should parse");
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
        assert_eq!(mv.piece.kind, PieceKind::Pawn);
        assert_eq!(mv.hash, start.board().zobrist_key());
    }

    #[test]
    fn promotion_suffix_selects_the_piece() {
        let mut position = game("8/P7/8/8/8/8/8/k6K w - - 0 1");
        let knight = long_algebraic_to_move("a7a8n", &mut position).expect("move should parse");
        assert_eq!(knight.flag, MoveFlag::Promotion(PieceKind::Knight));
        assert_eq!(move_to_long_algebraic(&knight), "a7a8n");

        let bare = long_algebraic_to_move("a7a8", &mut position).expect("move should parse");
        assert_eq!(bare.flag, MoveFlag::Promotion(PieceKind::Queen));
    }

    #[test]
    fn castling_and_en_passant_keep_their_flags() {
        let mut castle = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mv = long_algebraic_to_move("e1g1", &mut castle).expect("castle should parse");
        assert_eq!(mv.flag, MoveFlag::LightKingsideCastle);

        let mut en_passant = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let mv = long_algebraic_to_move("e5d6", &mut en_passant).expect("en passant should parse");
        assert_eq!(mv.flag, MoveFlag::EnPassant);
        assert!(mv.is_capture());
    }

    #[test]
    fn bad_text_and_illegal_moves_are_errors() {
        let mut start = GameState::new_game();
        assert!(matches!(
            long_algebraic_to_move("e2", &mut start),
            Err(NotationError::InvalidMoveText(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("z2e4", &mut start),
            Err(NotationError::InvalidSquare(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("e2e5", &mut start),
            Err(NotationError::NoMatchingMove(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("e7e8x", &mut start),
            Err(NotationError::InvalidMoveText(_))
        ));
    }
}
