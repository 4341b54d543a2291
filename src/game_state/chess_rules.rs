//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard starting position and the fixed squares
//! the castling rules care about.

use crate::game_state::chess_types::{
    CastlingRights, Square, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, CASTLE_LIGHT_KINGSIDE,
    CASTLE_LIGHT_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
///
/// The full-move field starts at 0 and counts every applied move.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

pub const LIGHT_KING_START: Square = Square::from_index(4);
pub const DARK_KING_START: Square = Square::from_index(60);

/// Rook corners paired with the castling right they guard.
pub const ROOK_CORNERS: [(Square, CastlingRights); 4] = [
    (Square::from_index(0), CASTLE_LIGHT_QUEENSIDE),
    (Square::from_index(7), CASTLE_LIGHT_KINGSIDE),
    (Square::from_index(56), CASTLE_DARK_QUEENSIDE),
    (Square::from_index(63), CASTLE_DARK_KINGSIDE),
];
