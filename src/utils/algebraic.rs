//! Square conversions for algebraic coordinates such as `e4`.

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::Square;

/// Parse a two-character coordinate (`a1` through `h8`).
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, NotationError> {
    let invalid = || NotationError::InvalidSquare(square.to_owned());
    let &[file, rank] = square.as_bytes() else {
        return Err(invalid());
    };
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Square::from_row_col((rank - b'0') as i8, (file - b'a' + 1) as i8).ok_or_else(invalid)
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
