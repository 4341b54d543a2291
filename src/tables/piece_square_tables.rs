//! Positional bonus tables, one 8x8 grid per piece kind.
//!
//! Grids are written from the owner's point of view: index `[0]` is the
//! owner's back rank. White reads `[row - 1][col - 1]`, Black reads
//! `[8 - row][col - 1]`.

use crate::game_state::chess_types::{Color, PieceKind, Square};

type Table = [[i32; 8]; 8];

/// A side whose staged material is at or below this switches its king to the
/// endgame table. 51400 is a bare king plus roughly a rook and a minor.
pub const KING_ENDGAME_MATERIAL: i32 = 51_400;

const PAWN: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [10, 10, 0, -10, -10, 0, 10, 10],
    [5, 0, 0, 5, 5, 0, 0, 5],
    [0, 0, 10, 20, 20, 10, 0, 0],
    [5, 5, 5, 10, 10, 5, 5, 5],
    [10, 10, 10, 20, 20, 10, 10, 10],
    [20, 20, 20, 30, 30, 20, 20, 20],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT: Table = [
    [0, -10, 0, 0, 0, 0, -10, 0],
    [0, 0, 0, 5, 5, 0, 0, 0],
    [0, 0, 10, 10, 10, 10, 0, 0],
    [0, 0, 10, 20, 20, 10, 5, 0],
    [5, 10, 15, 20, 20, 15, 10, 5],
    [5, 10, 10, 20, 20, 10, 10, 5],
    [0, 0, 5, 10, 10, 5, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const BISHOP: Table = [
    [0, 0, -10, 0, 0, -10, 0, 0],
    [0, 0, 0, 10, 10, 0, 0, 0],
    [0, 0, 10, 15, 15, 10, 0, 0],
    [0, 10, 15, 20, 20, 15, 10, 0],
    [0, 10, 15, 20, 20, 15, 10, 0],
    [0, 0, 10, 15, 15, 10, 0, 0],
    [0, 0, 0, 10, 10, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const ROOK: Table = [
    [0, 0, 5, 10, 10, 5, 0, 0],
    [0, 0, 5, 10, 10, 5, 0, 0],
    [0, 0, 5, 10, 10, 5, 0, 0],
    [0, 0, 5, 10, 10, 5, 0, 0],
    [0, 0, 5, 10, 10, 5, 0, 0],
    [0, 0, 5, 10, 10, 5, 0, 0],
    [25, 25, 25, 25, 25, 25, 25, 25],
    [0, 0, 5, 10, 10, 5, 0, 0],
];

const QUEEN: Table = [
    [0, 0, -10, 0, 0, -10, 0, 0],
    [0, 0, 0, 10, 10, 0, 0, 0],
    [0, 0, 10, 15, 15, 10, 0, 0],
    [0, 10, 15, 20, 20, 15, 10, 0],
    [0, 10, 15, 20, 20, 15, 10, 0],
    [0, 0, 10, 15, 15, 10, 0, 0],
    [25, 25, 25, 25, 25, 25, 25, 25],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KING: Table = [
    [0, 5, 5, -10, -10, 0, 10, 5],
    [-30, -30, -30, -30, -30, -30, -30, -30],
    [-50, -50, -50, -50, -50, -50, -50, -50],
    [-70, -70, -70, -70, -70, -70, -70, -70],
    [-70, -70, -70, -70, -70, -70, -70, -70],
    [-70, -70, -70, -70, -70, -70, -70, -70],
    [-70, -70, -70, -70, -70, -70, -70, -70],
    [-70, -70, -70, -70, -70, -70, -70, -70],
];

const KING_ENDGAME: Table = [
    [-50, -10, 0, 0, 0, 0, -10, -50],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [0, 10, 20, 20, 20, 20, 10, 0],
    [0, 10, 20, 20, 20, 20, 10, 0],
    [0, 10, 20, 20, 20, 20, 10, 0],
    [0, 10, 20, 20, 20, 20, 10, 0],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-50, -10, 0, 0, 0, 0, -10, -50],
];

/// Positional bonus of a piece of `kind` owned by `color` standing on `square`.
pub fn piece_square_value(color: Color, kind: PieceKind, square: Square, king_endgame: bool) -> i32 {
    let row = match color {
        Color::Light => square.row() - 1,
        Color::Dark => 8 - square.row(),
    };
    let col = square.col() - 1;

    let table = match kind {
        PieceKind::Pawn => &PAWN,
        PieceKind::Knight => &KNIGHT,
        PieceKind::Bishop => &BISHOP,
        PieceKind::Rook => &ROOK,
        PieceKind::Queen => &QUEEN,
        PieceKind::King if king_endgame => &KING_ENDGAME,
        PieceKind::King => &KING,
    };
    table[row as usize][col as usize]
}
