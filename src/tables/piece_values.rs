//! Opening and endgame piece values plus the stage interpolation built on them.
//!
//! Stages are fractions in `[0, 1]`: `0` means the material of the starting
//! position is still on the board, `1` means it is gone. Per-piece multipliers
//! are rounded to two decimals. Pawns, knights and rooks scale their value from opening to endgame by
//! how many pawns have left the board.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, PieceKind};

/// Value of a pawn, also the unit used by MVV-LVA.
pub const PAWN_VALUE: i32 = 100;

/// Pawn material of both sides in the starting position.
pub const STARTING_PAWN_MATERIAL: i32 = 16 * PAWN_VALUE;

/// Opening and endgame values of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceValue {
    pub opening: i32,
    pub endgame: i32,
}

const VALUES: [PieceValue; 6] = [
    PieceValue { opening: 100, endgame: 400 },
    PieceValue { opening: 375, endgame: 275 },
    PieceValue { opening: 325, endgame: 325 },
    PieceValue { opening: 450, endgame: 600 },
    PieceValue { opening: 1000, endgame: 1000 },
    PieceValue { opening: 50000, endgame: 50000 },
];

#[inline]
pub const fn piece_value(kind: PieceKind) -> PieceValue {
    VALUES[kind.index()]
}

/// Unstaged value used by incremental material bookkeeping.
#[inline]
pub const fn starting_value(kind: PieceKind) -> i32 {
    VALUES[kind.index()].opening
}

/// Base score of a checkmate: the value of the king.
pub const CHECKMATE_SCORE: i32 = starting_value(PieceKind::King);

/// Material of both sides combined in the starting position.
pub const STARTING_MATERIAL: i32 = STARTING_PAWN_MATERIAL
    + 4 * starting_value(PieceKind::Knight)
    + 4 * starting_value(PieceKind::Bishop)
    + 4 * starting_value(PieceKind::Rook)
    + 2 * starting_value(PieceKind::Queen)
    + 2 * starting_value(PieceKind::King);

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of the starting pawns that have left the board.
pub fn pawn_stage(board: &BoardState) -> f64 {
    let pawns = board.pawn_material(Color::Light) + board.pawn_material(Color::Dark);
    1.0 - f64::from(pawns) / f64::from(STARTING_PAWN_MATERIAL)
}

/// Share of the non-king starting material that has left the board.
pub fn game_stage(board: &BoardState) -> f64 {
    let kings = 2 * starting_value(PieceKind::King);
    let material = board.material(Color::Light) + board.material(Color::Dark) - kings;
    1.0 - f64::from(material) / f64::from(STARTING_MATERIAL - kings)
}

/// Multiplier applied to a kind's opening value at the given pawn stage.
pub fn piece_stage(kind: PieceKind, pawn_stage: f64) -> f64 {
    match kind {
        PieceKind::Pawn | PieceKind::Knight | PieceKind::Rook => {
            let PieceValue { opening, endgame } = piece_value(kind);
            let opening = f64::from(opening);
            round2((pawn_stage * (f64::from(endgame) - opening) + opening) / opening)
        }
        _ => 1.0,
    }
}
