//! Move records produced by the generator and consumed by `apply_move`.

use std::fmt;

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

/// Special-move marker carried on a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    None,
    EnPassant,
    Promotion(PieceKind),
    LightKingsideCastle,
    LightQueensideCastle,
    DarkKingsideCastle,
    DarkQueensideCastle,
}

impl MoveFlag {
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(
            self,
            MoveFlag::LightKingsideCastle
                | MoveFlag::LightQueensideCastle
                | MoveFlag::DarkKingsideCastle
                | MoveFlag::DarkQueensideCastle
        )
    }

    /// Rook `(from, to)` squares for castle flags.
    pub fn castle_rook_squares(self) -> Option<(Square, Square)> {
        let (from, to) = match self {
            MoveFlag::LightKingsideCastle => (7, 5),
            MoveFlag::LightQueensideCastle => (0, 3),
            MoveFlag::DarkKingsideCastle => (63, 61),
            MoveFlag::DarkQueensideCastle => (56, 59),
            _ => return None,
        };
        Some((Square::from_index(from), Square::from_index(to)))
    }

    pub const fn kingside_castle(color: Color) -> Self {
        match color {
            Color::Light => MoveFlag::LightKingsideCastle,
            Color::Dark => MoveFlag::DarkKingsideCastle,
        }
    }

    pub const fn queenside_castle(color: Color) -> Self {
        match color {
            Color::Light => MoveFlag::LightQueensideCastle,
            Color::Dark => MoveFlag::DarkQueensideCastle,
        }
    }
}

/// A candidate or played move.
///
/// `hash` is the Zobrist key of the position the move was generated from; the
/// PV cache uses it to verify that a stored move still belongs to the probed
/// position. `score` is ordering metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub from: Square,
    pub to: Square,
    pub flag: MoveFlag,
    pub hash: u32,
    pub score: i32,
}

impl Move {
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_quiet(&self) -> bool {
        self.captured.is_none()
    }

    #[inline]
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.flag {
            MoveFlag::Promotion(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            let suffix = match kind {
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Rook => 'r',
                _ => 'q',
            };
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

/// What `apply_move` actually did, for notation and statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub en_passant: bool,
    pub castle: Option<MoveFlag>,
    pub promotion: Option<PieceKind>,
    pub captured: Option<Piece>,
}
