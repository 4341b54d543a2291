//! Core value types for the mailbox board model.
//!
//! Rows and columns are 1-based (`row 1` is White's back rank, `col 1` is the
//! a-file), matching how the evaluation tables and FEN adapters address the
//! board. Squares pack to `0..=63` as `(row - 1) * 8 + (col - 1)`.

use std::fmt;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// `+1` for White, `-1` for Black. Used both for score signs and as the
    /// pawn push direction along rows.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Dense index in `0..12`: White pieces first, then Black.
    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }
}

/// On-board square, `0..=63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Build from a packed index; indices past 63 wrap onto the board.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        Self(index & 63)
    }

    /// Build from 1-based row/column, or `None` when off the board.
    #[inline]
    pub const fn from_row_col(row: i8, col: i8) -> Option<Self> {
        if row < 1 || row > 8 || col < 1 || col > 8 {
            None
        } else {
            Some(Self(((row - 1) * 8 + (col - 1)) as u8))
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn row(self) -> i8 {
        (self.0 / 8) as i8 + 1
    }

    #[inline]
    pub const fn col(self) -> i8 {
        (self.0 % 8) as i8 + 1
    }

    #[inline]
    pub const fn mask(self) -> u64 {
        1u64 << self.0
    }

    /// The square `d_row` rows and `d_col` columns away, if still on the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_row_col(self.row() + d_row, self.col() + d_col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + (self.0 % 8));
        let rank = char::from(b'1' + (self.0 / 8));
        write!(f, "{file}{rank}")
    }
}

/// Result of addressing the board by row/column. Coordinates outside `1..=8`
/// yield `OffBoard`, which lets attack scans walk rays without bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareContent {
    OffBoard,
    Empty,
    Occupied(Piece),
}

impl SquareContent {
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            SquareContent::Occupied(piece) => Some(piece),
            _ => None,
        }
    }
}

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;

/// Castling rights bitmask (`0..=15`).
pub type CastlingRights = u8;

/// Both castling rights of one side.
#[inline]
pub const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}
