//! Mailbox board with incrementally maintained indexes.
//!
//! `BoardState` is the single source of truth for a position. Besides the 64
//! squares it keeps, per side, the king square, piece counts, unstaged
//! material, pawn material, occupancy masks for all pieces and for pawns, and
//! the pieces that have been captured. Every mutation goes through
//! [`BoardState::put_piece`] / [`BoardState::remove_piece`] or the flag
//! setters, and each of those keeps the indexes and the Zobrist key in step
//! with the squares. A clone is a complete snapshot.

use smallvec::SmallVec;

use crate::game_state::chess_types::*;
use crate::search::zobrist::{
    castling_key, compute_zobrist_key, en_passant_key, piece_square_key, side_to_move_key,
};
use crate::tables::piece_values::{starting_value, PAWN_VALUE};

/// Pieces of one color that have been captured, in capture order.
pub type CapturedPieces = SmallVec<[Piece; 16]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    // --- Mailbox ---
    squares: [Option<Piece>; 64],

    // --- Side and state flags ---
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,

    // --- Clocks / move counters ---
    halfmove_clock: u16,
    fullmove_number: u16,

    // --- Incremental indexes, [color] ---
    king_position: [Option<Square>; 2],
    piece_count: [[u8; 6]; 2],
    material: [i32; 2],
    pawn_material: [i32; 2],
    piece_locations: [u64; 2],
    pawn_locations: [u64; 2],
    captured: [CapturedPieces; 2],

    // --- Incremental hashing ---
    zobrist_key: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl BoardState {
    /// Empty board, White to move, no rights, clocks at zero.
    pub fn new_empty() -> Self {
        let mut board = Self {
            squares: [None; 64],
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 0,
            king_position: [None; 2],
            piece_count: [[0; 6]; 2],
            material: [0; 2],
            pawn_material: [0; 2],
            piece_locations: [0; 2],
            pawn_locations: [0; 2],
            captured: [CapturedPieces::new(), CapturedPieces::new()],
            zobrist_key: 0,
        };
        board.zobrist_key = compute_zobrist_key(&board);
        board
    }

    pub fn reset_to_empty(&mut self) {
        *self = Self::new_empty();
    }

    // --- Square access ---

    /// Content at 1-based `(row, col)`; coordinates off the board read as
    /// [`SquareContent::OffBoard`].
    #[inline]
    pub fn get_piece(&self, row: i8, col: i8) -> SquareContent {
        match Square::from_row_col(row, col) {
            None => SquareContent::OffBoard,
            Some(square) => match self.squares[square.index()] {
                None => SquareContent::Empty,
                Some(piece) => SquareContent::Occupied(piece),
            },
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// True only for an on-board square with nothing on it.
    #[inline]
    pub fn is_empty(&self, row: i8, col: i8) -> bool {
        self.get_piece(row, col) == SquareContent::Empty
    }

    #[inline]
    pub fn piece_color_at(&self, row: i8, col: i8) -> Option<Color> {
        self.get_piece(row, col).piece().map(|piece| piece.color)
    }

    /// Place `piece` on `square` (or clear it with `None`), replacing whatever
    /// stood there. Indexes and hash follow.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.remove_piece(square);
        if let Some(piece) = piece {
            self.put_piece(square, piece);
        }
    }

    /// Place `piece` on an empty `square`.
    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.squares[square.index()].is_none());
        let side = piece.color.index();

        self.squares[square.index()] = Some(piece);
        self.piece_count[side][piece.kind.index()] += 1;
        self.material[side] += starting_value(piece.kind);
        self.piece_locations[side] |= square.mask();

        match piece.kind {
            PieceKind::Pawn => {
                self.pawn_material[side] += PAWN_VALUE;
                self.pawn_locations[side] |= square.mask();
            }
            PieceKind::King => self.king_position[side] = Some(square),
            _ => {}
        }

        self.zobrist_key ^= piece_square_key(piece, square);
    }

    /// Lift whatever stands on `square`.
    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.squares[square.index()].take()?;
        let side = piece.color.index();

        self.piece_count[side][piece.kind.index()] -= 1;
        self.material[side] -= starting_value(piece.kind);
        self.piece_locations[side] &= !square.mask();

        match piece.kind {
            PieceKind::Pawn => {
                self.pawn_material[side] -= PAWN_VALUE;
                self.pawn_locations[side] &= !square.mask();
            }
            PieceKind::King if self.king_position[side] == Some(square) => {
                self.king_position[side] = None;
            }
            _ => {}
        }

        self.zobrist_key ^= piece_square_key(piece, square);
        Some(piece)
    }

    // --- Side and state flags ---

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.zobrist_key ^= side_to_move_key(self.side_to_move) ^ side_to_move_key(color);
        self.side_to_move = color;
    }

    pub fn switch_side(&mut self) {
        self.set_side_to_move(self.side_to_move.opposite());
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        let rights = rights & CASTLE_ALL;
        self.zobrist_key ^= castling_key(self.castling_rights) ^ castling_key(rights);
        self.castling_rights = rights;
    }

    pub fn remove_castling_rights(&mut self, rights: CastlingRights) {
        self.set_castling_rights(self.castling_rights & !rights);
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Set or clear (`None`) the en-passant target square.
    pub fn set_en_passant(&mut self, square: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.zobrist_key ^= en_passant_key(old);
        }
        if let Some(new) = square {
            self.zobrist_key ^= en_passant_key(new);
        }
        self.en_passant = square;
    }

    // --- Clocks ---

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, value: u16) {
        self.halfmove_clock = value;
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, value: u16) {
        self.fullmove_number = value;
    }

    pub fn increment_fullmove_counter(&mut self) {
        self.fullmove_number = self.fullmove_number.saturating_add(1);
    }

    // --- Indexes ---

    #[inline]
    pub fn king_position(&self, color: Color) -> Option<Square> {
        self.king_position[color.index()]
    }

    #[inline]
    pub fn piece_count(&self, color: Color, kind: PieceKind) -> u8 {
        self.piece_count[color.index()][kind.index()]
    }

    /// Unstaged material of `color`, king included.
    #[inline]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    #[inline]
    pub fn pawn_material(&self, color: Color) -> i32 {
        self.pawn_material[color.index()]
    }

    #[inline]
    pub fn piece_locations(&self, color: Color) -> u64 {
        self.piece_locations[color.index()]
    }

    #[inline]
    pub fn pawn_locations(&self, color: Color) -> u64 {
        self.pawn_locations[color.index()]
    }

    /// Every piece of `color` with its square, in square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares_in(self.piece_locations(color))
            .filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn pawns(&self, color: Color) -> impl Iterator<Item = Square> {
        squares_in(self.pawn_locations(color))
    }

    /// Pieces of `color` that have been taken off the board.
    #[inline]
    pub fn captured_pieces(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    pub(crate) fn record_capture(&mut self, piece: Piece) {
        self.captured[piece.color.index()].push(piece);
    }

    // --- Hash ---

    #[inline]
    pub fn zobrist_key(&self) -> u32 {
        self.zobrist_key
    }
}

fn squares_in(mut mask: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let index = mask.trailing_zeros() as u8;
        mask &= mask - 1;
        Some(Square::from_index(index))
    })
}
