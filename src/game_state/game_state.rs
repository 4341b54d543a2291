//! Playable game: a board plus the make/undo history.
//!
//! `GameState` owns the current [`BoardState`] and a stack of snapshots, one
//! per applied move. Search walks the tree through [`GameState::apply_move_scoped`],
//! whose guard undoes the move when it goes out of scope, so every early
//! return leaves the board exactly as it was found.

use std::ops::{Deref, DerefMut};

use crate::chess_errors::{FenError, MoveError};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::{Move, MoveFlags};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_apply;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Default)]
pub struct GameState {
    board: BoardState,
    undo_stack: Vec<UndoState>,
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position, White to move, all castling rights.
    pub fn new_game() -> Self {
        let mut board = BoardState::new_empty();
        for (col, kind) in (1..=8).zip(BACK_RANK) {
            for (color, back, pawns) in [(Color::Light, 1, 2), (Color::Dark, 8, 7)] {
                if let Some(square) = Square::from_row_col(back, col) {
                    board.set_piece(square, Some(Piece::new(color, kind)));
                }
                if let Some(square) = Square::from_row_col(pawns, col) {
                    board.set_piece(square, Some(Piece::new(color, PieceKind::Pawn)));
                }
            }
        }
        board.set_castling_rights(CASTLE_ALL);
        Self::from_board(board)
    }

    #[inline]
    pub fn from_board(board: BoardState) -> Self {
        Self {
            board,
            undo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen).map(Self::from_board)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(&self.board)
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Direct board access for position setup. Edits made here are not
    /// recorded in the undo history.
    #[inline]
    pub fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    /// Number of applied moves that can still be undone.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.undo_stack.last().map(|undo| &undo.mv)
    }

    /// Validate and play `mv`. On error the board is unchanged.
    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveFlags, MoveError> {
        legal_move_apply::apply_move(self, mv)
    }

    /// Take back the most recent move, returning it.
    pub fn undo_move(&mut self) -> Option<Move> {
        legal_move_apply::undo_move(self)
    }

    /// Play `mv` for the lifetime of the returned guard.
    pub fn apply_move_scoped(&mut self, mv: &Move) -> Result<MoveGuard<'_>, MoveError> {
        let flags = self.apply_move(mv)?;
        Ok(MoveGuard { game: self, flags })
    }

    pub(crate) fn push_undo(&mut self, undo: UndoState) {
        self.undo_stack.push(undo);
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoState> {
        self.undo_stack.pop()
    }
}

/// A move in effect until the guard drops.
pub struct MoveGuard<'a> {
    game: &'a mut GameState,
    flags: MoveFlags,
}

impl MoveGuard<'_> {
    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.flags
    }
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &*self.game
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        &mut *self.game
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.game.undo_move();
    }
}
