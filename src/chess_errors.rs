//! Error types shared across the engine core.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Failure to load a position from Forsyth-Edwards Notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),
    #[error("FEN has extra trailing fields")]
    TrailingFields,
    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),
    #[error("invalid side-to-move field: {0}")]
    InvalidSide(String),
    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),
    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(String),
    #[error("invalid move clock: {0}")]
    InvalidClock(String),
}

/// Rejection of a move handed to `apply_move`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("origin square {0} does not hold the moving piece")]
    PieceMismatch(Square),
    #[error("it is not {0:?}'s turn to move")]
    WrongSide(Color),
    #[error("destination square {0} holds a piece of the moving side")]
    OwnPieceOnDestination(Square),
    #[error("move leaves the {0:?} king attacked")]
    LeavesKingInCheck(Color),
}

/// Failure to read square or move text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),
    #[error("invalid long algebraic move: {0}")]
    InvalidMoveText(String),
    #[error("no legal move matches {0}")]
    NoMatchingMove(String),
}

/// Preconditions that make a position unsearchable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("the {0:?} side has no king on the board")]
    MissingKing(Color),
}

/// Any failure surfaced by the `ChessEngine` facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Search(#[from] SearchError),
}
