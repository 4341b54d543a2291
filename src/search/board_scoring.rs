//! Pluggable board evaluation interfaces and the positional evaluator.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Evaluators compute a Light-minus-Dark score; `BoardScorer::score` turns it
//! into the side-to-move perspective negamax expects.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::Move;
use crate::game_state::chess_types::*;
use crate::tables::piece_square_tables::{piece_square_value, KING_ENDGAME_MATERIAL};
use crate::tables::piece_values::{pawn_stage, piece_stage, round2, starting_value};

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, board: &BoardState, last_move: Option<&Move>) -> i32;
}

/// Staged material per color, indexed by `Color::index`.
pub type MaterialScores = [i32; 2];

/// Weights of the positional terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationConfig {
    pub bishop_pair_bonus: i32,
    pub isolated_pawn_penalty: i32,
    pub doubled_pawn_penalty: i32,
    /// Penalty per lost castling right in the opening.
    pub castling_penalty: i32,
    /// Penalty per lost castling right once every pawn is gone.
    pub endgame_castling_penalty: i32,
    /// Bonus for the side that castled on the move just played.
    pub castling_bonus: i32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            bishop_pair_bonus: 30,
            isolated_pawn_penalty: 10,
            doubled_pawn_penalty: 10,
            castling_penalty: 99,
            endgame_castling_penalty: 0,
            castling_bonus: 0,
        }
    }
}

/// Material, piece-square tables, pawn structure and castling rights.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer {
    pub config: EvaluationConfig,
}

impl PositionalScorer {
    pub const fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    /// Light-minus-Dark evaluation of `board`. `last_move` is the move that
    /// produced the position, used for the castling bonus.
    pub fn evaluate_board(&self, board: &BoardState, last_move: Option<&Move>) -> i32 {
        let material = material_scores(board);
        let mut score = material[Color::Light.index()] - material[Color::Dark.index()];

        for color in Color::BOTH {
            let sign = color.sign();
            for (square, piece) in board.pieces(color) {
                score += sign * evaluate_piece(piece, square, &material);
            }
            if board.piece_count(color, PieceKind::Bishop) >= 2 {
                score += sign * self.config.bishop_pair_bonus;
            }
            score += sign * self.pawns_score(board, color);
            score += sign * self.castling_score(board, color);
        }

        if let Some(mv) = last_move.filter(|mv| mv.flag.is_castle()) {
            score += mv.piece.color.sign() * self.config.castling_bonus;
        }

        score
    }

    /// Penalties for isolated and doubled pawns of `color`. A pawn counts as
    /// isolated when neither rear diagonal holds a friendly pawn, unless it
    /// still stands on its home rank.
    pub fn pawns_score(&self, board: &BoardState, color: Color) -> i32 {
        let pawns = board.pawn_locations(color);
        let dir = color.forward();
        let has_pawn = |row: i8, col: i8| {
            Square::from_row_col(row, col).is_some_and(|sq| pawns & sq.mask() != 0)
        };
        let advanced = |row: i8| match color {
            Color::Light => row > 2,
            Color::Dark => row < 7,
        };

        let mut score = 0;
        for square in board.pawns(color) {
            let (row, col) = (square.row(), square.col());
            if !has_pawn(row - dir, col - dir) && !has_pawn(row - dir, col + dir) && advanced(row) {
                score -= self.config.isolated_pawn_penalty;
            }
            if has_pawn(row - dir, col) {
                score -= self.config.doubled_pawn_penalty;
            }
        }
        score
    }

    /// Penalty for each castling right `color` has lost, fading towards
    /// `endgame_castling_penalty` as pawns leave the board.
    pub fn castling_score(&self, board: &BoardState, color: Color) -> i32 {
        let rights = castling_rights_of(color);
        let missing = [
            rights & (CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE),
            rights & (CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE),
        ]
        .into_iter()
        .filter(|&right| !board.has_castling_right(right))
        .count();

        if missing == 0 || self.config.castling_penalty == 0 {
            return 0;
        }

        let penalty = f64::from(self.config.castling_penalty);
        let endgame_penalty = f64::from(self.config.endgame_castling_penalty);
        let stage = round2((pawn_stage(board) * (endgame_penalty - penalty) + penalty) / penalty);

        let mut score = 0.0;
        for _ in 0..missing {
            score -= stage * penalty;
        }
        // Halves round towards positive infinity: -49.5 becomes -49.
        (score + 0.5).floor() as i32
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &BoardState, last_move: Option<&Move>) -> i32 {
        self.evaluate_board(board, last_move) * board.side_to_move().sign()
    }
}

/// Staged material only; useful as a baseline and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &BoardState, _last_move: Option<&Move>) -> i32 {
        let material = material_scores(board);
        let white_minus_black = material[Color::Light.index()] - material[Color::Dark.index()];
        white_minus_black * board.side_to_move().sign()
    }
}

/// Sum over kinds of `count * opening value * stage multiplier`, rounded per
/// kind.
pub fn staged_material(board: &BoardState, color: Color) -> i32 {
    let stage = pawn_stage(board);
    PieceKind::ALL
        .into_iter()
        .map(|kind| {
            let count = f64::from(board.piece_count(color, kind));
            (count * f64::from(starting_value(kind)) * piece_stage(kind, stage)).round() as i32
        })
        .sum()
}

pub fn material_scores(board: &BoardState) -> MaterialScores {
    [
        staged_material(board, Color::Light),
        staged_material(board, Color::Dark),
    ]
}

/// Piece-square value of `piece` on `square`. The king reads its endgame
/// table once its side's staged material drops to `KING_ENDGAME_MATERIAL`.
#[inline]
pub fn evaluate_piece(piece: Piece, square: Square, material: &MaterialScores) -> i32 {
    let king_endgame = material[piece.color.index()] <= KING_ENDGAME_MATERIAL;
    piece_square_value(piece.color, piece.kind, square, king_endgame)
}

/// `evaluate_piece` for callers without precomputed material. Only the king
/// needs the material totals.
pub fn evaluate_piece_on_board(board: &BoardState, piece: Piece, square: Square) -> i32 {
    let king_endgame = piece.kind == PieceKind::King
        && staged_material(board, piece.color) <= KING_ENDGAME_MATERIAL;
    piece_square_value(piece.color, piece.kind, square, king_endgame)
}

/// Bare kings, or a single minor piece against a bare king. Same-colored
/// bishops and repetition are not detected.
pub fn is_material_draw(board: &BoardState) -> bool {
    let count = |kind: PieceKind| {
        (
            board.piece_count(Color::Light, kind),
            board.piece_count(Color::Dark, kind),
        )
    };
    let total = |kind: PieceKind| {
        let (light, dark) = count(kind);
        light + dark
    };

    if total(PieceKind::Queen) > 0 || total(PieceKind::Rook) > 0 || total(PieceKind::Pawn) > 0 {
        return false;
    }

    let knights = count(PieceKind::Knight);
    let bishops = count(PieceKind::Bishop);
    match (knights, bishops) {
        ((0, 0), (0, 0)) => true,
        ((0, 0), (1, 0) | (0, 1)) => true,
        ((1, 0) | (0, 1), (0, 0)) => true,
        _ => false,
    }
}
