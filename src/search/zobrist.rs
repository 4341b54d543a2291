//! Zobrist hashing for position identity.
//!
//! Keys are 32-bit and drawn from a fixed-seed generator once per process, so
//! hashes are deterministic across runs, which keeps search results
//! reproducible. The board keeps its key current incrementally; the functions
//! here provide the per-feature keys and a from-scratch recomputation.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[u32; 64]; 12],
    side_to_move: [u32; 2],
    castling: [u32; 16],
    en_passant: [u32; 64],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[0u32; 64]; 12];
    for piece in &mut piece_square {
        for key in piece.iter_mut() {
            *key = rng.random();
        }
    }

    let side_to_move = [rng.random(), rng.random()];

    let mut castling = [0u32; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant = [0u32; 64];
    for key in &mut en_passant {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant,
    }
}

/// Return the Zobrist key for a piece standing on a square.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u32 {
    tables().piece_square[piece.index()][square.index()]
}

/// Return the Zobrist key contribution for castling rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u32 {
    tables().castling[usize::from(castling_rights & CASTLE_ALL)]
}

/// Return the Zobrist key contribution for an en-passant target square.
#[inline]
pub fn en_passant_key(square: Square) -> u32 {
    tables().en_passant[square.index()]
}

/// Return the key of the side to move. Exactly one side key is folded into
/// every position hash.
#[inline]
pub fn side_to_move_key(color: Color) -> u32 {
    tables().side_to_move[color.index()]
}

/// Compute the full position key from scratch.
pub fn compute_zobrist_key(board: &BoardState) -> u32 {
    let mut key = 0u32;

    for color in Color::BOTH {
        for (square, piece) in board.pieces(color) {
            key ^= piece_square_key(piece, square);
        }
    }

    key ^= side_to_move_key(board.side_to_move());
    key ^= castling_key(board.castling_rights());

    if let Some(square) = board.en_passant() {
        key ^= en_passant_key(square);
    }

    key
}
