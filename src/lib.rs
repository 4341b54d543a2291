//! Crate root module declarations for the Plum chess engine core.
//!
//! This file exposes the board model, move generation, evaluation tables,
//! search, and notation helpers so binaries, benches, and hosting layers can
//! import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board_state;
    pub mod chess_move;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod cutoff_table;
    pub mod iterative_deepening;
    pub mod mvv_lva;
    pub mod pv_table;
    pub mod zobrist;
}

pub mod tables {
    pub mod piece_square_tables;
    pub mod piece_values;
}

pub mod engines {
    pub mod engine;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
