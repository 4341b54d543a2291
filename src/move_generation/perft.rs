//! Move-path enumeration for validating the generator against published
//! node counts.

use crate::game_state::chess_move::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{describe_move, generate_all_moves, MoveAnnotations};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, annotations: &MoveAnnotations) {
        let flags = annotations.flags;
        self.nodes += 1;
        self.captures += u64::from(flags.captured.is_some());
        self.en_passant += u64::from(flags.en_passant);
        self.castles += u64::from(flags.castle.is_some());
        self.promotions += u64::from(flags.promotion.is_some());
        self.checks += u64::from(annotations.gives_check);
        self.checkmates += u64::from(annotations.is_checkmate);
    }
}

/// Count legal move paths of exactly `depth` plies, with statistics about the
/// last move of each path. `game` is restored before returning.
pub fn perft(game_state: &mut GameState, depth: u32) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }
    perft_recurse(game_state, depth, &mut total);
    total
}

/// Per-root-move breakdown of [`perft`], in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u32) -> Vec<(Move, PerftCounts)> {
    let side = game_state.board().side_to_move();
    let moves = generate_all_moves(game_state.board(), side);
    let mut divided = Vec::with_capacity(moves.len());
    for mv in &moves {
        if depth <= 1 {
            if let Ok(annotations) = describe_move(game_state, mv) {
                let mut counts = PerftCounts::default();
                counts.record_leaf(&annotations);
                divided.push((*mv, counts));
            }
            continue;
        }
        let Ok(mut child) = game_state.apply_move_scoped(mv) else {
            continue;
        };
        divided.push((*mv, perft(&mut child, depth - 1)));
    }
    divided
}

fn perft_recurse(game_state: &mut GameState, depth_left: u32, counts: &mut PerftCounts) {
    let side = game_state.board().side_to_move();
    let moves = generate_all_moves(game_state.board(), side);
    for mv in &moves {
        if depth_left == 1 {
            if let Ok(annotations) = describe_move(game_state, mv) {
                counts.record_leaf(&annotations);
            }
            continue;
        }
        let Ok(mut child) = game_state.apply_move_scoped(mv) else {
            continue;
        };
        perft_recurse(&mut child, depth_left - 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u32) -> u64 {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        perft(&mut game, depth).nodes
    }

    #[test]
    fn depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(
            perft(&mut game, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&mut game, 1).nodes, 20);
        assert_eq!(perft(&mut game, 2).nodes, 400);
        assert_eq!(
            perft(&mut game, 3),
            PerftCounts {
                nodes: 8902,
                captures: 34,
                checks: 12,
                ..PerftCounts::default()
            }
        );
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn kiwipete() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        assert_eq!(
            perft(&mut game, 2),
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn endgame_with_en_passant_pins() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        let mut game = GameState::from_fen(POSITION_3).expect("FEN should parse");
        let counts = perft(&mut game, 3);
        assert_eq!(counts.nodes, 2812);
        assert_eq!(counts.captures, 209);
        assert_eq!(counts.en_passant, 2);
        assert_eq!(counts.checks, 267);
    }

    #[test]
    fn promotions_and_castling() {
        assert_eq!(nodes(POSITION_4, 1), 6);
        let mut game = GameState::from_fen(POSITION_4).expect("FEN should parse");
        let counts = perft(&mut game, 2);
        assert_eq!(counts.nodes, 264);
        assert_eq!(counts.captures, 87);
        assert_eq!(counts.castles, 6);
        assert_eq!(counts.promotions, 48);
        assert_eq!(counts.checks, 10);
    }

    #[test]
    fn tricky_promotion_position() {
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1486);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let divided = perft_divide(&mut game, 2);
        assert_eq!(divided.len(), 48);
        let mut total = PerftCounts::default();
        for (_, counts) in divided {
            total.merge(counts);
        }
        assert_eq!(total, perft(&mut game, 2));
    }
}
