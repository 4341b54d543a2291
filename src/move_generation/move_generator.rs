//! Pseudo-legal and legal move generation.
//!
//! Pseudo-legal lists come straight from the per-piece generators, are scored
//! for ordering with MVV-LVA and sorted best first. Legal lists are built by
//! trial-applying each candidate and keeping those `apply_move` accepts.

use smallvec::SmallVec;

use crate::chess_errors::MoveError;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::{Move, MoveFlags};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves_into;
use crate::move_generation::legal_moves_king::generate_king_moves_into;
use crate::move_generation::legal_moves_knight::generate_knight_moves_into;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves_into;
use crate::move_generation::legal_moves_queen::generate_queen_moves_into;
use crate::move_generation::legal_moves_rook::generate_rook_moves_into;
use crate::search::mvv_lva::score_move;

pub type MoveList = SmallVec<[Move; 64]>;

/// Check and mate information about a move, for notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub flags: MoveFlags,
    pub gives_check: bool,
    pub is_checkmate: bool,
}

/// Pseudo-legal moves of whatever stands on `square`, appended to `moves`.
pub fn generate_piece_moves_into(board: &BoardState, square: Square, moves: &mut MoveList) {
    let Some(piece) = board.piece_at(square) else {
        return;
    };
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves_into(board, piece, square, moves),
        PieceKind::Knight => generate_knight_moves_into(board, piece, square, moves),
        PieceKind::Bishop => generate_bishop_moves_into(board, piece, square, moves),
        PieceKind::Rook => generate_rook_moves_into(board, piece, square, moves),
        PieceKind::Queen => generate_queen_moves_into(board, piece, square, moves),
        PieceKind::King => generate_king_moves_into(board, piece, square, moves),
    }
}

/// Every pseudo-legal move of `side`, scored and sorted best first.
pub fn generate_all_moves(board: &BoardState, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (square, _) in board.pieces(side) {
        generate_piece_moves_into(board, square, &mut moves);
    }
    score_and_sort(board, &mut moves);
    moves
}

/// Pseudo-legal moves of `side` that land on an occupied square, scored and
/// sorted best first. En-passant captures land on an empty square and are
/// not included.
pub fn generate_all_capture_moves(board: &BoardState, side: Color) -> MoveList {
    let mut moves = MoveList::new();
    for (square, _) in board.pieces(side) {
        generate_piece_moves_into(board, square, &mut moves);
    }
    moves.retain(|mv| board.piece_at(mv.to).is_some());
    score_and_sort(board, &mut moves);
    moves
}

/// Legal moves of the piece on `square`. Empty when the square is empty or
/// the piece's side is not to move.
pub fn generate_piece_valid_moves(game_state: &mut GameState, square: Square) -> MoveList {
    let mut candidates = MoveList::new();
    generate_piece_moves_into(game_state.board(), square, &mut candidates);
    score_and_sort(game_state.board(), &mut candidates);
    retain_legal(game_state, candidates)
}

/// Legal moves of the side to move, best MVV-LVA score first.
pub fn generate_all_valid_moves(game_state: &mut GameState) -> MoveList {
    let side = game_state.board().side_to_move();
    let candidates = generate_all_moves(game_state.board(), side);
    retain_legal(game_state, candidates)
}

pub fn has_valid_move(game_state: &mut GameState) -> bool {
    let side = game_state.board().side_to_move();
    generate_all_moves(game_state.board(), side)
        .iter()
        .any(|mv| game_state.apply_move_scoped(mv).is_ok())
}

/// Side to move is in check and has no legal reply.
pub fn is_checkmate(game_state: &mut GameState) -> bool {
    let side = game_state.board().side_to_move();
    is_king_in_check(game_state.board(), side) && !has_valid_move(game_state)
}

/// Side to move is not in check and has no legal move.
pub fn is_stalemate(game_state: &mut GameState) -> bool {
    let side = game_state.board().side_to_move();
    !is_king_in_check(game_state.board(), side) && !has_valid_move(game_state)
}

/// Play `mv` on trial and report check and mate for the opponent.
pub fn describe_move(game_state: &mut GameState, mv: &Move) -> Result<MoveAnnotations, MoveError> {
    let mut after = game_state.apply_move_scoped(mv)?;
    let flags = after.flags();
    let opponent = after.board().side_to_move();
    let gives_check = is_king_in_check(after.board(), opponent);
    let is_checkmate = gives_check && !has_valid_move(&mut after);

    Ok(MoveAnnotations {
        flags,
        gives_check,
        is_checkmate,
    })
}

/// Selection step for incremental ordering: swap the best-scored move at or
/// after `index` into `index`.
pub fn pick_next_move(moves: &mut [Move], index: usize) {
    let Some(first) = moves.get(index) else {
        return;
    };
    let mut best_index = index;
    let mut best_score = first.score;
    for (offset, mv) in moves[index + 1..].iter().enumerate() {
        if mv.score > best_score {
            best_score = mv.score;
            best_index = index + 1 + offset;
        }
    }
    moves.swap(index, best_index);
}

fn score_and_sort(board: &BoardState, moves: &mut MoveList) {
    for mv in moves.iter_mut() {
        mv.score = score_move(board, mv);
    }
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

fn retain_legal(game_state: &mut GameState, candidates: MoveList) -> MoveList {
    candidates
        .into_iter()
        .filter(|mv| game_state.apply_move_scoped(mv).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_move::MoveFlag;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut start = GameState::new_game();
        assert_eq!(generate_all_moves(start.board(), Color::Light).len(), 20);
        assert_eq!(generate_all_valid_moves(&mut start).len(), 20);
        assert_eq!(generate_all_moves(start.board(), Color::Dark).len(), 20);
    }

    #[test]
    fn legal_move_counts_respect_pins_and_checks() {
        let mut tangled = game("8/6kN/8/6q1/Pp1rp3/2RP1N2/3Kp3/1r6 w - - 0 1");
        assert_eq!(generate_all_valid_moves(&mut tangled).len(), 4);

        let mut white = game("7k/1Q6/1R6/8/8/8/8/7K w - - 0 1");
        assert_eq!(generate_all_valid_moves(&mut white).len(), 31);

        let mut black = game("7k/1Q6/1R6/8/8/8/8/7K b - - 0 1");
        assert_eq!(generate_all_valid_moves(&mut black).len(), 1);
    }

    #[test]
    fn capture_generation_counts() {
        let pawns = game("3k4/3P4/2PK4/8/8/6p1/8/8 w - - 0 1");
        assert_eq!(generate_all_capture_moves(pawns.board(), Color::Light).len(), 0);
        assert_eq!(generate_all_capture_moves(pawns.board(), Color::Dark).len(), 1);

        let open = game("rn1qkbnr/p4ppp/2p1b3/1Q2p3/2p1P3/3B3P/PP1P1PP1/RNB1K1NR w KQkq - 0 1");
        assert_eq!(generate_all_capture_moves(open.board(), Color::Light).len(), 5);
        assert_eq!(generate_all_capture_moves(open.board(), Color::Dark).len(), 4);
    }

    #[test]
    fn captures_are_ordered_before_quiet_moves() {
        let position = game("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
        let moves = generate_all_moves(position.board(), Color::Light);
        let first = moves.first().expect("moves exist");
        assert_eq!((first.from, first.to), (sq("e4"), sq("d5")));
        assert!(moves.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn piece_valid_moves_filter_illegal_king_steps() {
        let mut position = game("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
        let king_moves = generate_piece_valid_moves(&mut position, sq("e1"));
        let targets: Vec<String> = king_moves.iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(king_moves.len(), 2, "{targets:?}");
        assert!(targets.contains(&"d2".to_owned()));
        assert!(targets.contains(&"f1".to_owned()));

        assert!(generate_piece_valid_moves(&mut position, sq("e4")).is_empty());
        assert!(generate_piece_valid_moves(&mut position, sq("d2")).is_empty());
    }

    #[test]
    fn castling_is_blocked_through_attacked_squares() {
        let mut open = game("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles = generate_all_valid_moves(&mut open)
            .iter()
            .filter(|mv| mv.flag.is_castle())
            .count();
        assert_eq!(castles, 2);

        let mut covered = game("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castle_flags: Vec<MoveFlag> = generate_all_valid_moves(&mut covered)
            .iter()
            .filter(|mv| mv.flag.is_castle())
            .map(|mv| mv.flag)
            .collect();
        assert_eq!(castle_flags, vec![MoveFlag::LightQueensideCastle]);
    }

    #[test]
    fn mate_and_stalemate_detection() {
        let mut mated = game("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(is_checkmate(&mut mated));
        assert!(!is_stalemate(&mut mated));

        let mut stalemated = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_checkmate(&mut stalemated));
        assert!(is_stalemate(&mut stalemated));

        let mut start = GameState::new_game();
        assert!(!is_checkmate(&mut start));
        assert!(!is_stalemate(&mut start));
    }

    #[test]
    fn describe_move_reports_mate() {
        let mut position = game("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let mv = long_algebraic_to_move("a1a8", &mut position).expect("move should parse");
        let annotations = describe_move(&mut position, &mv).expect("move should apply");
        assert!(annotations.gives_check);
        assert!(annotations.is_checkmate);
        assert_eq!(position.history_len(), 0);
    }

    #[test]
    fn pick_next_move_selects_highest_remaining() {
        let mut position = GameState::new_game();
        let mut moves = generate_all_valid_moves(&mut position);
        moves[7].score = 5_000;
        moves[3].score = 9_000;
        pick_next_move(&mut moves, 1);
        assert_eq!(moves[1].score, 9_000);
        pick_next_move(&mut moves, 2);
        assert_eq!(moves[2].score, 5_000);
    }
}
