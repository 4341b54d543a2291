//! Make / undo for [`GameState`].
//!
//! `apply_move` checks the move against the board, pushes a snapshot, plays
//! the move through the board's incremental primitives, and rolls back if the
//! mover's king is left attacked. `undo_move` restores the snapshot.

use crate::chess_errors::MoveError;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::{Move, MoveFlag, MoveFlags};
use crate::game_state::chess_rules::ROOK_CORNERS;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_checks::is_king_in_check;

pub fn apply_move(game_state: &mut GameState, mv: &Move) -> Result<MoveFlags, MoveError> {
    let board = game_state.board();
    let mover = mv.piece.color;

    if board.piece_at(mv.from) != Some(mv.piece) {
        return Err(MoveError::PieceMismatch(mv.from));
    }
    if board.side_to_move() != mover {
        return Err(MoveError::WrongSide(mover));
    }
    if board.piece_at(mv.to).is_some_and(|piece| piece.color == mover) {
        return Err(MoveError::OwnPieceOnDestination(mv.to));
    }

    let snapshot = board.clone();
    game_state.push_undo(UndoState { snapshot, mv: *mv });

    let flags = play_on_board(game_state.board_mut(), mv);

    if is_king_in_check(game_state.board(), mover) {
        undo_move(game_state);
        return Err(MoveError::LeavesKingInCheck(mover));
    }

    Ok(flags)
}

pub fn undo_move(game_state: &mut GameState) -> Option<Move> {
    let undo = game_state.pop_undo()?;
    *game_state.board_mut() = undo.snapshot;
    Some(undo.mv)
}

fn play_on_board(board: &mut BoardState, mv: &Move) -> MoveFlags {
    let mover = mv.piece.color;
    let mut flags = MoveFlags::default();

    board.remove_piece(mv.from);

    let capture_square = match mv.flag {
        MoveFlag::EnPassant => Square::from_row_col(mv.from.row(), mv.to.col()),
        _ => Some(mv.to),
    };
    if let Some(square) = capture_square {
        if let Some(captured) = board.remove_piece(square) {
            board.record_capture(captured);
            flags.captured = Some(captured);
            flags.en_passant = mv.flag == MoveFlag::EnPassant;
        }
    }

    if let Some((rook_from, rook_to)) = mv.flag.castle_rook_squares() {
        if let Some(rook) = board.remove_piece(rook_from) {
            board.put_piece(rook_to, rook);
        }
        flags.castle = Some(mv.flag);
    }

    let placed = match mv.flag {
        MoveFlag::Promotion(kind) => {
            flags.promotion = Some(kind);
            Piece::new(mover, kind)
        }
        _ => mv.piece,
    };
    board.put_piece(mv.to, placed);

    let mut lost_rights = 0;
    if mv.piece.kind == PieceKind::King {
        lost_rights |= castling_rights_of(mover);
    }
    for (corner, right) in ROOK_CORNERS {
        if mv.from == corner || mv.to == corner {
            lost_rights |= right;
        }
    }
    if board.castling_rights() & lost_rights != 0 {
        board.remove_castling_rights(lost_rights);
    }

    let double_push = mv.piece.kind == PieceKind::Pawn && (mv.to.row() - mv.from.row()).abs() == 2;
    board.set_en_passant(if double_push {
        mv.from.offset(mover.forward(), 0)
    } else {
        None
    });

    if mv.piece.kind == PieceKind::Pawn || flags.captured.is_some() {
        board.set_halfmove_clock(0);
    } else {
        board.set_halfmove_clock(board.halfmove_clock().saturating_add(1));
    }
    board.increment_fullmove_counter();
    board.switch_side();

    flags
}

#[cfg(test)]
mod tests {
    use crate::chess_errors::MoveError;
    use crate::game_state::chess_move::{Move, MoveFlag};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::search::zobrist::compute_zobrist_key;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn play(game: &mut GameState, text: &str) {
        let mv = long_algebraic_to_move(text, game).expect("move should parse");
        game.apply_move(&mv).expect("move should apply");
    }

    fn raw_move(game: &GameState, from: &str, to: &str) -> Move {
        let from = crate::utils::algebraic::algebraic_to_square(from).expect("square");
        let to = crate::utils::algebraic::algebraic_to_square(to).expect("square");
        Move {
            piece: game.board().piece_at(from).expect("piece on origin"),
            captured: game.board().piece_at(to),
            from,
            to,
            flag: MoveFlag::None,
            hash: game.board().zobrist_key(),
            score: 0,
        }
    }

    #[test]
    fn quiet_move_updates_fen_and_counters() {
        let mut game = GameState::new_game();
        play(&mut game, "b2b3");
        assert_eq!(
            game.get_fen(),
            "rnbqkbnr/pppppppp/8/8/8/1P6/P1PPPPPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut game = GameState::from_fen(
            "2r3k1/1q1nbppp/r3p3/3pP3/p1pP4/P1Q2N2/1PRN1PPP/2R4K w - - 0 0",
        )
        .expect("FEN should parse");
        play(&mut game, "b2b4");
        assert_eq!(
            game.board().en_passant().map(|sq| sq.to_string()),
            Some("b3".to_owned())
        );

        let mv = long_algebraic_to_move("a4b3", &mut game).expect("move should parse");
        assert_eq!(mv.flag, MoveFlag::EnPassant);
        let flags = game.apply_move(&mv).expect("en passant should apply");

        assert!(flags.en_passant);
        assert_eq!(
            flags.captured,
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
        assert_eq!(
            game.get_fen(),
            "2r3k1/1q1nbppp/r3p3/3pP3/2pP4/PpQ2N2/2RN1PPP/2R4K w - - 0 2"
        );
        assert_eq!(game.board().captured_pieces(Color::Light).len(), 1);
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let mut game = GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 0")
            .expect("FEN should parse");
        let mv = long_algebraic_to_move("e1g1", &mut game).expect("move should parse");
        assert_eq!(mv.flag, MoveFlag::LightKingsideCastle);

        let flags = game.apply_move(&mv).expect("castle should apply");
        assert_eq!(flags.castle, Some(MoveFlag::LightKingsideCastle));
        assert_eq!(
            game.get_fen(),
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq - 1 1"
        );
        assert_eq!(game.board().zobrist_key(), compute_zobrist_key(game.board()));
    }

    #[test]
    fn promotion_swaps_piece_and_material() {
        let mut game = GameState::from_fen("8/P7/8/k7/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let before = game.board().material(Color::Light);
        play(&mut game, "a7a8q");

        assert_eq!(game.get_fen(), "Q7/8/8/k7/8/8/8/K7 b - - 0 2");
        assert_eq!(game.board().pawn_material(Color::Light), 0);
        assert_eq!(game.board().material(Color::Light), before - 100 + 1000);
    }

    #[test]
    fn rook_capture_on_corner_clears_opponent_right() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        play(&mut game, "a1a8");
        assert_eq!(game.board().castling_rights(), CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE);
    }

    #[test]
    fn move_ignoring_check_is_rejected_and_rolled_back() {
        let mut game = GameState::from_fen(
            "r1bqkb1r/ppp2ppp/5n2/3P4/3p4/2NB4/PPPPQPPP/R1B1K2R b KQkq - 0 1",
        )
        .expect("FEN should parse");
        let before = game.board().clone();

        // The e2 queen already sees e8 down the open file; d8xd5 does nothing about it.
        let mv = raw_move(&game, "d8", "d5");
        let err = game.apply_move(&mv).expect_err("d8xd5 should be illegal");
        assert_eq!(err, MoveError::LeavesKingInCheck(Color::Dark));
        assert_eq!(game.board(), &before);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn illegal_en_passant_exposing_king_is_rejected() {
        let mut game =
            GameState::from_fen("8/6bb/8/8/R1pP2k1/4P3/P7/K7 b - d3 0 0").expect("FEN should parse");
        let mut mv = raw_move(&game, "c4", "d3");
        mv.flag = MoveFlag::EnPassant;
        mv.captured = Some(Piece::new(Color::Light, PieceKind::Pawn));

        assert_eq!(
            game.apply_move(&mv),
            Err(MoveError::LeavesKingInCheck(Color::Dark))
        );
    }

    #[test]
    fn validation_errors() {
        let mut game = GameState::new_game();

        let mut wrong_piece = raw_move(&game, "e2", "e4");
        wrong_piece.piece = Piece::new(Color::Light, PieceKind::Queen);
        assert_eq!(
            game.apply_move(&wrong_piece),
            Err(MoveError::PieceMismatch(wrong_piece.from))
        );

        let own_capture = raw_move(&game, "a1", "a2");
        assert_eq!(
            game.apply_move(&own_capture),
            Err(MoveError::OwnPieceOnDestination(own_capture.to))
        );

        let black_move = raw_move(&game, "e7", "e5");
        assert_eq!(
            game.apply_move(&black_move),
            Err(MoveError::WrongSide(Color::Dark))
        );
    }

    #[test]
    fn apply_then_undo_restores_everything() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "1n2k3/P6P/8/8/8/8/p6p/4K1N1 w - - 0 1",
            "1n2k3/P6P/8/8/8/8/p6p/4K1N1 b - - 0 1",
        ];
        let mut castles = Vec::new();
        let mut promotions = Vec::new();
        let mut en_passant = false;

        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let before = game.board().clone();
            let side = before.side_to_move();

            for mv in crate::move_generation::move_generator::generate_all_moves(game.board(), side) {
                let Ok(flags) = game.apply_move(&mv) else {
                    assert_eq!(game.board(), &before);
                    continue;
                };
                assert_eq!(game.board().zobrist_key(), compute_zobrist_key(game.board()), "{fen} {mv}");
                assert_eq!(game.undo_move(), Some(mv));
                assert_eq!(game.board(), &before, "{fen} {mv}");

                castles.extend(flags.castle);
                promotions.extend(flags.promotion.map(|kind| (side, kind)));
                en_passant |= flags.en_passant;
            }
        }

        for castle in [
            MoveFlag::LightKingsideCastle,
            MoveFlag::LightQueensideCastle,
            MoveFlag::DarkKingsideCastle,
            MoveFlag::DarkQueensideCastle,
        ] {
            assert!(castles.contains(&castle), "{castle:?} never played");
        }
        for side in Color::BOTH {
            for kind in [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
                assert!(promotions.contains(&(side, kind)), "{side:?} never promoted to {kind:?}");
            }
        }
        assert!(en_passant);
    }
}
