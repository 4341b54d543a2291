//! Engine facade owning one game and one searcher.
//!
//! Hosting layers (the demo binary, a future protocol front end) talk to a
//! single `ChessEngine` value instead of reaching into board, generator and
//! search modules separately. Nothing here is global: two engines never share
//! state.

use log::debug;

use crate::chess_errors::{EngineError, FenError, MoveError, SearchError};
use crate::game_state::chess_move::{Move, MoveFlags};
use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{
    generate_all_valid_moves, generate_piece_valid_moves, is_checkmate, is_stalemate, MoveList,
};
use crate::search::board_scoring::{is_material_draw, BoardScorer, PositionalScorer};
use crate::search::iterative_deepening::{SearchEngine, SearchOptions, SearchResult};
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug)]
pub struct ChessEngine<S: BoardScorer = PositionalScorer> {
    game: GameState,
    search: SearchEngine<S>,
}

impl Default for ChessEngine<PositionalScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessEngine<PositionalScorer> {
    /// Engine on the standard starting position.
    pub fn new() -> Self {
        Self::with_search(GameState::new_game(), SearchEngine::new())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::with_search(GameState::from_fen(fen)?, SearchEngine::new()))
    }
}

impl<S: BoardScorer> ChessEngine<S> {
    pub fn with_search(game: GameState, search: SearchEngine<S>) -> Self {
        Self { game, search }
    }

    #[inline]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.game.get_fen()
    }

    /// Replace the current game. On error the old game is kept.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.game = GameState::from_fen(fen)?;
        Ok(())
    }

    pub fn new_game(&mut self) {
        self.game = GameState::new_game();
    }

    pub fn apply_move(&mut self, mv: &Move) -> Result<MoveFlags, MoveError> {
        self.game.apply_move(mv)
    }

    /// Play a move written as long algebraic text, such as `e2e4`.
    pub fn apply_long_algebraic(&mut self, text: &str) -> Result<Move, EngineError> {
        let mv = long_algebraic_to_move(text, &mut self.game)?;
        self.game.apply_move(&mv)?;
        Ok(mv)
    }

    pub fn undo_move(&mut self) -> Option<Move> {
        self.game.undo_move()
    }

    pub fn valid_moves(&mut self) -> MoveList {
        generate_all_valid_moves(&mut self.game)
    }

    pub fn piece_valid_moves(&mut self, square: Square) -> MoveList {
        generate_piece_valid_moves(&mut self.game, square)
    }

    pub fn is_in_check(&self) -> bool {
        let board = self.game.board();
        is_king_in_check(board, board.side_to_move())
    }

    pub fn is_checkmate(&mut self) -> bool {
        is_checkmate(&mut self.game)
    }

    pub fn is_stalemate(&mut self) -> bool {
        is_stalemate(&mut self.game)
    }

    /// Insufficient material only; repetition is not tracked.
    pub fn is_material_draw(&self) -> bool {
        is_material_draw(self.game.board())
    }

    pub fn search_next_move(&mut self, options: SearchOptions) -> Result<SearchResult, SearchError> {
        self.search.search_next_move(&mut self.game, options)
    }

    /// Search, then play the chosen move. `Ok(None)` when there is nothing to
    /// play.
    pub fn play_best_move(&mut self, options: SearchOptions) -> Result<Option<Move>, EngineError> {
        let result = self.search_next_move(options)?;
        let Some(mv) = result.best_move else {
            debug!("no move to play in {}", self.fen());
            return Ok(None);
        };
        self.game.apply_move(&mv)?;
        Ok(Some(mv))
    }
}
