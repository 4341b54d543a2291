use crate::game_state::board_state::BoardState;
use crate::game_state::chess_move::Move;

/// Single undo record for `apply_move` / `undo_move`: the board as it was
/// before the move, plus the move itself.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub snapshot: BoardState,
    pub mv: Move,
}
