pub mod random;

use crate::board::Board;
use crate::types::{Position, Side};

pub use random::RandomMoveSelector;

/// Chooses the computer's move. Returns `None` only when `side` has no legal move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position>;
}

/// Always plays the first legal move in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, side: Side) -> Option<Position> {
        board.legal_moves(side).into_iter().next()
    }
}
