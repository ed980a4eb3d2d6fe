use thiserror::Error;

use crate::types::Position;

/// Every failure the engine and controller can report. All of them are
/// recoverable: the caller drops the offending input and keeps its state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid board size {0}: expected an even size between 4 and 8")]
    InvalidBoardSize(u8),

    #[error("position ({}, {}) is outside a {}x{} board", .pos.row, .pos.col, .size, .size)]
    OutOfBounds { pos: Position, size: u8 },

    #[error("illegal move at ({}, {})", .0.row, .0.col)]
    IllegalMove(Position),

    #[error("expected {expected} cells, got {actual}")]
    InvalidCells { expected: usize, actual: usize },

    #[error("invalid board text: {0}")]
    InvalidBoardText(String),

    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotPlayersTurn,

    #[error("waiting for the opponent's move")]
    OpponentPending,

    #[error("move selector returned an unusable move")]
    SelectorRejected,
}
