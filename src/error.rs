//! Rule violations reported by the board and the game controller.

use crate::color::Color;

pub type GameResult<T> = Result<T, GameError>;

/// Every error leaves the board exactly as it was before the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid board size {0}")]
    InvalidBoardSize(usize),
    #[error("no intersection at row={row}, column={column}")]
    OutOfBounds { row: usize, column: usize },
    #[error("cannot place a stone of color {0}")]
    InvalidColor(Color),
    #[error("intersection at row={row}, column={column} is already occupied")]
    AlreadyOccupied { row: usize, column: usize },
    #[error("suicide: no liberties and no neighbor enemy group is dying")]
    Suicide,
    #[error("turn of another color: {expected} to move, got {got}")]
    WrongTurn { expected: Color, got: Color },
    #[error("move at row={row}, column={column} is disallowed")]
    IllegalMove { row: usize, column: usize },
}
