use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Piece does not fit at the requested position")]
    InvalidPlacement,
    #[error("Queue slot is out of range or empty")]
    InvalidQueueIndex,
    #[error("Not enough score to swap pieces")]
    InsufficientScore,
    #[error("Game is over, no new moves are accepted")]
    GameOver,
    #[error("Shape must be a non-empty rectangle of at most 4x4 cells")]
    InvalidShape,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
