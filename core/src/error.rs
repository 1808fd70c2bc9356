use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match the 5x5 wall")]
    InvalidBoardShape,
    #[error("Round history needs at least one round")]
    EmptyHistory,
}

pub type Result<T> = core::result::Result<T, GameError>;
