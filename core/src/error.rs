use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidCardIndex,
    #[error("Token does not appear exactly twice on the board")]
    UnpairedToken,
    #[error("Board has no cards")]
    EmptyBoard,
    #[error("Board has more cards than can be indexed")]
    BoardTooLarge,
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Serialization failure: {0}")]
    Serialization(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
