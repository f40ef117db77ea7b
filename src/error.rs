use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorkboardError>;

#[derive(Debug, Error)]
pub enum CorkboardError {
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(i64),

    #[error("Invalid card ID format: {0}")]
    InvalidCardId(String),

    #[error("Invalid board ID format: {0}")]
    InvalidBoardId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
