use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScratchError>;

#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Prize not found: {id}")]
    PrizeNotFound { id: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl ScratchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn prize_not_found(id: impl Into<String>) -> Self {
        Self::PrizeNotFound { id: id.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// conversion from dialoguer::Error
impl From<dialoguer::Error> for ScratchError {
    fn from(err: dialoguer::Error) -> Self {
        ScratchError::Dialog(err.to_string())
    }
}
