use crate::answer::AnswerCode;
use thiserror::Error;

/// Main error type for serial control operations
#[derive(Error, Debug)]
pub enum BraviaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Serial port is not open")]
    NotOpen,

    #[error("Display answered: {0}")]
    Answer(AnswerCode),

    #[error("Frame invalid: {0}")]
    FrameInvalid(String),
}

/// Result type alias for serial control operations
pub type BraviaResult<T> = Result<T, BraviaError>;
