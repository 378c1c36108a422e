use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid rootDir: {0}")]
    InvalidRoot(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
