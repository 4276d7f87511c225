use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FobError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read {0}. Does it exist?")]
    NotFound(PathBuf),

    #[error("Invalid block width: {0}. Must be one of 1, 2, 4, 8, 16, 32")]
    InvalidWidth(String),
}

pub type Result<T> = std::result::Result<T, FobError>;
