use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid coverage data: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
