use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid include: {0}")]
    InvalidInclude(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("filter nesting exceeds maximum depth of {0}")]
    TooDeep(usize),

    #[error("Config error: {0}")]
    Config(String),
}
