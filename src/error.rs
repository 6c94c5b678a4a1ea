use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwimError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Catalog Validation Error: {0}")]
    Validation(String),
}

pub type SwimResult<T> = Result<T, SwimError>;
