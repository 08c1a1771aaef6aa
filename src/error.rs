// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NutritionError>;

/// Non-success outcomes of a call to the remote nutrient database.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Authentication required: the nutrient database rejected the API key")]
    AuthRequired,

    #[error("Bad request: {body}")]
    BadRequest { body: String },

    #[error("Nutrient database server error: {body}")]
    ServerError { body: String },

    #[error("Nutrient database request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl NetworkError {
    /// Map a non-2xx status and its body onto the failure taxonomy.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            403 => NetworkError::AuthRequired,
            400 => NetworkError::BadRequest { body },
            500 => NetworkError::ServerError { body },
            _ => NetworkError::Status { status, body },
        }
    }
}

#[derive(Error, Debug)]
pub enum NutritionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Food not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for NutritionError {
    fn from(err: serde_json::Error) -> Self {
        NutritionError::Serialization(err.to_string())
    }
}
