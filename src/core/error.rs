use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitReconError {
    #[error("Sealed credential could not be opened with the current key")]
    CredentialIntegrity,

    #[error("Endpoint returned HTTP {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Curl error: {0}")]
    Curl(#[from] curl::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, GitReconError>;
