//! Application error types with proper error chaining.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SUPABASE_URL and SUPABASE_SERVICE_KEY must be set in environment variables")]
    MissingHostedCredentials,
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("Failed to create Supabase client: {0}")]
    Initialization(String),
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Health check failed: {0}")]
    Unhealthy(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::Request {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => ClientError::Transport(err.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Deserialization(err.to_string())
    }
}

impl AppError {
    /// Whether the error came from configuration rather than from a backend.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}
