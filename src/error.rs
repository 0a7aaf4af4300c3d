// src/error.rs

use thiserror::Error;

/// Failures of the form store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored form is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while talking to the prediction endpoint.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("could not reach the prediction service: {0}")]
    Request(#[from] reqwest::Error),
    #[error("prediction service answered with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected prediction response: {0}")]
    Decode(String),
    #[error("could not attach cough recording: {0}")]
    Attachment(String),
}

/// Failures while loading start-up settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid prediction URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
