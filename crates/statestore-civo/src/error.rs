//! Civo adapter error types

use statestore_core::{CloudError, CloudProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CivoError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Civo API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<CivoError> for CloudError {
    fn from(err: CivoError) -> Self {
        CloudError::provider(CloudProvider::Civo, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CivoError>;
