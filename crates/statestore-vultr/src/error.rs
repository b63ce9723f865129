//! Vultr adapter error types

use statestore_core::{CloudError, CloudProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VultrError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Vultr API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("No object storage cluster available in region {0}")]
    NoClusterInRegion(String),

    #[error("Object storage {label} did not become active after {attempts} checks")]
    NotReady { label: String, attempts: u32 },

    #[error("error creating vultr state storage bucket: {0}")]
    BucketCreationFailed(#[from] statestore_aws::AwsError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<VultrError> for CloudError {
    fn from(err: VultrError) -> Self {
        CloudError::provider(CloudProvider::Vultr, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VultrError>;
