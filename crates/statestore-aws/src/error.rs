//! AWS adapter error types

use statestore_core::{CloudError, CloudProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Bucket creation failed: {0}")]
    CreationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        CloudError::provider(CloudProvider::Aws, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
