//! DigitalOcean adapter error types

use statestore_core::{CloudError, CloudProvider};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("error creating spaces bucket {name}: {source}")]
    CreationFailed {
        name: String,
        #[source]
        source: statestore_aws::AwsError,
    },
}

impl From<DigitalOceanError> for CloudError {
    fn from(err: DigitalOceanError) -> Self {
        CloudError::provider(CloudProvider::DigitalOcean, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DigitalOceanError>;
