//! State store provisioning error types

use crate::model::CloudProvider;
use crate::validate::ValidationFailure;
use thiserror::Error;

/// Errors surfaced by the provisioning steps
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Cluster already registered: {0}")]
    ClusterExists(String),

    #[error("Provider not registered: {0}")]
    ProviderNotRegistered(CloudProvider),

    #[error("{provider} API error: {message}")]
    Provider {
        provider: CloudProvider,
        message: String,
    },

    #[error("{0}")]
    InvalidCredentials(ValidationFailure),

    /// Cleanup of partially issued credentials failed. The cleanup failure is
    /// reported first; the validation failure that triggered it is kept.
    #[error("failed to remove incomplete access credentials: {source} ({failure})")]
    CompensationFailed {
        failure: ValidationFailure,
        #[source]
        source: Box<CloudError>,
    },

    #[error("failed to update {field} for cluster {cluster}: {source}")]
    UpdateFailed {
        cluster: String,
        field: &'static str,
        #[source]
        source: Box<CloudError>,
    },

    #[error(
        "state store credentials for cluster {0} are not ready - run the credentials step first"
    )]
    CredentialsNotReady(String),

    #[error("refusing to reset checkpoint {field} for cluster {cluster}")]
    CheckpointRegression {
        cluster: String,
        field: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("State file error: {0}")]
    StateError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Uniform adapter failure for `provider`
    pub fn provider(provider: CloudProvider, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    pub(crate) fn update_failed(cluster: &str, field: &'static str, source: CloudError) -> Self {
        Self::UpdateFailed {
            cluster: cluster.to_string(),
            field,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
