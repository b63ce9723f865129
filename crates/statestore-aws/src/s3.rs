//! S3 bucket client
//!
//! Works against AWS itself and against S3-compatible endpoints.

use crate::error::{AwsError, Result};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use statestore_core::{BucketCredentials, StaticCredentials};

/// Region AWS treats as the default; it must not be sent as a location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// Signing region expected by S3-compatible providers
const COMPAT_REGION: &str = "us-east-1";

pub struct S3Buckets {
    client: Client,
    /// Location constraint sent on create, `None` for the default region and
    /// for S3-compatible endpoints
    location_constraint: Option<String>,
}

impl S3Buckets {
    /// Client for AWS S3 in `region`, with credentials from the default chain
    pub async fn from_env(region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;

        tracing::debug!("Loaded AWS configuration for region {}", region);
        Self {
            client: Client::new(&config),
            location_constraint: (region != DEFAULT_REGION).then_some(region),
        }
    }

    /// Client for AWS S3 in `region`, signing with the cluster's static keys
    pub async fn with_static_keys(region: impl Into<String>, keys: &StaticCredentials) -> Self {
        let region = region.into();
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .credentials_provider(Credentials::new(
                keys.access_key_id.clone(),
                keys.secret_access_key.clone(),
                None,
                None,
                "statestore-static",
            ))
            .load()
            .await;

        Self {
            client: Client::new(&config),
            location_constraint: (region != DEFAULT_REGION).then_some(region),
        }
    }

    /// Client for an S3-compatible endpoint using explicit keys
    pub fn with_endpoint(credentials: &BucketCredentials) -> Result<Self> {
        if credentials.endpoint.is_empty() {
            return Err(AwsError::InvalidConfig("S3 endpoint must not be empty".to_string()));
        }

        let keys = Credentials::new(
            credentials.access_key.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "statestore",
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(COMPAT_REGION))
            .endpoint_url(endpoint_url(&credentials.endpoint))
            .credentials_provider(keys)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            location_constraint: None,
        })
    }

    /// Create `name` and return its location.
    ///
    /// A bucket that already exists and belongs to the caller counts as
    /// created, so repeated calls converge.
    pub async fn create_bucket(&self, name: &str) -> Result<String> {
        let mut request = self.client.create_bucket().bucket(name);
        if let Some(region) = &self.location_constraint {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        match request.send().await {
            Ok(output) => {
                tracing::info!("Created bucket {}", name);
                Ok(location_or_default(output.location(), name))
            }
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_bucket_already_owned_by_you())
                {
                    tracing::debug!("Bucket {} already exists, reusing it", name);
                    return Ok(location_or_default(None, name));
                }
                Err(AwsError::CreationFailed(format!(
                    "{}: {}",
                    name,
                    DisplayErrorContext(&err)
                )))
            }
        }
    }
}

fn endpoint_url(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

fn location_or_default(location: Option<&str>, name: &str) -> String {
    match location {
        Some(location) if !location.is_empty() => location.to_string(),
        _ => format!("/{}", name),
    }
}
