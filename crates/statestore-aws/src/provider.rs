//! AWS S3 state store adapter

use crate::s3::S3Buckets;
use async_trait::async_trait;
use statestore_core::{AwsBucket, AwsObjectStorage, StaticCredentials};

/// S3 buckets in a single AWS region
pub struct AwsS3Storage {
    buckets: S3Buckets,
    region: String,
}

impl AwsS3Storage {
    pub async fn from_env(region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            buckets: S3Buckets::from_env(region.clone()).await,
            region,
        }
    }

    /// Sign with the cluster's static keys instead of the default chain
    pub async fn with_static_keys(region: impl Into<String>, keys: &StaticCredentials) -> Self {
        let region = region.into();
        Self {
            buckets: S3Buckets::with_static_keys(region.clone(), keys).await,
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl AwsObjectStorage for AwsS3Storage {
    async fn create_bucket(&self, name: &str) -> statestore_core::Result<AwsBucket> {
        tracing::debug!("Creating S3 bucket {} in {}", name, self.region);
        let location = self.buckets.create_bucket(name).await?;
        Ok(AwsBucket { location })
    }
}
