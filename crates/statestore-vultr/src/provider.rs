//! Vultr object storage adapter

use crate::api::{ObjectStorage, VultrApi, VultrConfig};
use crate::error::{Result, VultrError};
use async_trait::async_trait;
use statestore_aws::S3Buckets;
use statestore_core::{BucketCredentials, VultrObjectStorage, VultrObjectStore};
use std::time::Duration;

/// How long to wait for a new subscription to become active
#[derive(Debug, Clone)]
pub struct ReadyWait {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for ReadyWait {
    fn default() -> Self {
        Self {
            attempts: 30,
            delay: Duration::from_secs(10),
        }
    }
}

pub struct VultrStorage {
    api: VultrApi,
    ready_wait: ReadyWait,
}

impl VultrStorage {
    pub fn new(config: VultrConfig) -> Self {
        Self {
            api: VultrApi::new(config),
            ready_wait: ReadyWait::default(),
        }
    }

    pub fn with_ready_wait(mut self, ready_wait: ReadyWait) -> Self {
        self.ready_wait = ready_wait;
        self
    }

    async fn find_or_create(&self, region: &str, label: &str) -> Result<ObjectStorage> {
        if let Some(existing) = self.api.find_object_storage(region, label).await? {
            tracing::debug!("Reusing vultr object storage {} ({})", label, existing.id);
            return Ok(existing);
        }

        let cluster = self.api.cluster_for_region(region).await?;
        tracing::info!(
            "Creating vultr object storage {} on cluster {} ({})",
            label,
            cluster.id,
            cluster.hostname
        );
        self.api.create_object_storage(cluster.id, label).await
    }

    /// Poll until the subscription is active and its S3 keys are issued
    async fn wait_until_active(&self, mut storage: ObjectStorage) -> Result<ObjectStorage> {
        for attempt in 1..=self.ready_wait.attempts {
            if storage.is_active() {
                return Ok(storage);
            }
            tracing::debug!(
                "Vultr object storage {} is {} (check {}/{})",
                storage.label,
                storage.status,
                attempt,
                self.ready_wait.attempts
            );
            tokio::time::sleep(self.ready_wait.delay).await;
            storage = self.api.get_object_storage(&storage.id).await?;
        }

        if storage.is_active() {
            return Ok(storage);
        }
        Err(VultrError::NotReady {
            label: storage.label,
            attempts: self.ready_wait.attempts,
        })
    }
}

impl From<ObjectStorage> for VultrObjectStore {
    fn from(storage: ObjectStorage) -> Self {
        Self {
            id: storage.id,
            label: storage.label,
            s3_hostname: storage.s3_hostname,
            s3_access_key: storage.s3_access_key,
            s3_secret_key: storage.s3_secret_key,
        }
    }
}

#[async_trait]
impl VultrObjectStorage for VultrStorage {
    async fn create_object_storage(
        &self,
        region: &str,
        label: &str,
    ) -> statestore_core::Result<VultrObjectStore> {
        let storage = self.find_or_create(region, label).await?;
        let storage = self.wait_until_active(storage).await?;
        Ok(storage.into())
    }

    async fn create_object_storage_bucket(
        &self,
        credentials: &BucketCredentials,
        name: &str,
    ) -> statestore_core::Result<()> {
        let buckets = S3Buckets::with_endpoint(credentials).map_err(VultrError::from)?;
        buckets
            .create_bucket(name)
            .await
            .map_err(VultrError::from)?;

        tracing::info!("Vultr bucket {} ready at {}", name, credentials.endpoint);
        Ok(())
    }
}
