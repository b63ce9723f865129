//! Per-provider provisioning variants
//!
//! Every supported provider implements [`StateStoreVariant`] on top of its
//! native adapter. The executor only selects a variant by provider id; all
//! provider-specific flow and normalization lives here.

use crate::adapter::{
    AwsObjectStorage, CivoObjectStorage, SpacesObjectStorage, VultrObjectStorage,
};
use crate::error::{CloudError, Result};
use crate::model::{
    CloudProvider, ClusterRecord, StateStoreCredentials, StateStoreDetails,
};
use crate::normalize;
use crate::validate::validate_or_compensate;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Normalized result of the credentials step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredCredentials {
    pub credentials: StateStoreCredentials,
    /// Present when the provider created the bucket while issuing credentials
    pub details: Option<StateStoreDetails>,
}

/// Provider-specific implementation of the two provisioning steps
#[async_trait]
pub trait StateStoreVariant: Send + Sync {
    fn provider(&self) -> CloudProvider;

    /// Whether the bucket is created by the `StateStoreCreate` step rather than
    /// while issuing credentials
    fn separate_create(&self) -> bool {
        false
    }

    /// Obtain credentials (and possibly the bucket) for `record`
    async fn acquire_credentials(&self, record: &ClusterRecord) -> Result<AcquiredCredentials>;

    /// Create the bucket using the credentials already stored on `record`
    async fn create_state_store(&self, record: &ClusterRecord) -> Result<StateStoreDetails> {
        Err(CloudError::InvalidConfig(format!(
            "{} creates the state store bucket while issuing credentials (cluster {})",
            self.provider(),
            record.cluster_name
        )))
    }
}

/// AWS: static credentials plus state store and artifacts buckets
pub struct AwsStateStore {
    storage: Arc<dyn AwsObjectStorage>,
}

impl AwsStateStore {
    pub fn new(storage: Arc<dyn AwsObjectStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl StateStoreVariant for AwsStateStore {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    async fn acquire_credentials(&self, record: &ClusterRecord) -> Result<AcquiredCredentials> {
        let static_credentials = record.static_credentials.as_ref().ok_or_else(|| {
            CloudError::InvalidConfig(format!(
                "cluster {} has no static AWS credentials",
                record.cluster_name
            ))
        })?;
        if static_credentials.access_key_id.is_empty()
            || static_credentials.secret_access_key.is_empty()
        {
            return Err(CloudError::InvalidConfig(format!(
                "cluster {} has empty static AWS credentials",
                record.cluster_name
            )));
        }

        let state_store = self
            .storage
            .create_bucket(&record.state_store_bucket_name)
            .await?;

        let artifacts = match &record.artifacts_bucket_name {
            Some(name) => Some(self.storage.create_bucket(name).await?),
            None => None,
        };

        Ok(AcquiredCredentials {
            credentials: static_credentials.into(),
            details: Some(normalize::aws_details(
                &record.state_store_bucket_name,
                &state_store,
                artifacts.as_ref(),
            )),
        })
    }
}

/// Civo: validated object store credentials, bucket created in a second step
pub struct CivoStateStore {
    storage: Arc<dyn CivoObjectStorage>,
}

impl CivoStateStore {
    pub fn new(storage: Arc<dyn CivoObjectStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl StateStoreVariant for CivoStateStore {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Civo
    }

    fn separate_create(&self) -> bool {
        true
    }

    async fn acquire_credentials(&self, record: &ClusterRecord) -> Result<AcquiredCredentials> {
        let bucket_name = record.state_store_bucket_name.as_str();
        let region = record.cloud_region.as_str();

        let creds = self
            .storage
            .get_access_credentials(bucket_name, region)
            .await?;

        validate_or_compensate(CloudProvider::Civo, &creds.required_fields(), || {
            self.storage.delete_access_credentials(bucket_name, region)
        })
        .await?;

        Ok(AcquiredCredentials {
            credentials: creds.into(),
            details: None,
        })
    }

    async fn create_state_store(&self, record: &ClusterRecord) -> Result<StateStoreDetails> {
        let access_key_id = &record.state_store_credentials.access_key_id;
        tracing::debug!("Creating civo bucket with access key id {}", access_key_id);

        let bucket = self
            .storage
            .create_storage_bucket(
                access_key_id,
                &record.state_store_bucket_name,
                &record.cloud_region,
            )
            .await?;
        Ok(bucket.into())
    }
}

/// DigitalOcean: Spaces keys from the adapter, bucket created up front
pub struct DigitalOceanStateStore {
    storage: Arc<dyn SpacesObjectStorage>,
}

impl DigitalOceanStateStore {
    pub fn new(storage: Arc<dyn SpacesObjectStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl StateStoreVariant for DigitalOceanStateStore {
    fn provider(&self) -> CloudProvider {
        CloudProvider::DigitalOcean
    }

    async fn acquire_credentials(&self, record: &ClusterRecord) -> Result<AcquiredCredentials> {
        let bucket_name = record.state_store_bucket_name.as_str();
        let creds = self.storage.spaces_credentials();

        self.storage.create_space_bucket(&creds, bucket_name).await?;

        Ok(AcquiredCredentials {
            credentials: normalize::spaces_credentials(&creds, bucket_name),
            details: Some(normalize::spaces_details(&creds, bucket_name)),
        })
    }
}

/// Vultr: object storage subscription, then a bucket inside it
pub struct VultrStateStore {
    storage: Arc<dyn VultrObjectStorage>,
}

impl VultrStateStore {
    pub fn new(storage: Arc<dyn VultrObjectStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl StateStoreVariant for VultrStateStore {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Vultr
    }

    async fn acquire_credentials(&self, record: &ClusterRecord) -> Result<AcquiredCredentials> {
        let bucket_name = record.state_store_bucket_name.as_str();

        let object_store = self
            .storage
            .create_object_storage(&record.cloud_region, bucket_name)
            .await?;

        self.storage
            .create_object_storage_bucket(&object_store.bucket_credentials(), bucket_name)
            .await?;

        Ok(AcquiredCredentials {
            credentials: (&object_store).into(),
            details: Some((&object_store).into()),
        })
    }
}

/// Variants available to the executor, keyed by provider
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    variants: HashMap<CloudProvider, Arc<dyn StateStoreVariant>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `variant`, replacing any variant for the same provider
    pub fn register(&mut self, variant: impl StateStoreVariant + 'static) -> &mut Self {
        self.variants.insert(variant.provider(), Arc::new(variant));
        self
    }

    pub fn with(mut self, variant: impl StateStoreVariant + 'static) -> Self {
        self.register(variant);
        self
    }

    pub fn get(&self, provider: CloudProvider) -> Result<Arc<dyn StateStoreVariant>> {
        self.variants
            .get(&provider)
            .cloned()
            .ok_or(CloudError::ProviderNotRegistered(provider))
    }

    pub fn providers(&self) -> Vec<CloudProvider> {
        CloudProvider::ALL
            .into_iter()
            .filter(|p| self.variants.contains_key(p))
            .collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}
