//! Provider adapter contracts
//!
//! Each provider exposes its own capability set and returns provider-native
//! shapes. Implementations live in the provider crates and translate their
//! error types into [`CloudError::Provider`](crate::CloudError::Provider).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Bucket created by AWS S3
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsBucket {
    /// Location returned by `CreateBucket`, e.g. `/my-bucket`
    pub location: String,
}

/// Object store credential as returned by the Civo API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivoCredential {
    pub access_key_id: String,
    pub id: String,
    pub name: String,
    pub secret_access_key_id: String,
}

impl CivoCredential {
    /// Fields that must be populated before the credential is trusted, in
    /// check order
    pub fn required_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("AccessKeyID", self.access_key_id.as_str()),
            ("ID", self.id.as_str()),
            ("Name", self.name.as_str()),
            ("SecretAccessKeyID", self.secret_access_key_id.as_str()),
        ]
    }
}

/// Object store bucket as returned by the Civo API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivoBucket {
    pub id: String,
    pub name: String,
}

/// Keys and endpoint for an S3-compatible bucket API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCredentials {
    pub access_key: String,
    pub secret_access_key: String,
    /// Host name without scheme, e.g. `nyc3.digitaloceanspaces.com`
    pub endpoint: String,
}

/// Vultr object storage subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VultrObjectStore {
    pub id: String,
    pub label: String,
    pub s3_hostname: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
}

impl VultrObjectStore {
    pub fn bucket_credentials(&self) -> BucketCredentials {
        BucketCredentials {
            access_key: self.s3_access_key.clone(),
            secret_access_key: self.s3_secret_key.clone(),
            endpoint: self.s3_hostname.clone(),
        }
    }
}

/// AWS S3
#[async_trait]
pub trait AwsObjectStorage: Send + Sync {
    /// Create `name`. A bucket already owned by the caller is returned as-is.
    async fn create_bucket(&self, name: &str) -> Result<AwsBucket>;
}

/// Civo object stores
#[async_trait]
pub trait CivoObjectStorage: Send + Sync {
    /// Fetch the credential named `name` in `region`, creating it if absent.
    ///
    /// The API can answer successfully with a partially populated credential.
    async fn get_access_credentials(&self, name: &str, region: &str) -> Result<CivoCredential>;

    /// Remove the credential named `name` in `region`
    async fn delete_access_credentials(&self, name: &str, region: &str) -> Result<()>;

    /// Create the bucket `name` owned by `access_key_id`, or return the
    /// existing one
    async fn create_storage_bucket(
        &self,
        access_key_id: &str,
        name: &str,
        region: &str,
    ) -> Result<CivoBucket>;
}

/// DigitalOcean Spaces
#[async_trait]
pub trait SpacesObjectStorage: Send + Sync {
    /// Spaces keys and endpoint this adapter was configured with
    fn spaces_credentials(&self) -> BucketCredentials;

    /// Create the Space `name` using `credentials`
    async fn create_space_bucket(&self, credentials: &BucketCredentials, name: &str) -> Result<()>;
}

/// Vultr object storage
#[async_trait]
pub trait VultrObjectStorage: Send + Sync {
    /// Create an object storage subscription labelled `label` in `region`,
    /// reusing an existing one with the same label
    async fn create_object_storage(&self, region: &str, label: &str) -> Result<VultrObjectStore>;

    /// Create the bucket `name` inside a subscription using its S3 keys
    async fn create_object_storage_bucket(
        &self,
        credentials: &BucketCredentials,
        name: &str,
    ) -> Result<()>;
}
