//! Conversion of provider-native results into canonical entities

use crate::adapter::{AwsBucket, BucketCredentials, CivoBucket, CivoCredential, VultrObjectStore};
use crate::model::{StateStoreCredentials, StateStoreDetails, StaticCredentials};

/// S3 returns locations such as `/bucket-name`; only the name is kept
pub fn aws_bucket_location(bucket: &AwsBucket) -> String {
    bucket.location.replace('/', "")
}

pub fn aws_details(
    bucket_name: &str,
    state_store: &AwsBucket,
    artifacts: Option<&AwsBucket>,
) -> StateStoreDetails {
    StateStoreDetails {
        name: bucket_name.to_string(),
        aws_state_store_bucket: Some(aws_bucket_location(state_store)),
        aws_artifacts_bucket: artifacts.map(aws_bucket_location),
        ..Default::default()
    }
}

impl From<&StaticCredentials> for StateStoreCredentials {
    fn from(creds: &StaticCredentials) -> Self {
        Self {
            access_key_id: creds.access_key_id.clone(),
            secret_access_key: creds.secret_access_key.clone(),
            name: None,
            id: None,
        }
    }
}

impl From<CivoCredential> for StateStoreCredentials {
    fn from(creds: CivoCredential) -> Self {
        Self {
            access_key_id: creds.access_key_id,
            secret_access_key: creds.secret_access_key_id,
            name: Some(creds.name),
            id: Some(creds.id),
        }
    }
}

impl From<CivoBucket> for StateStoreDetails {
    fn from(bucket: CivoBucket) -> Self {
        Self {
            name: bucket.name,
            id: Some(bucket.id),
            ..Default::default()
        }
    }
}

/// Spaces credentials carry no provider id; the bucket name stands in
pub fn spaces_credentials(creds: &BucketCredentials, bucket_name: &str) -> StateStoreCredentials {
    StateStoreCredentials {
        access_key_id: creds.access_key.clone(),
        secret_access_key: creds.secret_access_key.clone(),
        name: Some(bucket_name.to_string()),
        id: None,
    }
}

pub fn spaces_details(creds: &BucketCredentials, bucket_name: &str) -> StateStoreDetails {
    StateStoreDetails {
        name: bucket_name.to_string(),
        hostname: Some(creds.endpoint.clone()),
        ..Default::default()
    }
}

impl From<&VultrObjectStore> for StateStoreCredentials {
    fn from(store: &VultrObjectStore) -> Self {
        Self {
            access_key_id: store.s3_access_key.clone(),
            secret_access_key: store.s3_secret_key.clone(),
            name: Some(store.label.clone()),
            id: Some(store.id.clone()),
        }
    }
}

impl From<&VultrObjectStore> for StateStoreDetails {
    fn from(store: &VultrObjectStore) -> Self {
        Self {
            name: store.label.clone(),
            id: Some(store.id.clone()),
            hostname: Some(store.s3_hostname.clone()),
            ..Default::default()
        }
    }
}
