//! Cluster record store contract

use crate::error::{CloudError, Result};
use crate::model::{ClusterField, ClusterRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Durable keyed storage of one record per cluster
///
/// Implementations must apply an update atomically per field: either the
/// named field is written or an error is returned and the record is unchanged.
#[async_trait]
pub trait ClusterStore: Send + Sync {
    /// Full snapshot of the cluster record
    async fn get_cluster(&self, cluster_name: &str) -> Result<ClusterRecord>;

    /// Write a single named field of the cluster record
    async fn update_cluster(&self, cluster_name: &str, field: ClusterField) -> Result<()>;
}

/// In-process record store
#[derive(Debug, Default)]
pub struct MemoryClusterStore {
    clusters: Mutex<HashMap<String, ClusterRecord>>,
}

impl MemoryClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a whole record
    pub async fn insert(&self, record: ClusterRecord) {
        self.clusters
            .lock()
            .await
            .insert(record.cluster_name.clone(), record);
    }
}

#[async_trait]
impl ClusterStore for MemoryClusterStore {
    async fn get_cluster(&self, cluster_name: &str) -> Result<ClusterRecord> {
        self.clusters
            .lock()
            .await
            .get(cluster_name)
            .cloned()
            .ok_or_else(|| CloudError::ClusterNotFound(cluster_name.to_string()))
    }

    async fn update_cluster(&self, cluster_name: &str, field: ClusterField) -> Result<()> {
        let mut clusters = self.clusters.lock().await;
        let record = clusters
            .get_mut(cluster_name)
            .ok_or_else(|| CloudError::ClusterNotFound(cluster_name.to_string()))?;

        // Apply on a copy so a rejected update leaves the record untouched
        let mut updated = record.clone();
        updated.apply(field)?;
        *record = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CloudProvider, StateStoreCredentials};

    #[tokio::test]
    async fn test_missing_cluster() {
        let store = MemoryClusterStore::new();
        let err = store.get_cluster("nope").await.unwrap_err();
        assert!(matches!(err, CloudError::ClusterNotFound(name) if name == "nope"));

        let err = store
            .update_cluster("nope", ClusterField::StateStoreCredsCheck(true))
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::ClusterNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_credentials_wholesale() {
        let store = MemoryClusterStore::new();
        store
            .insert(ClusterRecord::new("demo", CloudProvider::Vultr, "ewr", "bucket"))
            .await;

        store
            .update_cluster(
                "demo",
                ClusterField::StateStoreCredentials(StateStoreCredentials {
                    access_key_id: "old".into(),
                    secret_access_key: "old-secret".into(),
                    name: Some("label".into()),
                    id: Some("id-1".into()),
                }),
            )
            .await
            .unwrap();
        store
            .update_cluster(
                "demo",
                ClusterField::StateStoreCredentials(StateStoreCredentials {
                    access_key_id: "new".into(),
                    secret_access_key: "new-secret".into(),
                    name: None,
                    id: None,
                }),
            )
            .await
            .unwrap();

        let record = store.get_cluster("demo").await.unwrap();
        assert_eq!(record.state_store_credentials.access_key_id, "new");
        assert_eq!(record.state_store_credentials.name, None);
    }

    #[tokio::test]
    async fn test_checkpoint_regression_leaves_record_unchanged() {
        let store = MemoryClusterStore::new();
        store
            .insert(ClusterRecord::new("demo", CloudProvider::Civo, "nyc1", "bucket"))
            .await;
        store
            .update_cluster("demo", ClusterField::StateStoreCreateCheck(true))
            .await
            .unwrap();

        let result = store
            .update_cluster("demo", ClusterField::StateStoreCreateCheck(false))
            .await;
        assert!(matches!(result, Err(CloudError::CheckpointRegression { .. })));
        assert!(store.get_cluster("demo").await.unwrap().state_store_create_check);
    }
}
