//! File-backed cluster record store
//!
//! Manages the `.statestore/clusters.json` file which holds one record per
//! cluster. Every save keeps the previous file as `clusters.json.backup`.

use crate::error::{CloudError, Result};
use crate::model::{ClusterField, ClusterRecord};
use crate::store::ClusterStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

const STATE_VERSION: u32 = 1;
const STATE_DIR: &str = ".statestore";
const STATE_FILE: &str = "clusters.json";
const STATE_BACKUP: &str = "clusters.json.backup";
const STATE_TEMP: &str = "clusters.json.tmp";

/// Contents of the cluster database file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterDatabase {
    /// State file version
    pub version: u32,

    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,

    /// Records indexed by cluster name
    pub clusters: HashMap<String, ClusterRecord>,
}

impl Default for ClusterDatabase {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: Utc::now(),
            clusters: HashMap::new(),
        }
    }
}

impl ClusterDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cluster_name: &str) -> Option<&ClusterRecord> {
        self.clusters.get(cluster_name)
    }

    /// Add a record for a cluster that is not registered yet
    pub fn insert(&mut self, record: ClusterRecord) -> Result<()> {
        if self.clusters.contains_key(&record.cluster_name) {
            return Err(CloudError::ClusterExists(record.cluster_name));
        }
        self.clusters.insert(record.cluster_name.clone(), record);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a named field update to one record
    pub fn apply(&mut self, cluster_name: &str, field: ClusterField) -> Result<()> {
        let record = self
            .clusters
            .get_mut(cluster_name)
            .ok_or_else(|| CloudError::ClusterNotFound(cluster_name.to_string()))?;
        record.apply(field)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Cluster record store persisted as JSON under a project root
pub struct FileClusterStore {
    /// Directory containing `.statestore/`
    root: PathBuf,
}

impl FileClusterStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the state directory path
    fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    /// Get the state file path
    pub fn state_path(&self) -> PathBuf {
        self.state_dir().join(STATE_FILE)
    }

    /// Get the backup file path
    fn backup_path(&self) -> PathBuf {
        self.state_dir().join(STATE_BACKUP)
    }

    fn temp_path(&self) -> PathBuf {
        self.state_dir().join(STATE_TEMP)
    }

    /// Ensure the state directory exists
    async fn ensure_state_dir(&self) -> Result<()> {
        let dir = self.state_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            tracing::debug!("Created state directory: {}", dir.display());
        }
        Ok(())
    }

    /// Load the cluster database
    pub async fn load(&self) -> Result<ClusterDatabase> {
        let path = self.state_path();
        if !path.exists() {
            tracing::debug!("State file not found, returning empty database");
            return Ok(ClusterDatabase::new());
        }

        let content = fs::read_to_string(&path).await?;
        let database: ClusterDatabase = serde_json::from_str(&content)?;

        if database.version > STATE_VERSION {
            return Err(CloudError::StateError(format!(
                "State file version {} is newer than supported version {}",
                database.version, STATE_VERSION
            )));
        }

        tracing::debug!("Loaded {} cluster records", database.clusters.len());
        Ok(database)
    }

    /// Save the cluster database
    ///
    /// The new contents are written to a temporary file and renamed over
    /// `clusters.json`, so a failed write leaves the previous file in place.
    pub async fn save(&self, database: &ClusterDatabase) -> Result<()> {
        self.ensure_state_dir().await?;

        let path = self.state_path();
        let temp = self.temp_path();

        let content = serde_json::to_string_pretty(database)?;
        fs::write(&temp, content).await?;

        if path.exists() {
            fs::copy(&path, self.backup_path()).await?;
            tracing::debug!("Created state backup");
        }
        fs::rename(&temp, &path).await?;

        tracing::debug!("Saved {} cluster records", database.clusters.len());
        Ok(())
    }

    /// Register a new cluster record
    ///
    /// An existing record is never replaced: its provider and checkpoints
    /// stay as they are.
    pub async fn register(&self, record: ClusterRecord) -> Result<()> {
        let mut database = self.load().await?;
        database.insert(record)?;
        self.save(&database).await
    }
}

#[async_trait]
impl ClusterStore for FileClusterStore {
    async fn get_cluster(&self, cluster_name: &str) -> Result<ClusterRecord> {
        self.load()
            .await?
            .get(cluster_name)
            .cloned()
            .ok_or_else(|| CloudError::ClusterNotFound(cluster_name.to_string()))
    }

    async fn update_cluster(&self, cluster_name: &str, field: ClusterField) -> Result<()> {
        let mut database = self.load().await?;
        let name = field.name();
        database.apply(cluster_name, field)?;
        self.save(&database).await?;
        tracing::debug!("Updated {} for cluster {}", name, cluster_name);
        Ok(())
    }
}
