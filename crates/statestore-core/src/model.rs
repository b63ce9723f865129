//! Cluster record and canonical state store entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CloudError;

/// Supported cloud providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Civo,
    DigitalOcean,
    Vultr,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 4] = [
        CloudProvider::Aws,
        CloudProvider::Civo,
        CloudProvider::DigitalOcean,
        CloudProvider::Vultr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Civo => "civo",
            CloudProvider::DigitalOcean => "digitalocean",
            CloudProvider::Vultr => "vultr",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudProvider {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CloudProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CloudError::InvalidConfig(format!("unsupported cloud provider: {s}")))
    }
}

/// Static access keys supplied with the cluster definition (AWS)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Provider-agnostic object storage credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStoreCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StateStoreCredentials {
    pub fn is_empty(&self) -> bool {
        self.access_key_id.is_empty() && self.secret_access_key.is_empty()
    }
}

/// Provider-agnostic bucket / object storage descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStoreDetails {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_state_store_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_artifacts_bucket: Option<String>,
}

/// One record per cluster, as held by the cluster record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub cluster_name: String,
    pub cloud_provider: CloudProvider,
    pub cloud_region: String,

    /// Desired state store bucket / object storage name
    pub state_store_bucket_name: String,

    /// Second bucket created alongside the state store (AWS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_bucket_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_credentials: Option<StaticCredentials>,

    #[serde(default)]
    pub state_store_creds_check: bool,
    #[serde(default)]
    pub state_store_create_check: bool,
    #[serde(default)]
    pub state_store_credentials: StateStoreCredentials,
    #[serde(default)]
    pub state_store_details: StateStoreDetails,
}

impl ClusterRecord {
    /// Fresh record with both checkpoints unset
    pub fn new(
        cluster_name: impl Into<String>,
        cloud_provider: CloudProvider,
        cloud_region: impl Into<String>,
        state_store_bucket_name: impl Into<String>,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            cloud_provider,
            cloud_region: cloud_region.into(),
            state_store_bucket_name: state_store_bucket_name.into(),
            artifacts_bucket_name: None,
            static_credentials: None,
            state_store_creds_check: false,
            state_store_create_check: false,
            state_store_credentials: StateStoreCredentials::default(),
            state_store_details: StateStoreDetails::default(),
        }
    }

    pub fn with_artifacts_bucket(mut self, name: impl Into<String>) -> Self {
        self.artifacts_bucket_name = Some(name.into());
        self
    }

    pub fn with_static_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.static_credentials = Some(StaticCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        });
        self
    }

    /// Apply a named field update in place.
    ///
    /// Checkpoint flags only move forward; resetting a set flag is rejected.
    pub fn apply(&mut self, field: ClusterField) -> Result<(), CloudError> {
        match field {
            ClusterField::StateStoreCredentials(creds) => self.state_store_credentials = creds,
            ClusterField::StateStoreDetails(details) => self.state_store_details = details,
            ClusterField::StateStoreCredsCheck(done) => Self::advance(
                &self.cluster_name,
                &mut self.state_store_creds_check,
                done,
                ClusterField::CREDS_CHECK,
            )?,
            ClusterField::StateStoreCreateCheck(done) => Self::advance(
                &self.cluster_name,
                &mut self.state_store_create_check,
                done,
                ClusterField::CREATE_CHECK,
            )?,
        }
        Ok(())
    }

    fn advance(
        cluster: &str,
        flag: &mut bool,
        done: bool,
        field: &'static str,
    ) -> Result<(), CloudError> {
        if *flag && !done {
            return Err(CloudError::CheckpointRegression {
                cluster: cluster.to_string(),
                field,
            });
        }
        *flag = done;
        Ok(())
    }
}

/// Named field update accepted by a cluster record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterField {
    StateStoreCredentials(StateStoreCredentials),
    StateStoreDetails(StateStoreDetails),
    StateStoreCredsCheck(bool),
    StateStoreCreateCheck(bool),
}

impl ClusterField {
    pub const CREDENTIALS: &'static str = "state_store_credentials";
    pub const DETAILS: &'static str = "state_store_details";
    pub const CREDS_CHECK: &'static str = "state_store_creds_check";
    pub const CREATE_CHECK: &'static str = "state_store_create_check";

    /// Field name as stored in the cluster record
    pub fn name(&self) -> &'static str {
        match self {
            ClusterField::StateStoreCredentials(_) => Self::CREDENTIALS,
            ClusterField::StateStoreDetails(_) => Self::DETAILS,
            ClusterField::StateStoreCredsCheck(_) => Self::CREDS_CHECK,
            ClusterField::StateStoreCreateCheck(_) => Self::CREATE_CHECK,
        }
    }
}
