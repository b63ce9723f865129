//! Vultr object storage API client

use crate::error::{Result, VultrError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const VULTR_API_BASE: &str = "https://api.vultr.com/v2";

/// Configuration for the Vultr API client
#[derive(Debug, Clone)]
pub struct VultrConfig {
    pub api_key: String,
    pub api_base: String,
}

impl VultrConfig {
    /// Create VultrConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("VULTR_API_KEY")
            .map_err(|_| VultrError::MissingEnvVar("VULTR_API_KEY".to_string()))?;
        let api_base =
            std::env::var("VULTR_API_URL").unwrap_or_else(|_| VULTR_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

/// Object storage cluster (one or more per region)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageCluster {
    pub id: u64,
    pub region: String,
    pub hostname: String,
    #[serde(default)]
    pub deploy: String,
}

impl ObjectStorageCluster {
    pub fn accepts_deployments(&self) -> bool {
        self.deploy == "yes"
    }
}

/// Object storage subscription
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectStorage {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub s3_hostname: String,
    #[serde(default)]
    pub s3_access_key: String,
    #[serde(default)]
    pub s3_secret_key: String,
}

impl ObjectStorage {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

#[derive(Debug, Deserialize)]
struct ClustersResponse {
    clusters: Vec<ObjectStorageCluster>,
}

#[derive(Debug, Deserialize)]
struct ObjectStoragesResponse {
    object_storages: Vec<ObjectStorage>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct ObjectStorageResponse {
    object_storage: ObjectStorage,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    next: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct CreateObjectStorageRequest<'a> {
    cluster_id: u64,
    label: &'a str,
}

/// Thin client over the Vultr v2 object storage endpoints
pub struct VultrApi {
    client: reqwest::Client,
    config: VultrConfig,
}

impl VultrApi {
    pub fn new(config: VultrConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base, path.trim_start_matches('/'))
    }

    /// Cluster accepting new subscriptions in `region`
    pub async fn cluster_for_region(&self, region: &str) -> Result<ObjectStorageCluster> {
        let response = self
            .client
            .get(self.url("object-storage/clusters"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let clusters: ClustersResponse = Self::parse(response).await?;

        pick_cluster(clusters.clusters, region)
            .ok_or_else(|| VultrError::NoClusterInRegion(region.to_string()))
    }

    /// All object storage subscriptions on the account
    pub async fn list_object_storages(&self) -> Result<Vec<ObjectStorage>> {
        let mut storages = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut request = self
                .client
                .get(self.url("object-storage"))
                .bearer_auth(&self.config.api_key)
                .query(&[("per_page", "100")]);
            if !cursor.is_empty() {
                request = request.query(&[("cursor", cursor.as_str())]);
            }

            let page: ObjectStoragesResponse = Self::parse(request.send().await?).await?;
            storages.extend(page.object_storages);

            cursor = page.meta.unwrap_or_default().links.next;
            if cursor.is_empty() {
                break;
            }
        }

        Ok(storages)
    }

    /// Subscription labelled `label` in `region`
    pub async fn find_object_storage(
        &self,
        region: &str,
        label: &str,
    ) -> Result<Option<ObjectStorage>> {
        Ok(self
            .list_object_storages()
            .await?
            .into_iter()
            .find(|o| o.label == label && o.region == region))
    }

    pub async fn get_object_storage(&self, id: &str) -> Result<ObjectStorage> {
        let response = self
            .client
            .get(self.url(&format!("object-storage/{}", id)))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let body: ObjectStorageResponse = Self::parse(response).await?;
        Ok(body.object_storage)
    }

    pub async fn create_object_storage(&self, cluster_id: u64, label: &str) -> Result<ObjectStorage> {
        let response = self
            .client
            .post(self.url("object-storage"))
            .bearer_auth(&self.config.api_key)
            .json(&CreateObjectStorageRequest { cluster_id, label })
            .send()
            .await?;
        let body: ObjectStorageResponse = Self::parse(response).await?;
        Ok(body.object_storage)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(VultrError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// First deployable cluster in `region`
fn pick_cluster(
    clusters: Vec<ObjectStorageCluster>,
    region: &str,
) -> Option<ObjectStorageCluster> {
    clusters
        .into_iter()
        .find(|c| c.region == region && c.accepts_deployments())
}
