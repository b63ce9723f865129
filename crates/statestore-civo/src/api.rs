//! Civo object store API client

use crate::error::{CivoError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const CIVO_API_BASE: &str = "https://api.civo.com/v2";

/// Default object store size, in GB
const DEFAULT_MAX_SIZE_GB: u32 = 500;

/// Configuration for the Civo API client
#[derive(Debug, Clone)]
pub struct CivoConfig {
    pub api_token: String,
    pub api_base: String,
    pub max_size_gb: u32,
}

impl CivoConfig {
    /// Create CivoConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("CIVO_TOKEN")
            .map_err(|_| CivoError::MissingEnvVar("CIVO_TOKEN".to_string()))?;
        let api_base = std::env::var("CIVO_API_URL").unwrap_or_else(|_| CIVO_API_BASE.to_string());

        Ok(Self {
            api_token,
            api_base: api_base.trim_end_matches('/').to_string(),
            max_size_gb: DEFAULT_MAX_SIZE_GB,
        })
    }
}

/// Object store credential
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectStoreCredential {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key_id: String,
    #[serde(default)]
    pub status: String,
}

/// Object store (bucket)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectStoreInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub max_size: Option<u32>,
    #[serde(default)]
    pub bucket_url: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "first_page")]
    pages: u32,
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateCredentialRequest<'a> {
    name: &'a str,
    region: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateObjectStoreRequest<'a> {
    name: &'a str,
    max_size_gb: u32,
    access_key_id: &'a str,
    region: &'a str,
}

/// Thin client over the Civo v2 object store endpoints
pub struct CivoApi {
    client: reqwest::Client,
    config: CivoConfig,
}

impl CivoApi {
    pub fn new(config: CivoConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &CivoConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base, path.trim_start_matches('/'))
    }

    /// List all object store credentials in `region`
    pub async fn list_credentials(&self, region: &str) -> Result<Vec<ObjectStoreCredential>> {
        self.list_all("objectstore/credentials", region).await
    }

    /// Find a credential by name
    pub async fn find_credential(
        &self,
        name: &str,
        region: &str,
    ) -> Result<Option<ObjectStoreCredential>> {
        Ok(self
            .list_credentials(region)
            .await?
            .into_iter()
            .find(|c| c.name == name))
    }

    /// Create a new credential
    pub async fn create_credential(
        &self,
        name: &str,
        region: &str,
    ) -> Result<ObjectStoreCredential> {
        let response = self
            .client
            .post(self.url("objectstore/credentials"))
            .bearer_auth(&self.config.api_token)
            .json(&CreateCredentialRequest { name, region })
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Delete a credential by id
    pub async fn delete_credential(&self, id: &str, region: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("objectstore/credentials/{}", id)))
            .bearer_auth(&self.config.api_token)
            .query(&[("region", region)])
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    /// List all object stores in `region`
    pub async fn list_object_stores(&self, region: &str) -> Result<Vec<ObjectStoreInfo>> {
        self.list_all("objectstores", region).await
    }

    /// Find an object store by name
    pub async fn find_object_store(
        &self,
        name: &str,
        region: &str,
    ) -> Result<Option<ObjectStoreInfo>> {
        Ok(self
            .list_object_stores(region)
            .await?
            .into_iter()
            .find(|o| o.name == name))
    }

    /// Create an object store owned by `access_key_id`
    pub async fn create_object_store(
        &self,
        name: &str,
        access_key_id: &str,
        region: &str,
    ) -> Result<ObjectStoreInfo> {
        let request = CreateObjectStoreRequest {
            name,
            max_size_gb: self.config.max_size_gb,
            access_key_id,
            region,
        };
        let response = self
            .client
            .post(self.url("objectstores"))
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn list_all<T: DeserializeOwned>(&self, path: &str, region: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let page_str = page.to_string();
            let response = self
                .client
                .get(self.url(path))
                .bearer_auth(&self.config.api_token)
                .query(&[("region", region), ("page", page_str.as_str())])
                .send()
                .await?;
            let current: Page<T> = Self::parse(response).await?;
            items.extend(current.items);

            if current.page >= current.pages {
                break;
            }
            page = current.page + 1;
        }

        Ok(items)
    }

    async fn check(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CivoError::ApiError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let body = Self::check(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Human readable message from a Civo error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            reason: Some(reason),
            ..
        }) => reason,
        Ok(ApiErrorBody {
            code: Some(code), ..
        }) => code,
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("CIVO_TOKEN", Some("token")),
                ("CIVO_API_URL", Some("http://localhost:8080/v2/")),
            ],
            || {
                let config = CivoConfig::from_env().unwrap();
                assert_eq!(config.api_token, "token");
                assert_eq!(config.api_base, "http://localhost:8080/v2");
                assert_eq!(config.max_size_gb, DEFAULT_MAX_SIZE_GB);
            },
        );
    }

    #[test]
    fn test_config_requires_token() {
        temp_env::with_var_unset("CIVO_TOKEN", || {
            let err = CivoConfig::from_env().unwrap_err();
            assert!(matches!(err, CivoError::MissingEnvVar(var) if var == "CIVO_TOKEN"));
        });
    }

    #[test]
    fn test_url_joins_path() {
        let api = CivoApi::new(CivoConfig {
            api_token: "t".into(),
            api_base: CIVO_API_BASE.into(),
            max_size_gb: 500,
        });
        assert_eq!(
            api.url("/objectstore/credentials"),
            "https://api.civo.com/v2/objectstore/credentials"
        );
    }

    #[test]
    fn test_parse_credential_page() {
        let page: Page<ObjectStoreCredential> = serde_json::from_str(
            r#"{
                "page": 1,
                "per_page": 20,
                "pages": 1,
                "items": [{
                    "id": "cred-1",
                    "name": "k1-state-store",
                    "access_key_id": "AK",
                    "secret_access_key_id": "",
                    "max_size_gb": 500,
                    "status": "creating"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].access_key_id, "AK");
        assert!(page.items[0].secret_access_key_id.is_empty());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"code":"database_objectstore_credential_exists","reason":"credential already exists"}"#),
            "credential already exists"
        );
        assert_eq!(error_message(r#"{"code":"forbidden"}"#), "forbidden");
        assert_eq!(error_message(""), "Unknown error");
        assert_eq!(error_message("bad gateway"), "bad gateway");
    }
}
