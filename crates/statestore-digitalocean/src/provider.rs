//! DigitalOcean Spaces adapter

use crate::error::{DigitalOceanError, Result};
use async_trait::async_trait;
use statestore_aws::S3Buckets;
use statestore_core::{BucketCredentials, SpacesObjectStorage};

const DEFAULT_SPACES_REGION: &str = "nyc3";

/// Spaces keys and region
#[derive(Debug, Clone)]
pub struct SpacesConfig {
    pub access_key: String,
    pub secret_access_key: String,
    pub region: String,
}

impl SpacesConfig {
    /// Create SpacesConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let access_key = required_var("DO_SPACES_KEY")?;
        let secret_access_key = required_var("DO_SPACES_SECRET")?;
        let region = std::env::var("DO_SPACES_REGION")
            .unwrap_or_else(|_| DEFAULT_SPACES_REGION.to_string());

        Ok(Self {
            access_key,
            secret_access_key,
            region,
        })
    }

    /// Spaces endpoint host for the configured region
    pub fn endpoint(&self) -> String {
        format!("{}.digitaloceanspaces.com", self.region)
    }
}

/// Set and non-empty, otherwise `MissingEnvVar`
fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DigitalOceanError::MissingEnvVar(name.to_string()))
}

pub struct SpacesStorage {
    config: SpacesConfig,
}

impl SpacesStorage {
    pub fn new(config: SpacesConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SpacesObjectStorage for SpacesStorage {
    fn spaces_credentials(&self) -> BucketCredentials {
        BucketCredentials {
            access_key: self.config.access_key.clone(),
            secret_access_key: self.config.secret_access_key.clone(),
            endpoint: self.config.endpoint(),
        }
    }

    async fn create_space_bucket(
        &self,
        credentials: &BucketCredentials,
        name: &str,
    ) -> statestore_core::Result<()> {
        let creation_failed = |source| DigitalOceanError::CreationFailed {
            name: name.to_string(),
            source,
        };

        let buckets = S3Buckets::with_endpoint(credentials).map_err(creation_failed)?;
        buckets.create_bucket(name).await.map_err(creation_failed)?;

        tracing::info!("Spaces bucket {} ready at {}", name, credentials.endpoint);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults_region() {
        temp_env::with_vars(
            [
                ("DO_SPACES_KEY", Some("DO-AK")),
                ("DO_SPACES_SECRET", Some("DO-SK")),
                ("DO_SPACES_REGION", None),
            ],
            || {
                let config = SpacesConfig::from_env().unwrap();
                assert_eq!(config.region, "nyc3");
                assert_eq!(config.endpoint(), "nyc3.digitaloceanspaces.com");
            },
        );
    }

    #[test]
    fn test_config_requires_secret() {
        temp_env::with_vars(
            [("DO_SPACES_KEY", Some("DO-AK")), ("DO_SPACES_SECRET", None)],
            || {
                let err = SpacesConfig::from_env().unwrap_err();
                assert!(matches!(err, DigitalOceanError::MissingEnvVar(var) if var == "DO_SPACES_SECRET"));
            },
        );
    }

    #[test]
    fn test_config_rejects_empty_key() {
        temp_env::with_vars(
            [("DO_SPACES_KEY", Some("")), ("DO_SPACES_SECRET", Some("DO-SK"))],
            || {
                let err = SpacesConfig::from_env().unwrap_err();
                assert!(matches!(err, DigitalOceanError::MissingEnvVar(var) if var == "DO_SPACES_KEY"));
            },
        );
    }

    #[test]
    fn test_credentials_use_region_endpoint() {
        let storage = SpacesStorage::new(SpacesConfig {
            access_key: "DO-AK".into(),
            secret_access_key: "DO-SK".into(),
            region: "ams3".into(),
        });

        let creds = storage.spaces_credentials();
        assert_eq!(creds.access_key, "DO-AK");
        assert_eq!(creds.endpoint, "ams3.digitaloceanspaces.com");
    }
}
