//! Civo object store adapter

use crate::api::{CivoApi, CivoConfig, ObjectStoreCredential};
use crate::error::Result;
use async_trait::async_trait;
use statestore_core::{CivoBucket, CivoCredential, CivoObjectStorage};
use std::time::Duration;

/// How long to wait for a freshly created credential to get its secret
#[derive(Debug, Clone)]
pub struct SecretWait {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for SecretWait {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

/// Civo object stores via the REST API
pub struct CivoObjectStore {
    api: CivoApi,
    secret_wait: SecretWait,
}

impl CivoObjectStore {
    pub fn new(config: CivoConfig) -> Self {
        Self {
            api: CivoApi::new(config),
            secret_wait: SecretWait::default(),
        }
    }

    pub fn with_secret_wait(mut self, secret_wait: SecretWait) -> Self {
        self.secret_wait = secret_wait;
        self
    }

    /// Existing credential named `name`, or a new one
    async fn find_or_create_credential(
        &self,
        name: &str,
        region: &str,
    ) -> Result<ObjectStoreCredential> {
        if let Some(existing) = self.api.find_credential(name, region).await? {
            tracing::debug!("Reusing civo object store credential {}", name);
            return Ok(existing);
        }

        tracing::info!("Creating civo object store credential {} in {}", name, region);
        self.api.create_credential(name, region).await
    }

    /// Re-read the credential until its secret is populated or attempts run
    /// out. Whatever was read last is returned; validation happens upstream.
    async fn await_secret(
        &self,
        name: &str,
        mut credential: ObjectStoreCredential,
        region: &str,
    ) -> Result<ObjectStoreCredential> {
        for attempt in 1..=self.secret_wait.attempts {
            if !credential.secret_access_key_id.is_empty() {
                break;
            }
            tracing::debug!(
                "Civo credential {} has no secret yet (attempt {}/{})",
                name,
                attempt,
                self.secret_wait.attempts
            );
            tokio::time::sleep(self.secret_wait.delay).await;

            if let Some(latest) = self.api.find_credential(name, region).await? {
                credential = latest;
            }
        }
        Ok(credential)
    }
}

impl From<ObjectStoreCredential> for CivoCredential {
    fn from(credential: ObjectStoreCredential) -> Self {
        Self {
            access_key_id: credential.access_key_id,
            id: credential.id,
            name: credential.name,
            secret_access_key_id: credential.secret_access_key_id,
        }
    }
}

#[async_trait]
impl CivoObjectStorage for CivoObjectStore {
    async fn get_access_credentials(
        &self,
        name: &str,
        region: &str,
    ) -> statestore_core::Result<CivoCredential> {
        let credential = self.find_or_create_credential(name, region).await?;
        let credential = self.await_secret(name, credential, region).await?;
        Ok(credential.into())
    }

    async fn delete_access_credentials(
        &self,
        name: &str,
        region: &str,
    ) -> statestore_core::Result<()> {
        match self.api.find_credential(name, region).await? {
            Some(credential) if !credential.id.is_empty() => {
                self.api.delete_credential(&credential.id, region).await?;
                tracing::info!("Deleted civo object store credential {}", name);
            }
            _ => {
                tracing::debug!("No civo object store credential {} to delete", name);
            }
        }
        Ok(())
    }

    async fn create_storage_bucket(
        &self,
        access_key_id: &str,
        name: &str,
        region: &str,
    ) -> statestore_core::Result<CivoBucket> {
        let store = match self.api.find_object_store(name, region).await? {
            Some(existing) => {
                tracing::debug!("Reusing civo object store {}", name);
                existing
            }
            None => {
                tracing::info!("Creating civo object store {} in {}", name, region);
                self.api
                    .create_object_store(name, access_key_id, region)
                    .await?
            }
        };

        Ok(CivoBucket {
            id: store.id,
            name: store.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_conversion_keeps_empty_fields() {
        let credential: CivoCredential = ObjectStoreCredential {
            id: "cred-1".into(),
            name: String::new(),
            access_key_id: "AK".into(),
            secret_access_key_id: "SK".into(),
            status: "ready".into(),
        }
        .into();

        assert_eq!(credential.id, "cred-1");
        assert!(credential.name.is_empty());
        assert_eq!(credential.secret_access_key_id, "SK");
    }

    /// Serve one HTTP response on a local port and hand back the request line
    async fn serve_once(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let request = String::from_utf8_lossy(&request).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });
        (base, handle)
    }

    #[tokio::test]
    async fn test_await_secret_refreshes_by_requested_name() {
        let (api_base, server) = serve_once(
            r#"{"page": 1, "pages": 1, "items": [
                {"id": "cred-1", "name": "k1-state-store", "access_key_id": "AK", "secret_access_key_id": "SK"}
            ]}"#,
        )
        .await;
        let store = CivoObjectStore::new(CivoConfig {
            api_token: "token".into(),
            api_base,
            max_size_gb: 500,
        })
        .with_secret_wait(SecretWait {
            attempts: 1,
            delay: Duration::from_millis(1),
        });

        // Freshly created credential: the API has not filled in name or secret
        let pending = ObjectStoreCredential {
            id: "cred-1".into(),
            access_key_id: "AK".into(),
            ..Default::default()
        };
        let credential = store
            .await_secret("k1-state-store", pending, "NYC1")
            .await
            .unwrap();

        assert_eq!(credential.name, "k1-state-store");
        assert_eq!(credential.secret_access_key_id, "SK");
        assert!(server.await.unwrap().contains("objectstore/credentials"));
    }

    #[test]
    fn test_default_secret_wait() {
        let wait = SecretWait::default();
        assert_eq!(wait.attempts, 5);
        assert_eq!(wait.delay, Duration::from_secs(2));
    }
}
