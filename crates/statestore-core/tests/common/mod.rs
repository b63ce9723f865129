#![allow(dead_code)]

use async_trait::async_trait;
use statestore_core::{
    AwsBucket, AwsObjectStorage, AwsStateStore, BucketCredentials, CivoBucket, CivoCredential,
    CivoObjectStorage, CivoStateStore, CloudError, CloudProvider, ClusterField, ClusterRecord,
    ClusterStore, DigitalOceanStateStore, MemoryClusterStore, ProviderRegistry, Result,
    SpacesObjectStorage, StateStoreExecutor, VultrObjectStorage, VultrObjectStore,
    VultrStateStore,
};
use std::sync::{Arc, Mutex};

/// Shared, ordered log of adapter calls
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

/// Memory store that records field updates and can fail one update
pub struct RecordingStore {
    inner: MemoryClusterStore,
    updates: Mutex<Vec<&'static str>>,
    fail_once_on: Mutex<Option<&'static str>>,
}

impl RecordingStore {
    pub async fn with(record: ClusterRecord) -> Arc<Self> {
        let inner = MemoryClusterStore::new();
        inner.insert(record).await;
        Arc::new(Self {
            inner,
            updates: Mutex::new(Vec::new()),
            fail_once_on: Mutex::new(None),
        })
    }

    /// Fail the next update of `field`
    pub fn fail_once_on(&self, field: &'static str) {
        *self.fail_once_on.lock().unwrap() = Some(field);
    }

    /// Successfully applied updates, in order
    pub fn updates(&self) -> Vec<&'static str> {
        self.updates.lock().unwrap().clone()
    }

    pub async fn record(&self, cluster_name: &str) -> ClusterRecord {
        self.inner.get_cluster(cluster_name).await.unwrap()
    }
}

#[async_trait]
impl ClusterStore for RecordingStore {
    async fn get_cluster(&self, cluster_name: &str) -> Result<ClusterRecord> {
        self.inner.get_cluster(cluster_name).await
    }

    async fn update_cluster(&self, cluster_name: &str, field: ClusterField) -> Result<()> {
        let name = field.name();
        {
            let mut fail = self.fail_once_on.lock().unwrap();
            if *fail == Some(name) {
                *fail = None;
                return Err(CloudError::StateError(format!("injected failure on {name}")));
            }
        }
        self.inner.update_cluster(cluster_name, field).await?;
        self.updates.lock().unwrap().push(name);
        Ok(())
    }
}

pub struct FakeAws {
    pub log: CallLog,
}

#[async_trait]
impl AwsObjectStorage for FakeAws {
    async fn create_bucket(&self, name: &str) -> Result<AwsBucket> {
        self.log.push(format!("aws.create_bucket:{name}"));
        Ok(AwsBucket {
            location: format!("/{name}"),
        })
    }
}

pub struct FakeCivo {
    pub log: CallLog,
    pub credential: CivoCredential,
    pub fail_delete: bool,
}

impl FakeCivo {
    pub fn complete(log: CallLog) -> Self {
        Self {
            log,
            credential: civo_credential(),
            fail_delete: false,
        }
    }
}

pub fn civo_credential() -> CivoCredential {
    CivoCredential {
        access_key_id: "CIVO-AK".into(),
        id: "cred-123".into(),
        name: "k1-state-store".into(),
        secret_access_key_id: "CIVO-SK".into(),
    }
}

#[async_trait]
impl CivoObjectStorage for FakeCivo {
    async fn get_access_credentials(&self, name: &str, region: &str) -> Result<CivoCredential> {
        self.log
            .push(format!("civo.get_access_credentials:{name}:{region}"));
        Ok(self.credential.clone())
    }

    async fn delete_access_credentials(&self, name: &str, region: &str) -> Result<()> {
        self.log
            .push(format!("civo.delete_access_credentials:{name}:{region}"));
        if self.fail_delete {
            return Err(CloudError::provider(CloudProvider::Civo, "credential is locked"));
        }
        Ok(())
    }

    async fn create_storage_bucket(
        &self,
        access_key_id: &str,
        name: &str,
        region: &str,
    ) -> Result<CivoBucket> {
        self.log.push(format!(
            "civo.create_storage_bucket:{access_key_id}:{name}:{region}"
        ));
        Ok(CivoBucket {
            id: "bucket-456".into(),
            name: name.to_string(),
        })
    }
}

pub struct FakeSpaces {
    pub log: CallLog,
}

#[async_trait]
impl SpacesObjectStorage for FakeSpaces {
    fn spaces_credentials(&self) -> BucketCredentials {
        self.log.push("digitalocean.spaces_credentials");
        BucketCredentials {
            access_key: "DO-AK".into(),
            secret_access_key: "DO-SK".into(),
            endpoint: "nyc3.digitaloceanspaces.com".into(),
        }
    }

    async fn create_space_bucket(&self, credentials: &BucketCredentials, name: &str) -> Result<()> {
        self.log.push(format!(
            "digitalocean.create_space_bucket:{}:{name}",
            credentials.endpoint
        ));
        Ok(())
    }
}

pub struct FakeVultr {
    pub log: CallLog,
    pub fail_create: bool,
}

#[async_trait]
impl VultrObjectStorage for FakeVultr {
    async fn create_object_storage(&self, region: &str, label: &str) -> Result<VultrObjectStore> {
        self.log
            .push(format!("vultr.create_object_storage:{region}:{label}"));
        if self.fail_create {
            return Err(CloudError::provider(CloudProvider::Vultr, "quota exceeded"));
        }
        Ok(VultrObjectStore {
            id: "os-789".into(),
            label: label.to_string(),
            s3_hostname: "ewr1.vultrobjects.com".into(),
            s3_access_key: "VULTR-AK".into(),
            s3_secret_key: "VULTR-SK".into(),
        })
    }

    async fn create_object_storage_bucket(
        &self,
        credentials: &BucketCredentials,
        name: &str,
    ) -> Result<()> {
        self.log.push(format!(
            "vultr.create_object_storage_bucket:{}:{name}",
            credentials.endpoint
        ));
        Ok(())
    }
}

/// Registry with every provider backed by a well-behaved fake
pub fn registry(log: &CallLog) -> ProviderRegistry {
    ProviderRegistry::new()
        .with(AwsStateStore::new(Arc::new(FakeAws { log: log.clone() })))
        .with(CivoStateStore::new(Arc::new(FakeCivo::complete(log.clone()))))
        .with(DigitalOceanStateStore::new(Arc::new(FakeSpaces {
            log: log.clone(),
        })))
        .with(VultrStateStore::new(Arc::new(FakeVultr {
            log: log.clone(),
            fail_create: false,
        })))
}

pub fn executor(store: Arc<RecordingStore>, registry: ProviderRegistry) -> StateStoreExecutor {
    StateStoreExecutor::new(store, registry)
}

/// Fresh record for `provider` with the inputs each provider needs
pub fn record(provider: CloudProvider) -> ClusterRecord {
    let region = match provider {
        CloudProvider::Aws => "us-east-2",
        CloudProvider::Civo => "nyc1",
        CloudProvider::DigitalOcean => "nyc3",
        CloudProvider::Vultr => "ewr",
    };
    let record = ClusterRecord::new("demo", provider, region, "k1-state-store");
    match provider {
        CloudProvider::Aws => record
            .with_artifacts_bucket("k1-artifacts")
            .with_static_credentials("AWS-AK", "AWS-SK"),
        _ => record,
    }
}
