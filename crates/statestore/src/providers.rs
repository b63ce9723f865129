//! プロバイダアダプタの構築
//!
//! 対象クラスタのプロバイダだけを環境変数から組み立てる。他プロバイダの
//! 認証情報が未設定でも動くようにするため。

use anyhow::Context;
use statestore_aws::AwsS3Storage;
use statestore_civo::{CivoConfig, CivoObjectStore};
use statestore_core::{
    AwsStateStore, CivoStateStore, CloudProvider, ClusterRecord, DigitalOceanStateStore,
    ProviderRegistry, VultrStateStore,
};
use statestore_digitalocean::{SpacesConfig, SpacesStorage};
use statestore_vultr::{VultrConfig, VultrStorage};
use std::sync::Arc;

/// Registry containing the variant for `record`'s provider
pub async fn registry_for(record: &ClusterRecord) -> anyhow::Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();

    match record.cloud_provider {
        CloudProvider::Aws => {
            let region = record.cloud_region.clone();
            let storage = match &record.static_credentials {
                Some(keys) => AwsS3Storage::with_static_keys(region, keys).await,
                None => AwsS3Storage::from_env(region).await,
            };
            registry.register(AwsStateStore::new(Arc::new(storage)));
        }
        CloudProvider::Civo => {
            let config = CivoConfig::from_env().context("Civo の設定を読み込めません")?;
            registry.register(CivoStateStore::new(Arc::new(CivoObjectStore::new(config))));
        }
        CloudProvider::DigitalOcean => {
            let config = SpacesConfig::from_env().context("Spaces の設定を読み込めません")?;
            registry.register(DigitalOceanStateStore::new(Arc::new(SpacesStorage::new(
                config,
            ))));
        }
        CloudProvider::Vultr => {
            let config = VultrConfig::from_env().context("Vultr の設定を読み込めません")?;
            registry.register(VultrStateStore::new(Arc::new(VultrStorage::new(config))));
        }
    }

    tracing::debug!("Registered {} adapter", record.cloud_provider);
    Ok(registry)
}
