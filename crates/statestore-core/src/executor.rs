//! Provisioning step executor
//!
//! Runs the `StateStoreCredentials` and `StateStoreCreate` steps for a
//! cluster. Both are safe to re-invoke: a set checkpoint short-circuits the
//! step, and the checkpoint is always the last field written, so an
//! interrupted run is simply redone on the next invocation.

use crate::error::{CloudError, Result};
use crate::model::{ClusterField, ClusterRecord, StateStoreDetails};
use crate::step::{self, Step, StepAction, StepOutcome};
use crate::store::ClusterStore;
use crate::variant::{ProviderRegistry, StateStoreVariant};
use std::sync::Arc;

/// Outcomes of running both steps in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub credentials: StepOutcome,
    pub create: StepOutcome,
}

pub struct StateStoreExecutor {
    store: Arc<dyn ClusterStore>,
    registry: ProviderRegistry,
}

impl StateStoreExecutor {
    pub fn new(store: Arc<dyn ClusterStore>, registry: ProviderRegistry) -> Self {
        Self { store, registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// `StateStoreCredentials` step
    pub async fn acquire_state_store_credentials(&self, cluster_name: &str) -> Result<StepOutcome> {
        let record = self.store.get_cluster(cluster_name).await?;

        // Credentials always run unless checkpointed, so no variant is needed
        // to decide
        if step::plan(Step::StateStoreCredentials, &record, false)? == StepAction::Skip {
            tracing::debug!(
                "{} already set for cluster {}, skipping",
                Step::StateStoreCredentials.checkpoint_field(),
                cluster_name
            );
            return Ok(StepOutcome::Skipped);
        }

        let variant = self.registry.get(record.cloud_provider)?;
        let acquired = variant.acquire_credentials(&record).await?;

        if let Some(details) = &acquired.details {
            self.persist(cluster_name, ClusterField::StateStoreDetails(details.clone()))
                .await?;
        }
        self.persist(
            cluster_name,
            ClusterField::StateStoreCredentials(acquired.credentials),
        )
        .await?;
        self.persist(cluster_name, Step::StateStoreCredentials.completion())
            .await?;

        tracing::info!(
            "{} object storage credentials created and set",
            record.cloud_provider
        );
        Ok(StepOutcome::Completed {
            details: acquired.details,
        })
    }

    /// `StateStoreCreate` step
    pub async fn create_state_store(&self, cluster_name: &str) -> Result<StepOutcome> {
        let record = self.store.get_cluster(cluster_name).await?;

        if record.state_store_create_check {
            tracing::debug!(
                "{} already set for cluster {}, skipping",
                Step::StateStoreCreate.checkpoint_field(),
                cluster_name
            );
            return Ok(StepOutcome::Skipped);
        }

        let variant = self.registry.get(record.cloud_provider)?;
        match step::plan(Step::StateStoreCreate, &record, variant.separate_create())? {
            StepAction::Skip => Ok(StepOutcome::Skipped),
            StepAction::NotApplicable => {
                tracing::debug!(
                    "{} creates its bucket with the credentials step, nothing to do for {}",
                    record.cloud_provider,
                    cluster_name
                );
                Ok(StepOutcome::NotApplicable)
            }
            StepAction::Run => {
                let details = self
                    .create_with(cluster_name, variant.as_ref(), &record)
                    .await?;
                Ok(StepOutcome::Completed {
                    details: Some(details),
                })
            }
        }
    }

    /// Run both steps in order, stopping at the first error
    pub async fn provision(&self, cluster_name: &str) -> Result<ProvisionReport> {
        let credentials = self.acquire_state_store_credentials(cluster_name).await?;
        let create = self.create_state_store(cluster_name).await?;
        Ok(ProvisionReport {
            credentials,
            create,
        })
    }

    async fn create_with(
        &self,
        cluster_name: &str,
        variant: &dyn StateStoreVariant,
        record: &ClusterRecord,
    ) -> Result<StateStoreDetails> {
        let details = variant.create_state_store(record).await?;

        self.persist(cluster_name, ClusterField::StateStoreDetails(details.clone()))
            .await?;
        self.persist(cluster_name, Step::StateStoreCreate.completion())
            .await?;

        tracing::info!("{} state store bucket created", record.cloud_provider);
        Ok(details)
    }

    async fn persist(&self, cluster_name: &str, field: ClusterField) -> Result<()> {
        let name = field.name();
        self.store
            .update_cluster(cluster_name, field)
            .await
            .map_err(|e| CloudError::update_failed(cluster_name, name, e))
    }
}
