//! Provisioning steps and their checkpoints
//!
//! Each step is a two-state machine, `NotDone -> Done`, persisted as a flag on
//! the cluster record. Whether a step acts is decided from the record alone by
//! [`plan`], so repeated invocations against the same snapshot always agree.

use crate::error::{CloudError, Result};
use crate::model::{ClusterField, ClusterRecord, StateStoreDetails};
use serde::{Deserialize, Serialize};

/// Named provisioning step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Acquire object storage credentials (and, for some providers, the bucket)
    StateStoreCredentials,
    /// Create the bucket with previously acquired credentials
    StateStoreCreate,
}

impl Step {
    /// Name of the checkpoint field guarding this step
    pub fn checkpoint_field(&self) -> &'static str {
        match self {
            Step::StateStoreCredentials => ClusterField::CREDS_CHECK,
            Step::StateStoreCreate => ClusterField::CREATE_CHECK,
        }
    }

    /// Persisted checkpoint of this step
    pub fn checkpoint(&self, record: &ClusterRecord) -> Checkpoint {
        let done = match self {
            Step::StateStoreCredentials => record.state_store_creds_check,
            Step::StateStoreCreate => record.state_store_create_check,
        };
        if done { Checkpoint::Done } else { Checkpoint::NotDone }
    }

    /// Update that moves this step's checkpoint to `Done`
    pub fn completion(&self) -> ClusterField {
        match self {
            Step::StateStoreCredentials => ClusterField::StateStoreCredsCheck(true),
            Step::StateStoreCreate => ClusterField::StateStoreCreateCheck(true),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::StateStoreCredentials => write!(f, "StateStoreCredentials"),
            Step::StateStoreCreate => write!(f, "StateStoreCreate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    NotDone,
    Done,
}

/// What a step should do for a given record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    /// Checkpoint already set
    Skip,
    /// The provider has nothing to do for this step
    NotApplicable,
    /// Provision, persist, then set the checkpoint
    Run,
}

impl std::fmt::Display for StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepAction::Skip => write!(f, "skip"),
            StepAction::NotApplicable => write!(f, "not-applicable"),
            StepAction::Run => write!(f, "run"),
        }
    }
}

/// Decide the action for `step` given the current record.
///
/// `separate_create` tells whether the cluster's provider creates its bucket in
/// a dedicated step rather than while issuing credentials. Creating before the
/// credentials step has completed is a usage error.
pub fn plan(step: Step, record: &ClusterRecord, separate_create: bool) -> Result<StepAction> {
    if step.checkpoint(record) == Checkpoint::Done {
        return Ok(StepAction::Skip);
    }

    match step {
        Step::StateStoreCredentials => Ok(StepAction::Run),
        Step::StateStoreCreate if !separate_create => Ok(StepAction::NotApplicable),
        Step::StateStoreCreate => {
            let creds_ready = Step::StateStoreCredentials.checkpoint(record) == Checkpoint::Done
                && !record.state_store_credentials.access_key_id.is_empty();
            if creds_ready {
                Ok(StepAction::Run)
            } else {
                Err(CloudError::CredentialsNotReady(record.cluster_name.clone()))
            }
        }
    }
}

/// Result of invoking a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Checkpoint was already set; nothing was called or written
    Skipped,
    /// Nothing to do for this provider; nothing was called or written
    NotApplicable,
    /// Provisioning ran and the checkpoint is now set
    Completed { details: Option<StateStoreDetails> },
}

impl StepOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed { .. })
    }
}
