//! State store provisioning
//!
//! This crate provisions the object storage bucket ("state store") a cluster's
//! infrastructure state is kept in, across several cloud providers, as two
//! checkpointed steps that can be invoked repeatedly without redoing work.
//!
//! # Supported Providers
//!
//! - **AWS**: S3 state store and artifacts buckets with static credentials
//! - **Civo**: object store credentials, then a bucket in a separate step
//! - **DigitalOcean**: Spaces bucket with Spaces keys
//! - **Vultr**: object storage subscription plus bucket
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              StateStoreExecutor                  │
//! │   StateStoreCredentials ──▶ StateStoreCreate     │
//! └───────┬───────────────────────────┬─────────────┘
//!         │ checkpoints & results     │ dispatch by provider
//! ┌───────▼───────┐         ┌─────────▼─────────────┐
//! │ ClusterStore  │         │  StateStoreVariant    │
//! │ (file/memory) │         │  aws│civo│do│vultr    │
//! └───────────────┘         └─────────┬─────────────┘
//!                                     │ native calls
//!                           ┌─────────▼─────────────┐
//!                           │ provider adapters     │
//!                           │ (statestore-* crates) │
//!                           └───────────────────────┘
//! ```

pub mod adapter;
pub mod error;
pub mod executor;
pub mod model;
pub mod normalize;
pub mod state;
pub mod step;
pub mod store;
pub mod validate;
pub mod variant;

// Re-exports
pub use adapter::{
    AwsBucket, AwsObjectStorage, BucketCredentials, CivoBucket, CivoCredential,
    CivoObjectStorage, SpacesObjectStorage, VultrObjectStorage, VultrObjectStore,
};
pub use error::{CloudError, Result};
pub use executor::{ProvisionReport, StateStoreExecutor};
pub use model::{
    CloudProvider, ClusterField, ClusterRecord, StateStoreCredentials, StateStoreDetails,
    StaticCredentials,
};
pub use state::{ClusterDatabase, FileClusterStore};
pub use step::{Checkpoint, Step, StepAction, StepOutcome};
pub use store::{ClusterStore, MemoryClusterStore};
pub use validate::ValidationFailure;
pub use variant::{
    AcquiredCredentials, AwsStateStore, CivoStateStore, DigitalOceanStateStore,
    ProviderRegistry, StateStoreVariant, VultrStateStore,
};
