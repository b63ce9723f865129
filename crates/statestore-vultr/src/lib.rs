//! Vultr provider for state store provisioning
//!
//! Implements [`VultrObjectStorage`](statestore_core::VultrObjectStorage):
//! an object storage subscription is created through the Vultr v2 API, then
//! the state store bucket is created inside it over its S3-compatible API.
//!
//! # Requirements
//!
//! - `VULTR_API_KEY` env var
//! - Optional `VULTR_API_URL` to point at a different API endpoint

pub mod api;
pub mod error;
pub mod provider;

pub use api::{ObjectStorage, ObjectStorageCluster, VultrApi, VultrConfig};
pub use error::{Result, VultrError};
pub use provider::{ReadyWait, VultrStorage};
