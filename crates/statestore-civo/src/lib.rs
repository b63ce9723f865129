//! Civo provider for state store provisioning
//!
//! Implements [`CivoObjectStorage`](statestore_core::CivoObjectStorage) using
//! the Civo object store REST API.
//!
//! # Requirements
//!
//! - `CIVO_TOKEN` env var with an API key
//! - Optional `CIVO_API_URL` to point at a different API endpoint
//!
//! # Example
//!
//! ```ignore
//! use statestore_civo::{CivoConfig, CivoObjectStore};
//! use statestore_core::{CivoStateStore, ProviderRegistry};
//! use std::sync::Arc;
//!
//! let storage = CivoObjectStore::new(CivoConfig::from_env()?);
//! let registry = ProviderRegistry::new().with(CivoStateStore::new(Arc::new(storage)));
//! ```

pub mod api;
pub mod error;
pub mod provider;

pub use api::{CivoApi, CivoConfig, ObjectStoreCredential, ObjectStoreInfo};
pub use error::{CivoError, Result};
pub use provider::{CivoObjectStore, SecretWait};
