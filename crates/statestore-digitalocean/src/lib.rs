//! DigitalOcean provider for state store provisioning
//!
//! Implements [`SpacesObjectStorage`](statestore_core::SpacesObjectStorage):
//! Spaces buckets are created through the S3-compatible API with the Spaces
//! keys configured in the environment.
//!
//! # Requirements
//!
//! - `DO_SPACES_KEY` and `DO_SPACES_SECRET` env vars
//! - Optional `DO_SPACES_REGION` (default `nyc3`)

pub mod error;
pub mod provider;

pub use error::{DigitalOceanError, Result};
pub use provider::{SpacesConfig, SpacesStorage};
