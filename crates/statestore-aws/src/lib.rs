//! AWS provider for state store provisioning
//!
//! Implements [`AwsObjectStorage`](statestore_core::AwsObjectStorage) on top of
//! `aws-sdk-s3`, and exposes [`S3Buckets`] for the S3-compatible bucket APIs
//! of other providers (DigitalOcean Spaces, Vultr object storage).
//!
//! # Requirements
//!
//! - AWS credentials resolvable by the default `aws-config` chain
//!   (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, profiles, IMDS, ...)
//!
//! # Example
//!
//! ```ignore
//! use statestore_aws::AwsS3Storage;
//! use statestore_core::{AwsStateStore, ProviderRegistry};
//! use std::sync::Arc;
//!
//! let storage = AwsS3Storage::from_env("us-east-2").await;
//! let registry = ProviderRegistry::new().with(AwsStateStore::new(Arc::new(storage)));
//! ```

pub mod error;
pub mod provider;
pub mod s3;

pub use error::{AwsError, Result};
pub use provider::AwsS3Storage;
pub use s3::S3Buckets;
