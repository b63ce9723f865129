//! Credential validation and compensation
//!
//! Some providers answer a credential request successfully while leaving
//! fields empty. Those credentials are checked field by field before they are
//! trusted; on failure the partially created credential is removed so a retry
//! starts clean.

use crate::error::{CloudError, Result};
use crate::model::CloudProvider;
use std::fmt;
use std::future::Future;

/// A required credential field that came back empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub provider: CloudProvider,
    pub field: &'static str,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when retrieving {} access credentials, {} was empty - please retry your cluster creation",
            self.provider, self.field
        )
    }
}

/// First field, in the given order, whose value is empty
pub fn first_missing(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.is_empty())
        .map(|(label, _)| *label)
}

/// Check `fields` in order; on the first empty one run `compensate` once and
/// return the failure.
///
/// A failed compensation is reported ahead of the validation failure, which
/// stays attached to the returned error.
pub async fn validate_or_compensate<F, Fut>(
    provider: CloudProvider,
    fields: &[(&'static str, &str)],
    compensate: F,
) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let Some(field) = first_missing(fields) else {
        return Ok(());
    };

    let failure = ValidationFailure { provider, field };
    tracing::warn!("{}; removing incomplete credentials", failure);

    match compensate().await {
        Ok(()) => Err(CloudError::InvalidCredentials(failure)),
        Err(source) => Err(CloudError::CompensationFailed {
            failure,
            source: Box::new(source),
        }),
    }
}
