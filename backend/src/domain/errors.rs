//! Domain error taxonomy.
//!
//! Aggregators either succeed with the full requested computation or fail
//! with one of these variants; no partial results are returned. Degenerate
//! arithmetic (zero income, zero budget) is a guarded value, not an error.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input: inverted date range, missing identity, bad amounts.
    /// Surfaced immediately, before any storage read.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A ledger or budget source read/write failed. Propagated as-is;
    /// retries belong to the storage transport, not the domain layer.
    #[error("data source failure: {0}")]
    DataSource(#[source] anyhow::Error),

    /// A report request exceeded its deadline; all in-flight reads were
    /// cancelled and nothing was rendered.
    #[error("report generation timed out after {0:?}")]
    Timeout(Duration),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn data_source(err: anyhow::Error) -> Self {
        DomainError::DataSource(err)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Every aggregation call is scoped to exactly one user; an empty identity
/// is a caller bug and fails before any query is issued.
pub fn require_user(user_id: &str) -> DomainResult<()> {
    if user_id.trim().is_empty() {
        return Err(DomainError::validation("user identity is required"));
    }
    Ok(())
}
