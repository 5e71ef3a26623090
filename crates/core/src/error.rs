//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// broken balance invariants, malformed input). Infrastructure concerns
/// belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed boundary validation (e.g. splits not adding up).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The split method named by an expense is not one the allocator knows.
    #[error("unknown split type: {0:?}")]
    UnknownSplitType(String),

    /// A balance map did not sum to zero; the caller's bookkeeping is corrupt.
    #[error("balances do not sum to zero (off by {sum} cents)")]
    BalanceIntegrity { sum: i128 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_split_type(raw: impl Into<String>) -> Self {
        Self::UnknownSplitType(raw.into())
    }
}
