//! Ledger error taxonomy.
//!
//! Every fallible operation in this workspace returns `Result<T, LedgerError>`.
//! `LedgerError::category()` gives an eventual RPC adapter a single place to
//! translate a domain error into a transport status, so the taxonomy only
//! needs to be maintained here.

use uuid::Uuid;

/// Coarse-grained category an RPC boundary would map a [`LedgerError`] onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArgument,
    NotFound,
    Unauthenticated,
    Unimplemented,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("amount must be strictly positive, got {amount}")]
    InvalidAmount { amount: String },

    #[error("bucket {bucket_id} has type {actual:?}, expected {expected:?}")]
    InvalidType {
        bucket_id: Uuid,
        expected: &'static str,
        actual: String,
    },

    #[error("split rule for bucket {source_bucket_id} is invalid: {reason}")]
    InvalidRule {
        source_bucket_id: Uuid,
        reason: String,
    },

    #[error("identifier {raw} is not a valid identifier")]
    InvalidIdentifier { raw: String },

    #[error("value {value} is out of range ({min}..={max})")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("missing or invalid authorization credential")]
    Unauthenticated,

    #[error("unsupported operation: {reason}")]
    Unsupported { reason: String },

    #[error("allocation of {total} overflowed while assigning to {target_bucket_id}")]
    AllocationOverflow {
        total: String,
        target_bucket_id: Uuid,
    },

    #[error("allocation of {total} did not sum exactly (assigned {assigned})")]
    AllocationImbalance { total: String, assigned: String },

    #[error("transaction {transaction_id} layer {layer} does not balance (debit {debit} != credit {credit})")]
    LayerImbalance {
        transaction_id: Uuid,
        layer: &'static str,
        debit: String,
        credit: String,
    },

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::InvalidAmount { .. }
            | LedgerError::InvalidType { .. }
            | LedgerError::InvalidRule { .. }
            | LedgerError::InvalidIdentifier { .. }
            | LedgerError::OutOfRange { .. }
            | LedgerError::AllocationOverflow { .. }
            | LedgerError::AllocationImbalance { .. }
            | LedgerError::LayerImbalance { .. } => ErrorCategory::InvalidArgument,

            LedgerError::NotFound { .. } => ErrorCategory::NotFound,
            LedgerError::Unauthenticated => ErrorCategory::Unauthenticated,
            LedgerError::Unsupported { .. } => ErrorCategory::Unimplemented,
            LedgerError::Storage(_) | LedgerError::Unknown(_) => ErrorCategory::Internal,
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
