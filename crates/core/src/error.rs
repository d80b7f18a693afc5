//! Ledger error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Domain-level ledger error.
///
/// Keep this focused on deterministic business failures detected **before**
/// any mutation is attempted (fail closed, no partial writes). Remote/network
/// concerns belong to the client layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A quantity was zero, negative, or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A usage would draw more stock than the item has on hand.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },

    /// A unit cost was negative.
    #[error("invalid cost: {0}")]
    InvalidCost(String),

    /// A required doctor/patient selection was absent.
    #[error("missing selection: {0}")]
    MissingSelection(&'static str),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The referenced item does not exist (domain-level).
    #[error("item not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate creation, stale version).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl LedgerError {
    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn insufficient_stock(requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn invalid_cost(msg: impl Into<String>) -> Self {
        Self::InvalidCost(msg.into())
    }

    pub fn missing_selection(field: &'static str) -> Self {
        Self::MissingSelection(field)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
