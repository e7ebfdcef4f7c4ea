//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Every failure aborts the
//! operation before any write; the transport collaborator decides how each
//! variant maps to a response.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or missing input (bad name charset, empty name, missing or
    /// negative quantity, missing identifiers).
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint would be violated (entity name or stock
    /// composite key). Validation-class for the caller.
    #[error("{0}")]
    Duplicate(String),

    /// An id or composite key that must exist does not.
    #[error("{0}")]
    NotFound(String),

    /// A foreign reference (product/inventory id on a stock entry) does not
    /// resolve.
    #[error("{0}")]
    InvalidReference(String),

    /// Storage adapter failure.
    #[error("Repository error: {0}")]
    Repo(String),
}
