//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the catalog's structural rules.
/// These are independent of where the records came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}
