//! Domain errors for the Hierarch coordinator.
//!
//! The convergence core itself never fails; these errors only arise at its
//! edges, where problems are read from outside.

use thiserror::Error;

/// Domain-level errors that can occur at the boundary of the coordinator.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
