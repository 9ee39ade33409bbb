//! Domain layer for the hierarch convergence core
//!
//! This module contains the data model, the port traits the core depends on,
//! and the boundary error types.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
