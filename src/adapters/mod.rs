//! Concrete implementations of the domain ports.

pub mod sinks;
pub mod strategies;
