//! Infrastructure layer module
//!
//! - Configuration management (figment layering and validation)
//! - Logging infrastructure (tracing subscriber setup)

pub mod config;
pub mod logging;
