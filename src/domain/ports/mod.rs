//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the convergence core depends on:
//! - SearchStrategy: the problem-specific search and scoring the executor invokes
//! - EventSink: subscribers to the coordinator's event stream
//!
//! Both are synchronous. The core never depends on a concrete strategy or
//! output sink.

pub mod event_sink;
pub mod strategy;

pub use event_sink::EventSink;
pub use strategy::SearchStrategy;
