//! Built-in event sinks.

pub mod recording;
pub mod tracing_sink;

pub use recording::RecordingEventSink;
pub use tracing_sink::TracingEventSink;
