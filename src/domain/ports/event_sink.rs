use crate::domain::models::CoordinatorEvent;

/// A subscriber to the coordinator's event stream.
///
/// Delivery is synchronous and in emission order. Sinks must not panic; a
/// slow sink slows the run.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &CoordinatorEvent);
}

impl<F> EventSink for F
where
    F: Fn(&CoordinatorEvent) + Send + Sync,
{
    fn emit(&self, event: &CoordinatorEvent) {
        self(event);
    }
}
