//! # Inbound Ports
//!
//! API trait through which the transport feeds the aggregator.

use shared_types::TraceEvent;

/// Trace Handler API - inbound port.
///
/// Called once per event, strictly in arrival order.
pub trait TraceHandler: Send {
    /// Consumes one event from the upstream source.
    fn on_event(&mut self, event: TraceEvent);

    /// Cursor of the last trace consumed, empty before the first one.
    fn active_cursor(&self) -> &str;

    /// Whether the source has signalled that it reached the chain head.
    fn is_live_marker_reached(&self) -> bool;
}
