//! # Outbound Ports
//!
//! Traits for the aggregator's collaborators: the listeners it publishes
//! completed blocks to, and the transport it is fed from.

use std::collections::VecDeque;

use async_trait::async_trait;
use shared_types::{BlockEnvelope, TraceEvent};

use crate::domain::{SubscriptionRequest, TransportError};

/// Block listener - outbound port.
///
/// Receives every completed block, in emission order.
pub trait BlockListener: Send + Sync {
    /// A block was completed.
    fn on_block(&self, envelope: BlockEnvelope);

    /// The source reached the chain head.
    fn on_live_marker(&self) {}
}

/// Filtered transaction source - outbound port.
///
/// Implementations own connection, authentication and reconnection.
/// Events must be delivered in strict arrival order.
#[async_trait]
pub trait TraceSource: Send {
    /// Opens (or reopens) the subscription.
    async fn subscribe(&mut self, request: SubscriptionRequest) -> Result<(), TransportError>;

    /// Next event, or `None` once the stream is exhausted.
    async fn next_event(&mut self) -> Result<Option<TraceEvent>, TransportError>;
}

/// In-memory source replaying a fixed list of events.
#[derive(Debug, Default)]
pub struct MockTraceSource {
    /// Events still to deliver.
    pub events: VecDeque<TraceEvent>,
    /// Last subscription request received.
    pub request: Option<SubscriptionRequest>,
    /// Fail every call with a disconnect.
    pub should_fail: bool,
}

impl MockTraceSource {
    /// Creates a source that will deliver `events` in order.
    pub fn new(events: impl IntoIterator<Item = TraceEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TraceSource for MockTraceSource {
    async fn subscribe(&mut self, request: SubscriptionRequest) -> Result<(), TransportError> {
        if self.should_fail {
            return Err(TransportError::Disconnected("Mock failure".to_string()));
        }
        self.request = Some(request);
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<TraceEvent>, TransportError> {
        if self.should_fail {
            return Err(TransportError::Disconnected("Mock failure".to_string()));
        }
        if self.request.is_none() {
            return Err(TransportError::NotSubscribed);
        }
        Ok(self.events.pop_front())
    }
}
