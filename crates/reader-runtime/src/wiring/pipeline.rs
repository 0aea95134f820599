//! # Reader Pipeline
//!
//! Owns the producer task and hands the sequencer to the consumer.
//!
//! ## Shutdown
//!
//! [`ReaderPipeline::shutdown`] stops the producer and cancels every
//! pending wait on the sequencer. When the source is exhausted instead,
//! [`ReaderPipeline::next_block`] drains what is queued and then reports
//! the end of the stream.

use std::sync::Arc;

use gf_01_block_aggregator::{
    BlockAggregator, SubscriptionRequest, TraceHandler, TraceSource, TransportError,
};
use gf_02_block_sequencer::{ActionReader, BlockSequencer, SequencerError};
use shared_types::BlockEnvelope;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::adapters::SequencerListener;
use crate::config::RuntimeConfig;

/// Pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The sequencer rejected its configuration or was shut down.
    #[error(transparent)]
    Sequencer(#[from] SequencerError),

    /// The trace source failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The producer task panicked or was aborted.
    #[error("Producer task failed: {0}")]
    Producer(String),
}

/// What the producer task did before it stopped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProducerSummary {
    /// Events pulled from the source.
    pub events: u64,
    /// Blocks the aggregator completed.
    pub blocks_emitted: u64,
    /// Cursor of the last processed trace, for resuming.
    pub cursor: String,
}

/// A running reader.
pub struct ReaderPipeline {
    sequencer: Arc<BlockSequencer>,
    producer: JoinHandle<Result<ProducerSummary, TransportError>>,
    /// Flips to `true` once the producer stopped for any reason.
    exhausted: watch::Receiver<bool>,
    shutdown_tx: watch::Sender<bool>,
}

impl ReaderPipeline {
    /// Builds the aggregator and the sequencer and spawns the producer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(config: &RuntimeConfig, source: S) -> Result<Self, PipelineError>
    where
        S: TraceSource + 'static,
    {
        let sequencer = Arc::new(BlockSequencer::new(config.sequencer.clone())?);

        let mut aggregator = BlockAggregator::new(config.stream.clone());
        aggregator.add_listener(Arc::new(SequencerListener::new(Arc::clone(&sequencer))));

        let request = SubscriptionRequest::new(aggregator.config(), config.cursor.clone());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (exhausted_tx, exhausted) = watch::channel(false);

        let producer = tokio::spawn(async move {
            let result = run_producer(source, aggregator, request, shutdown_rx).await;
            exhausted_tx.send_replace(true);
            result
        });

        info!(
            network = %config.stream.network,
            start_at_block = config.sequencer.start_at_block,
            "Reader pipeline started"
        );

        Ok(Self {
            sequencer,
            producer,
            exhausted,
            shutdown_tx,
        })
    }

    /// The consumer handle.
    pub fn reader(&self) -> Arc<BlockSequencer> {
        Arc::clone(&self.sequencer)
    }

    /// Next block in sequence, or `None` once the source is exhausted and
    /// nothing is left to deliver.
    pub async fn next_block(&mut self) -> Result<Option<BlockEnvelope>, SequencerError> {
        loop {
            if *self.exhausted.borrow() && self.sequencer.queue_len() == 0 {
                return Ok(None);
            }

            tokio::select! {
                biased;
                block = self.sequencer.next_block() => return block.map(Some),
                stopped = self.exhausted.wait_for(|done| *done) => {
                    // Sender dropped without signalling: the producer panicked.
                    if stopped.is_err() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Stops the producer and cancels pending reads.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
        self.sequencer.shutdown();
    }

    /// Waits for the producer to stop.
    pub async fn join(self) -> Result<ProducerSummary, PipelineError> {
        let summary = self
            .producer
            .await
            .map_err(|e| PipelineError::Producer(e.to_string()))??;
        Ok(summary)
    }
}

/// Pulls events from `source` into `aggregator` until the source is
/// exhausted, fails, or shutdown is signalled.
async fn run_producer<S: TraceSource>(
    mut source: S,
    mut aggregator: BlockAggregator,
    request: SubscriptionRequest,
    mut shutdown: watch::Receiver<bool>,
) -> Result<ProducerSummary, TransportError> {
    source.subscribe(request).await?;

    let mut events = 0u64;
    loop {
        let event = tokio::select! {
            _ = shutdown.changed() => {
                info!("Producer shutdown signal received");
                break;
            }
            event = source.next_event() => event,
        };

        match event {
            Ok(Some(event)) => {
                aggregator.on_event(event);
                events += 1;
            }
            Ok(None) => {
                info!(
                    events,
                    blocks = aggregator.emitted_count(),
                    "Trace source exhausted"
                );
                break;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    cursor = %aggregator.active_cursor(),
                    "Trace source failed"
                );
                return Err(e);
            }
        }
    }

    Ok(ProducerSummary {
        events,
        blocks_emitted: aggregator.emitted_count(),
        cursor: aggregator.active_cursor().to_string(),
    })
}
