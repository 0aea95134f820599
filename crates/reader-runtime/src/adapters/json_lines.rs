//! # JSON Lines Trace Source
//!
//! Replays the upstream stream from newline-delimited JSON, one message per
//! line:
//!
//! ```text
//! {"undo":false,"irreversibleBlockNum":90,"cursor":"c1","trace":{"id":"trx","block":{"num":100,"id":"b100","previous":"b99","timestamp":"..."},"matchingActions":[...]}}
//! {"undo":false,"irreversibleBlockNum":90,"cursor":"","trace":null}
//! ```
//!
//! A message with `"trace": null` is the live marker. Messages are decoded
//! here and never leave this module in wire form.

use std::path::Path;

use async_trait::async_trait;
use gf_01_block_aggregator::{SubscriptionRequest, TraceSource, TransportError};
use serde::Deserialize;
use shared_types::{BlockNumber, MatchingAction, TraceBlock, TraceEvent, TransactionTrace};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, trace};

/// One line of the stream, as sent by the source.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    #[serde(default)]
    undo: bool,
    #[serde(default)]
    irreversible_block_num: BlockNumber,
    #[serde(default)]
    cursor: String,
    #[serde(default)]
    trace: Option<WireTrace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTrace {
    id: String,
    block: TraceBlock,
    #[serde(default)]
    matching_actions: Vec<MatchingAction>,
}

impl WireMessage {
    fn into_event(self) -> TraceEvent {
        match self.trace {
            None => TraceEvent::LiveMarker,
            Some(wire) => TraceEvent::Trace(TransactionTrace {
                id: wire.id,
                block: wire.block,
                undo: self.undo,
                irreversible_block_num: self.irreversible_block_num,
                cursor: self.cursor,
                matching_actions: wire.matching_actions,
            }),
        }
    }
}

/// Trace source reading newline-delimited JSON.
///
/// Honors the subscription's lower bound, the irreversible-only flag, and
/// resumes right after the message carrying the requested cursor.
pub struct JsonLinesTraceSource<R> {
    reader: R,
    request: Option<SubscriptionRequest>,
    /// Cursor still to be found before delivering.
    resume_after: Option<String>,
    line_number: u64,
    buffer: String,
}

impl JsonLinesTraceSource<BufReader<File>> {
    /// Opens a trace file.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let file = File::open(path.as_ref()).await?;
        info!(path = %path.as_ref().display(), "Opened trace file");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin + Send> JsonLinesTraceSource<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            request: None,
            resume_after: None,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Reads the next non-blank line. `None` at end of input.
    async fn read_message(&mut self) -> Result<Option<WireMessage>, TransportError> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer).await? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }
            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| TransportError::Malformed {
                    line: self.line_number,
                    reason: e.to_string(),
                });
        }
    }

    /// True when the subscription filters this trace out.
    fn is_filtered(request: &SubscriptionRequest, trace: &TransactionTrace) -> bool {
        trace.block_number() < request.low_block_num
            || (request.only_irreversible && trace.block_number() > trace.irreversible_block_num)
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> TraceSource for JsonLinesTraceSource<R> {
    async fn subscribe(&mut self, request: SubscriptionRequest) -> Result<(), TransportError> {
        info!(
            network = %request.network,
            query = %request.query,
            low_block_num = request.low_block_num,
            only_irreversible = request.only_irreversible,
            resume = request.is_resume(),
            "Subscribed to trace stream"
        );
        self.resume_after = request.is_resume().then(|| request.cursor.clone());
        self.request = Some(request);
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<TraceEvent>, TransportError> {
        let request = self.request.clone().ok_or(TransportError::NotSubscribed)?;

        while let Some(message) = self.read_message().await? {
            if let Some(cursor) = &self.resume_after {
                if message.cursor == *cursor {
                    debug!(line = self.line_number, "Resume cursor found");
                    self.resume_after = None;
                }
                continue;
            }

            let event = message.into_event();
            if let TraceEvent::Trace(trace) = &event {
                if Self::is_filtered(&request, trace) {
                    trace!(block_number = trace.block_number(), "Trace filtered out");
                    continue;
                }
            }
            return Ok(Some(event));
        }

        if let Some(cursor) = self.resume_after.take() {
            return Err(TransportError::Disconnected(format!(
                "cursor {cursor} not found in stream"
            )));
        }
        Ok(None)
    }
}
