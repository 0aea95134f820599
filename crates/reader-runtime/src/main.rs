//! # Gapfill Reader
//!
//! Replays a newline-delimited JSON trace stream (a file or stdin) and
//! prints the resulting gap-free block stream to stdout, one JSON envelope
//! per line. Logs go to stderr.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`GF_LOG_LEVEL`, `GF_JSON_LOGS`, ...)
//! 2. Load configuration from the environment (`GF_*`)
//! 3. Open the trace source and start the pipeline
//! 4. Print blocks until the source is exhausted or Ctrl+C

use anyhow::{Context, Result};
use gapfill_telemetry::{init_telemetry, TelemetryConfig};
use gf_01_block_aggregator::TraceSource;
use reader_runtime::{JsonLinesTraceSource, ReaderPipeline, RuntimeConfig};
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env();

    match &config.trace_file {
        Some(path) => {
            let source = JsonLinesTraceSource::open(path)
                .await
                .with_context(|| format!("Failed to open trace file {}", path.display()))?;
            run(config, source).await
        }
        None => {
            info!("Reading traces from stdin");
            let source = JsonLinesTraceSource::new(BufReader::new(tokio::io::stdin()));
            run(config, source).await
        }
    }
}

async fn run<S>(config: RuntimeConfig, source: S) -> Result<()>
where
    S: TraceSource + 'static,
{
    let mut pipeline =
        ReaderPipeline::start(&config, source).context("Failed to start reader pipeline")?;
    let mut stdout = BufWriter::new(tokio::io::stdout());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut delivered = 0u64;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted, shutting down");
                break;
            }
            block = pipeline.next_block() => {
                let Some(envelope) = block? else {
                    break;
                };
                let mut line = serde_json::to_vec(&envelope).context("Failed to encode block")?;
                line.push(b'\n');
                stdout.write_all(&line).await.context("Failed to write block")?;
                delivered += 1;
            }
        }
    }
    stdout.flush().await?;

    pipeline.shutdown();
    let summary = pipeline.join().await.context("Trace source failed")?;
    info!(
        delivered,
        events = summary.events,
        cursor = %summary.cursor,
        "Reader stopped"
    );
    Ok(())
}
