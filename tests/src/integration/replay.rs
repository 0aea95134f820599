//! # Replay Tests
//!
//! Feeds newline-delimited JSON through the whole runtime: transport
//! adapter, aggregator, sequencer and pipeline.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use reader_runtime::{JsonLinesTraceSource, PipelineError, ReaderPipeline, RuntimeConfig};
    use shared_types::BlockEnvelope;

    use crate::fixtures::{block_id, live_marker_line, trace, undo_trace, wire_line};

    fn source(lines: &[String]) -> JsonLinesTraceSource<Cursor<Vec<u8>>> {
        JsonLinesTraceSource::new(Cursor::new(lines.join("\n").into_bytes()))
    }

    async fn drain(pipeline: &mut ReaderPipeline) -> Vec<BlockEnvelope> {
        let mut blocks = Vec::new();
        while let Some(block) = pipeline.next_block().await.unwrap() {
            blocks.push(block);
        }
        blocks
    }

    #[tokio::test]
    async fn test_replay_produces_linked_stream() {
        let lines = vec![
            wire_line(&trace(7, "t1")),
            wire_line(&trace(7, "t2")),
            wire_line(&trace(10, "t3")),
            live_marker_line(),
            wire_line(&trace(11, "t4")),
        ];
        let mut pipeline = ReaderPipeline::start(&RuntimeConfig::for_testing(), source(&lines)).unwrap();

        let blocks = drain(&mut pipeline).await;
        let numbers: Vec<_> = blocks.iter().map(BlockEnvelope::block_number).collect();
        assert_eq!(numbers, vec![7, 8, 9, 10]);
        assert_eq!(blocks[0].block.actions.len(), 2);
        assert_eq!(blocks[0].block.actions[1].payload.transaction_id, "t2");
        assert_eq!(blocks[0].block.actions[0].action_type, "eosio.token::transfer");
        assert_eq!(blocks[2].block_hash(), block_id(9));
        assert_eq!(blocks[3].block.previous_block_hash(), block_id(9));

        let reader = pipeline.reader();
        // Block 10 was queued after the live marker, so the head is not offset.
        assert_eq!(reader.watermarks().head_block_number, 10);

        let summary = pipeline.join().await.unwrap();
        assert_eq!(summary.events, 5);
        assert_eq!(summary.cursor, "cursor-t4");
    }

    #[tokio::test]
    async fn test_replay_resumes_after_cursor() {
        let lines = vec![
            wire_line(&trace(1, "t1")),
            wire_line(&trace(2, "t2")),
            wire_line(&trace(4, "t3")),
            wire_line(&trace(5, "t4")),
        ];
        let config = RuntimeConfig {
            cursor: "cursor-t2".to_string(),
            ..RuntimeConfig::for_testing()
        };
        let mut pipeline = ReaderPipeline::start(&config, source(&lines)).unwrap();

        let numbers: Vec<_> = drain(&mut pipeline)
            .await
            .iter()
            .map(BlockEnvelope::block_number)
            .collect();
        assert_eq!(numbers, vec![4]);
        assert!(pipeline.join().await.is_ok());
    }

    #[tokio::test]
    async fn test_replay_rollback_without_seek_is_skipped() {
        let lines = vec![
            wire_line(&trace(3, "t1")),
            wire_line(&undo_trace(3, "t2")),
            wire_line(&trace(4, "t3")),
            wire_line(&trace(5, "t4")),
        ];
        let mut pipeline = ReaderPipeline::start(&RuntimeConfig::for_testing(), source(&lines)).unwrap();

        // Without a seek, the rollback of block 3 is skipped as stale.
        let blocks = drain(&mut pipeline).await;
        let numbers: Vec<_> = blocks.iter().map(BlockEnvelope::block_number).collect();
        assert_eq!(numbers, vec![3, 4]);
        assert!(blocks.iter().all(|b| !b.meta.is_rollback));
    }

    #[tokio::test]
    async fn test_malformed_line_fails_pipeline() {
        let lines = vec![
            wire_line(&trace(3, "t1")),
            "{\"undo\": tru".to_string(),
            wire_line(&trace(4, "t2")),
        ];
        let mut pipeline = ReaderPipeline::start(&RuntimeConfig::for_testing(), source(&lines)).unwrap();

        assert!(drain(&mut pipeline).await.is_empty());
        assert!(matches!(
            pipeline.join().await,
            Err(PipelineError::Transport(_))
        ));
    }
}
