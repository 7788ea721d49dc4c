//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `StreamRunner` - Lazy record producer for one stream
//! - `SyncEngine` - Runs selected streams in order, emitting records and checkpoints
//! - `SyncConfig` / `SyncStats` - Run settings and counters
//!
//! Streams run strictly one after another with one request in flight. The
//! first error aborts the whole run; checkpoints already written stay valid.

mod runner;
mod types;

pub use runner::StreamRunner;
pub use types::{SyncConfig, SyncStats};

use crate::error::Result;
use crate::output::{Message, MessageSink};
use crate::pagination::ApiSource;
use crate::state::StateStore;
use crate::streams::StreamDefinition;
use std::time::Instant;
use tracing::{info, warn};

/// Sync engine for orchestrating data extraction
#[derive(Debug)]
pub struct SyncEngine<S: MessageSink> {
    /// Remote API access
    source: ApiSource,
    /// State store
    state: StateStore,
    /// Where messages go
    sink: S,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl<S: MessageSink> SyncEngine<S> {
    /// Create a new sync engine
    pub fn new(source: ApiSource, state: StateStore, sink: S, config: SyncConfig) -> Self {
        Self {
            source,
            state,
            sink,
            config,
            stats: SyncStats::default(),
        }
    }

    /// Get the state store
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// Get the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Consume the engine, returning the state store and sink
    pub fn into_parts(self) -> (StateStore, S) {
        (self.state, self.sink)
    }

    /// Sync every given stream in order.
    ///
    /// Stops at the first error, persisting the state with the in-progress
    /// marker cleared. After the last stream the cleared state is persisted
    /// and emitted once more.
    pub async fn sync_all(&mut self, streams: &[StreamDefinition]) -> Result<SyncStats> {
        let start = Instant::now();
        info!("Sync: {} stream(s)", streams.len());

        for stream in streams {
            if let Err(e) = self.sync_stream(stream).await {
                warn!("Stream {} aborted: {e}", stream.id);
                self.state.clear_currently_syncing();
                if let Err(save_err) = self.state.save().await {
                    warn!("Could not persist state after abort: {save_err}");
                }
                return Err(e);
            }
        }

        self.state.clear_currently_syncing();
        self.state.save().await?;
        self.sink.emit(&Message::state(self.state.to_value()?))?;

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Sync complete: {} records, {} pages, {} checkpoints in {}ms",
            self.stats.records_synced,
            self.stats.pages_fetched,
            self.stats.checkpoints,
            self.stats.duration_ms
        );
        Ok(self.stats.clone())
    }

    /// Sync one stream: SCHEMA first, then each record, checkpointing after
    /// every record that carries a replication value. Returns the record count.
    pub async fn sync_stream(&mut self, stream: &StreamDefinition) -> Result<usize> {
        info!("Syncing stream: {}", stream.id);
        self.state.set_currently_syncing(stream.id);
        self.sink.emit(&Message::schema(
            stream.id,
            stream.schema()?,
            stream.key_properties.iter().copied(),
            [stream.replication_key],
        ))?;

        let stream_state = self.state.stream_state(stream.id, &self.config.start_date);
        let start_date = stream_state
            .start_date
            .unwrap_or_else(|| self.config.start_date.clone());
        info!("Stream {} starts at {start_date}", stream.id);

        let mut runner = StreamRunner::new(&self.source, stream, &start_date, self.config.now())?;
        let outcome = Self::drain(&mut runner, &mut self.state, &mut self.sink, &mut self.stats).await;

        self.stats.pages_fetched += runner.pages_fetched();
        self.stats.windows_processed += runner.windows_started();
        let count = runner.records_produced();
        outcome?;

        self.state.clear_currently_syncing();
        self.stats.add_stream();
        info!(
            "Completed stream {}: {count} records in {} windows",
            stream.id,
            runner.windows_started()
        );
        Ok(count)
    }

    async fn drain(
        runner: &mut StreamRunner<'_>,
        state: &mut StateStore,
        sink: &mut S,
        stats: &mut SyncStats,
    ) -> Result<()> {
        let stream = *runner.stream();
        while let Some(record) = runner.next_record().await? {
            let bookmark = StateStore::propose_bookmark(&stream, &record);
            sink.emit(&Message::record(stream.id, record))?;
            stats.add_record();

            if let Some(value) = bookmark {
                state.apply_bookmark(stream.id, &value).await?;
                sink.emit(&Message::state(state.to_value()?))?;
                stats.add_checkpoint();
            }
        }
        Ok(())
    }
}
