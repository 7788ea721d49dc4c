//! Stream runner
//!
//! Drives windows × pages × mapper for one stream and hands out records one
//! at a time. At most one page of nodes is held in memory.

use crate::decode::RawNode;
use crate::error::Result;
use crate::pagination::{ApiSource, PageFetcher};
use crate::streams::StreamDefinition;
use crate::types::JsonObject;
use crate::window::{windows, Windows};
use chrono::{DateTime, Utc};
use futures::Stream;
use tracing::debug;

/// Pull-based record producer for a single stream
#[derive(Debug)]
pub struct StreamRunner<'a> {
    source: &'a ApiSource,
    stream: &'a StreamDefinition,
    windows: Windows,
    fetcher: Option<PageFetcher<'a>>,
    buffer: std::vec::IntoIter<RawNode>,
    failed: bool,
    windows_started: usize,
    pages: usize,
    records: usize,
}

impl<'a> StreamRunner<'a> {
    /// Create a runner covering `start_date` through the day containing `now`.
    ///
    /// Fails if `start_date` is not a valid date.
    pub fn new(
        source: &'a ApiSource,
        stream: &'a StreamDefinition,
        start_date: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            source,
            stream,
            windows: windows(start_date, now)?,
            fetcher: None,
            buffer: Vec::new().into_iter(),
            failed: false,
            windows_started: 0,
            pages: 0,
            records: 0,
        })
    }

    /// Stream being run
    pub fn stream(&self) -> &StreamDefinition {
        self.stream
    }

    /// Windows started so far
    pub fn windows_started(&self) -> usize {
        self.windows_started
    }

    /// Pages received so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Records produced so far
    pub fn records_produced(&self) -> usize {
        self.records
    }

    /// Produce the next record, or `None` once every window is exhausted.
    ///
    /// The first error ends the run; later calls return `None`.
    pub async fn next_record(&mut self) -> Result<Option<JsonObject>> {
        if self.failed {
            return Ok(None);
        }
        match self.advance().await {
            Ok(record) => Ok(record),
            Err(e) => {
                self.failed = true;
                self.fetcher = None;
                self.buffer = Vec::new().into_iter();
                Err(e)
            }
        }
    }

    async fn advance(&mut self) -> Result<Option<JsonObject>> {
        loop {
            if let Some(node) = self.buffer.next() {
                let record = self.stream.map(&node)?;
                self.records += 1;
                return Ok(Some(record));
            }

            if let Some(fetcher) = self.fetcher.as_mut() {
                match fetcher.next_page().await? {
                    Some(page) => {
                        self.pages += 1;
                        self.buffer = page.nodes.into_iter();
                        continue;
                    }
                    None => self.fetcher = None,
                }
            }

            let Some(window) = self.windows.next() else {
                return Ok(None);
            };
            debug!("{}: window {window}", self.stream.id);
            self.windows_started += 1;
            self.fetcher = Some(self.source.fetch_pages(
                self.stream.query_template,
                self.stream.root_path,
                &window,
            ));
        }
    }

    /// Adapt the runner into a `futures::Stream` of records
    pub fn into_stream(self) -> impl Stream<Item = Result<JsonObject>> + 'a {
        futures::stream::try_unfold(self, |mut runner| async move {
            Ok(runner.next_record().await?.map(|record| (record, runner)))
        })
    }
}
