//! Page fetcher
//!
//! Issues one request per page for a single window and stream. Memory is
//! bounded by the page currently held by the caller.

use super::types::PageState;
use crate::decode::{extract_page, Page};
use crate::error::{Error, Result};
use crate::http::{Endpoint, RequestThrottle, Transport};
use crate::template::{self, TemplateContext};
use crate::types::JsonValue;
use crate::window::Window;
use std::sync::Arc;
use tracing::debug;

/// Everything needed to talk to the remote API
#[derive(Clone)]
pub struct ApiSource {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    throttle: RequestThrottle,
    vars: TemplateContext,
}

impl ApiSource {
    /// Create a source
    pub fn new(transport: Arc<dyn Transport>, endpoint: Endpoint) -> Self {
        Self {
            transport,
            endpoint,
            throttle: RequestThrottle::default(),
            vars: TemplateContext::new(),
        }
    }

    /// Set the inter-request throttle
    #[must_use]
    pub fn with_throttle(mut self, throttle: RequestThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Set static template variables (e.g. `app_id`)
    #[must_use]
    pub fn with_vars(mut self, vars: TemplateContext) -> Self {
        self.vars = vars;
        self
    }

    /// Static template variables
    pub fn vars(&self) -> &TemplateContext {
        &self.vars
    }

    /// Endpoint requests go to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Start fetching pages for one window
    pub fn fetch_pages<'a>(
        &'a self,
        query: &'a str,
        root_path: &'a str,
        window: &Window,
    ) -> PageFetcher<'a> {
        PageFetcher::new(self, query, root_path, window)
    }
}

impl std::fmt::Debug for ApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSource")
            .field("endpoint", &self.endpoint)
            .field("throttle", &self.throttle)
            .field("vars", &self.vars)
            .finish_non_exhaustive()
    }
}

/// Pull-based page iterator for one window
#[derive(Debug)]
pub struct PageFetcher<'a> {
    source: &'a ApiSource,
    query: &'a str,
    root_path: &'a str,
    context: TemplateContext,
    state: PageState,
    pages: usize,
}

impl<'a> PageFetcher<'a> {
    /// Create a fetcher positioned before the first page
    pub fn new(source: &'a ApiSource, query: &'a str, root_path: &'a str, window: &Window) -> Self {
        let mut context = source.vars.clone();
        context.set_window(window);
        Self {
            source,
            query,
            root_path,
            context,
            state: PageState::default(),
            pages: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Whether pagination is finished
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Number of requests issued so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Fetch the next page, or `None` once pagination is finished.
    ///
    /// Any failure leaves the fetcher in `Done`.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        let cursor = match std::mem::replace(&mut self.state, PageState::Done) {
            PageState::Fetching(position) => position.cursor,
            PageState::Done => return Ok(None),
        };

        self.context.set_cursor(&cursor);
        let body = template::render(self.query, &self.context)?;

        self.source.throttle.wait().await;
        let response = self
            .source
            .transport
            .post(self.source.endpoint.url(), self.source.endpoint.headers(), body)
            .await?;
        self.pages += 1;

        if !response.is_success() {
            return Err(Error::remote_request(response.status, response.body));
        }

        let json: JsonValue = serde_json::from_str(&response.body)?;
        let page = extract_page(&json, self.root_path)?;
        self.state = PageState::after(&page);

        debug!(
            "Page {} (cursor {:?}): {} edges, has_next={}",
            self.pages,
            cursor,
            page.len(),
            page.has_next
        );

        Ok(Some(page))
    }
}
