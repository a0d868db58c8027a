//! Connection traversal
//!
//! Drives a [`PageFetcher`] from the first page to the last, one request at a
//! time. The cursor for page N+1 comes from page N, so nothing is prefetched.
//!
//! Every failure is terminal: the traversal stops, and whatever was
//! accumulated is dropped rather than handed out as if it were complete.

use super::aggregator::ResultAggregator;
use super::cancel::CancelSignal;
use super::fetcher::PageFetcher;
use super::types::{Connection, NodeStream, Page, TraversalOptions, TraversalPhase};
use crate::config::ConnectionQuery;
use crate::error::{Error, Result};
use crate::graphql::QueryExecutor;
use crate::types::{Cursor, Metadata, Node, PageSize};
use tracing::{debug, trace};

/// Cursor bookkeeping for one traversal
#[derive(Debug, Clone)]
pub struct TraversalState {
    phase: TraversalPhase,
    cursor: Option<Cursor>,
    pages_fetched: u32,
}

impl TraversalState {
    /// Fresh state, optionally resuming after `start`
    pub fn new(start: Option<Cursor>) -> Self {
        Self {
            phase: TraversalPhase::NotStarted,
            cursor: start,
            pages_fetched: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> TraversalPhase {
        self.phase
    }

    /// Cursor the next page will be requested after
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Successful fetches so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Whether the traversal reached a terminal phase
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, TraversalPhase::Done | TraversalPhase::Failed)
    }

    fn begin_fetch(&mut self, options: &TraversalOptions, cancel: &CancelSignal) -> Result<()> {
        if cancel.is_cancelled() {
            self.fail();
            return Err(Error::Cancelled);
        }
        if let Some(max_pages) = options.max_pages {
            if self.pages_fetched >= max_pages {
                self.fail();
                return Err(Error::PageLimitExceeded { max_pages });
            }
        }
        self.set_phase(TraversalPhase::Fetching);
        Ok(())
    }

    fn advance(&mut self, page: &Page) -> Result<()> {
        self.pages_fetched += 1;

        if !page.has_next {
            self.set_phase(TraversalPhase::Done);
            return Ok(());
        }

        match page.end_cursor() {
            Some(cursor) => {
                self.cursor = Some(cursor.clone());
                Ok(())
            }
            None => {
                self.fail();
                Err(Error::protocol(format!(
                    "page {} has hasNextPage set but no edge cursor to continue from",
                    self.pages_fetched
                )))
            }
        }
    }

    fn fail(&mut self) {
        self.set_phase(TraversalPhase::Failed);
    }

    fn set_phase(&mut self, phase: TraversalPhase) {
        if self.phase != phase {
            trace!(from = %self.phase, to = %phase, "traversal phase");
            self.phase = phase;
        }
    }
}

/// Enumerates every node of a connection
#[derive(Debug)]
pub struct ConnectionTraverser<E> {
    fetcher: PageFetcher<E>,
    options: TraversalOptions,
    cancel: CancelSignal,
}

impl<E: QueryExecutor> ConnectionTraverser<E> {
    /// Create a traverser around a fetcher
    pub fn new(fetcher: PageFetcher<E>) -> Self {
        Self {
            fetcher,
            options: TraversalOptions::default(),
            cancel: CancelSignal::never(),
        }
    }

    /// Create a traverser for a query definition
    pub fn for_query(executor: E, query: ConnectionQuery) -> Result<Self> {
        Ok(Self::new(PageFetcher::new(executor, query)?))
    }

    /// Set traversal options
    #[must_use]
    pub fn with_options(mut self, options: TraversalOptions) -> Self {
        self.options = options;
        self
    }

    /// Observe a cancellation signal
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &PageFetcher<E> {
        &self.fetcher
    }

    /// Traversal options
    pub fn options(&self) -> &TraversalOptions {
        &self.options
    }

    /// Fetch every page and return all nodes with the first page's metadata
    pub async fn traverse_all(&self, page_size: PageSize) -> Result<Connection> {
        let mut state = TraversalState::new(self.options.start_cursor.clone());
        let mut results = ResultAggregator::new();

        while !state.is_finished() {
            let page = self.next_page(&mut state, page_size).await?;
            results.append(page);
        }

        debug!(
            connection = %self.fetcher.query().name,
            pages = results.pages(),
            nodes = results.len(),
            "traversal complete"
        );
        Ok(results.into_connection())
    }

    /// Stream nodes, fetching pages only as the stream is polled.
    ///
    /// The stream yields at most one error, after which it ends.
    pub fn traverse(&self, page_size: PageSize) -> NodeStream<'_> {
        let state = TraversalState::new(self.options.start_cursor.clone());
        self.stream_from(state, Vec::new(), page_size)
    }

    /// Fetch the first page now and stream the rest.
    ///
    /// Returns the first page's metadata together with a stream over every
    /// node of the connection, first page included.
    pub async fn traverse_with_metadata(
        &self,
        page_size: PageSize,
    ) -> Result<(Option<Metadata>, NodeStream<'_>)> {
        let mut state = TraversalState::new(self.options.start_cursor.clone());
        let first = self.next_page(&mut state, page_size).await?;
        let stream = self.stream_from(state, first.nodes, page_size);
        Ok((first.metadata, stream))
    }

    fn stream_from(
        &self,
        state: TraversalState,
        buffered: Vec<Node>,
        page_size: PageSize,
    ) -> NodeStream<'_> {
        let seed = (state, buffered.into_iter());

        Box::pin(futures::stream::unfold(
            seed,
            move |(mut state, mut buffer)| async move {
                loop {
                    if let Some(node) = buffer.next() {
                        return Some((Ok(node), (state, buffer)));
                    }
                    if state.is_finished() {
                        return None;
                    }
                    match self.next_page(&mut state, page_size).await {
                        Ok(page) => buffer = page.nodes.into_iter(),
                        Err(e) => return Some((Err(e), (state, buffer))),
                    }
                }
            },
        ))
    }

    async fn next_page(&self, state: &mut TraversalState, page_size: PageSize) -> Result<Page> {
        state.begin_fetch(&self.options, &self.cancel)?;

        let fetched = self.fetcher.fetch(state.cursor(), page_size).await;
        let page = fetched.map_err(|e| {
            state.fail();
            e
        })?;

        state.advance(&page)?;
        Ok(page)
    }
}
