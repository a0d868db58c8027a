//! Pagination types
//!
//! The uniform page shape every fetch is decoded into, the final traversal
//! result and the knobs a traversal can be run with.

use crate::types::{Cursor, JsonValue, Metadata, Node};
use futures::Stream;
use serde::Serialize;
use std::fmt;
use std::pin::Pin;

/// One decoded page of a connection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Nodes in server order
    pub nodes: Vec<Node>,
    /// Edge cursors, aligned with `nodes` when the response has edges
    pub cursors: Vec<Cursor>,
    /// Whether the server has more pages after this one
    pub has_next: bool,
    /// Top-level values captured from this response
    pub metadata: Option<Metadata>,
}

impl Page {
    /// Cursor of the last edge, the continuation point for the next page
    pub fn end_cursor(&self) -> Option<&Cursor> {
        self.cursors.last()
    }

    /// Number of nodes on this page
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether this page has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Every node of a connection plus the metadata of its first page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Connection {
    /// Top-level values captured from the first page
    pub metadata: Option<Metadata>,
    /// All nodes, in server order
    pub nodes: Vec<Node>,
}

impl Connection {
    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the connection has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a metadata field
    pub fn metadata_field(&self, field: &str) -> Option<&JsonValue> {
        self.metadata.as_ref().and_then(|m| m.get(field))
    }
}

/// Lazily produced nodes of a connection
pub type NodeStream<'a> = Pin<Box<dyn Stream<Item = crate::Result<Node>> + Send + 'a>>;

/// Options applied to a whole traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Maximum number of pages to fetch; `None` trusts the server to terminate
    pub max_pages: Option<u32>,
    /// Resume after this cursor instead of starting at the beginning
    pub start_cursor: Option<Cursor>,
}

impl TraversalOptions {
    /// Create default options (unbounded, from the beginning)
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the number of pages fetched
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Start after the given cursor
    #[must_use]
    pub fn with_start_cursor(mut self, cursor: impl Into<Cursor>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }
}

/// Where a traversal is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalPhase {
    /// No page requested yet
    NotStarted,
    /// A page is being fetched, or more pages remain
    Fetching,
    /// The last page has been received
    Done,
    /// Aborted by an error or cancellation
    Failed,
}

impl fmt::Display for TraversalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not_started",
            Self::Fetching => "fetching",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
