//! Accumulation of traversal results

use super::types::{Connection, Page};
use crate::types::{Metadata, Node};

/// Append-only store for the nodes of one traversal.
///
/// Metadata is taken from the first appended page and never replaced.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    nodes: Vec<Node>,
    metadata: Option<Metadata>,
    pages: usize,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next page, in traversal order
    pub fn append(&mut self, page: Page) {
        if self.pages == 0 {
            self.metadata = page.metadata;
        }
        self.nodes.extend(page.nodes);
        self.pages += 1;
    }

    /// Nodes accumulated so far
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Metadata captured from the first page
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Number of pages appended
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Number of nodes accumulated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes have been accumulated
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Copy of the current result
    pub fn snapshot(&self) -> Connection {
        Connection {
            metadata: self.metadata.clone(),
            nodes: self.nodes.clone(),
        }
    }

    /// Consume into the final result
    pub fn into_connection(self) -> Connection {
        Connection {
            metadata: self.metadata,
            nodes: self.nodes,
        }
    }
}
