//! Pagination module
//!
//! Cursor-based traversal of Relay-style connections.
//!
//! # Overview
//!
//! - [`PageFetcher`] runs one page of a [`ConnectionQuery`](crate::config::ConnectionQuery)
//!   and decodes it into a [`Page`]
//! - [`ConnectionTraverser`] walks the connection page by page, either eagerly
//!   ([`traverse_all`](ConnectionTraverser::traverse_all)) or as a lazy
//!   [`NodeStream`] ([`traverse`](ConnectionTraverser::traverse))
//! - [`ResultAggregator`] accumulates nodes and first-page metadata
//! - [`CancelHandle`] / [`CancelSignal`] stop a traversal at the next page
//!   boundary

mod aggregator;
mod cancel;
mod fetcher;
mod traverser;
mod types;

pub use aggregator::ResultAggregator;
pub use cancel::{CancelHandle, CancelSignal};
pub use fetcher::PageFetcher;
pub use traverser::{ConnectionTraverser, TraversalState};
pub use types::{Connection, NodeStream, Page, TraversalOptions, TraversalPhase};
