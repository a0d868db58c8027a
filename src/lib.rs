// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # relay-pager
//!
//! Cursor-based traversal of Relay-style GraphQL connections.
//!
//! A connection is described once by a [`ConnectionQuery`](config::ConnectionQuery):
//! the query text, where the connection sits in the response, which variables
//! carry the cursor and page size, and which top-level values to keep as
//! metadata. A [`ConnectionTraverser`](pagination::ConnectionTraverser) then
//! walks it page by page until the server reports no further pages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_pager::{auth::Credentials, config, graphql::GraphQlClient};
//! use relay_pager::pagination::ConnectionTraverser;
//! use relay_pager::{PageSize, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = GraphQlClient::new(Credentials::resolve(None, None)?)?;
//!     let query = config::load_connection("devices")?;
//!
//!     let devices = ConnectionTraverser::for_query(client, query)?
//!         .traverse_all(PageSize::DEFAULT)
//!         .await?;
//!
//!     println!("{} devices", devices.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ConnectionTraverser   traverse_all() / traverse() (stream)  │
//! │      TraversalState ── ResultAggregator ── CancelSignal      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//!                ┌───────────────┴──────────────┐
//!                │ PageFetcher (variables,      │
//!                │ decode_page, metadata)       │
//!                └───────────────┬──────────────┘
//!                                │ QueryExecutor
//! ┌──────────────┬───────────────┴──────┬────────────────────────┐
//! │ Credentials  │ GraphQlClient        │ HttpClient             │
//! │ bearer token │ errors → GraphQl/Auth│ retry, backoff, limits │
//! └──────────────┴──────────────────────┴────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API credentials
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// GraphQL-over-HTTP execution
pub mod graphql;

/// Connection traversal
pub mod pagination;

/// Connection definitions
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_connection, load_connection_from_str, ConnectionQuery};
pub use graphql::{GraphQlClient, QueryExecutor};
pub use pagination::{CancelHandle, Connection, ConnectionTraverser, NodeStream, PageFetcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
