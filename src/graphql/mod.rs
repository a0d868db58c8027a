//! GraphQL execution
//!
//! [`QueryExecutor`] is the seam between the traversal core and the network:
//! it takes a query document plus variables and returns the `data` object of
//! the response. [`GraphQlClient`] is the HTTP implementation used by the CLI.

mod client;
mod executor;
mod types;

pub use client::GraphQlClient;
pub use executor::QueryExecutor;
pub use types::{GraphQlError, GraphQlRequest, GraphQlResponse};
