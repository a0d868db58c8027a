//! Query executor trait

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use std::sync::Arc;

/// Executes a GraphQL query document and returns the response `data`
///
/// Implementations own transport, authentication and retry policy. The
/// variables map is sent as-is: a key that is absent is not sent at all.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `query` with `variables`
    async fn execute(&self, query: &str, variables: &JsonObject) -> Result<JsonValue>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    async fn execute(&self, query: &str, variables: &JsonObject) -> Result<JsonValue> {
        (**self).execute(query, variables).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(&self, query: &str, variables: &JsonObject) -> Result<JsonValue> {
        (**self).execute(query, variables).await
    }
}
