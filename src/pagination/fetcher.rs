//! Single-page fetch and decode

use super::types::Page;
use crate::config::ConnectionQuery;
use crate::error::{Error, Result};
use crate::graphql::QueryExecutor;
use crate::types::{Cursor, JsonObject, JsonValue, Metadata, Node, PageSize};
use serde_json::json;
use tracing::debug;

/// Runs one page of a [`ConnectionQuery`] through a [`QueryExecutor`]
#[derive(Debug, Clone)]
pub struct PageFetcher<E> {
    executor: E,
    query: ConnectionQuery,
}

impl<E: QueryExecutor> PageFetcher<E> {
    /// Create a fetcher, validating the query definition
    pub fn new(executor: E, query: ConnectionQuery) -> Result<Self> {
        query.validate()?;
        Ok(Self { executor, query })
    }

    /// The query definition
    pub fn query(&self) -> &ConnectionQuery {
        &self.query
    }

    /// The executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch the page after `cursor` (or the first page when `None`)
    pub async fn fetch(&self, cursor: Option<&Cursor>, page_size: PageSize) -> Result<Page> {
        let variables = self.variables(cursor, page_size);
        let data = self.executor.execute(&self.query.query, &variables).await?;
        let page = self.decode_page(&data)?;

        debug!(
            connection = %self.query.name,
            cursor = cursor.map(Cursor::as_str),
            nodes = page.len(),
            has_next = page.has_next,
            "fetched page"
        );
        Ok(page)
    }

    /// Variables for one request. The cursor variable is left out entirely
    /// when there is no cursor.
    pub fn variables(&self, cursor: Option<&Cursor>, page_size: PageSize) -> JsonObject {
        let mut variables = self.query.variables.clone();
        variables.insert(
            self.query.page_size_variable.clone(),
            json!(page_size.get()),
        );
        match cursor {
            Some(cursor) => {
                variables.insert(self.query.cursor_variable.clone(), json!(cursor.as_str()));
            }
            None => {
                variables.remove(&self.query.cursor_variable);
            }
        }
        variables
    }

    /// Decode a response `data` object into a [`Page`]
    pub fn decode_page(&self, data: &JsonValue) -> Result<Page> {
        let path = &self.query.connection_path;
        let connection = lookup(data, path)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::decode(format!("response is missing `{path}`")))?
            .as_object()
            .ok_or_else(|| Error::decode(format!("`{path}` is not an object")))?;

        let edges = match connection.get("edges") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Array(edges)) => Some(edges),
            Some(_) => return Err(Error::decode(format!("`{path}.edges` is not a list"))),
        };

        let cursors = edges
            .map(|edges| {
                edges
                    .iter()
                    .enumerate()
                    .map(|(i, edge)| match edge.get("cursor") {
                        Some(JsonValue::String(cursor)) => Ok(Cursor::new(cursor.as_str())),
                        _ => Err(Error::decode(format!(
                            "`{path}.edges[{i}].cursor` is missing or not a string"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        let nodes: Vec<Node> = match (connection.get("nodes"), edges) {
            (Some(JsonValue::Array(nodes)), _) => nodes.clone(),
            (Some(JsonValue::Null) | None, Some(edges)) => edges
                .iter()
                .enumerate()
                .map(|(i, edge)| {
                    edge.get("node").cloned().ok_or_else(|| {
                        Error::decode(format!("`{path}.edges[{i}].node` is missing"))
                    })
                })
                .collect::<Result<_>>()?,
            (Some(JsonValue::Null) | None, None) => {
                return Err(Error::decode(format!(
                    "`{path}` has neither `nodes` nor `edges`"
                )))
            }
            (Some(_), _) => return Err(Error::decode(format!("`{path}.nodes` is not a list"))),
        };

        if edges.is_some() && cursors.len() != nodes.len() {
            return Err(Error::protocol(format!(
                "`{path}` returned {} edges for {} nodes",
                cursors.len(),
                nodes.len()
            )));
        }

        let has_next = connection
            .get("pageInfo")
            .and_then(|info| info.get("hasNextPage"))
            .and_then(JsonValue::as_bool)
            .ok_or_else(|| {
                Error::decode(format!(
                    "`{path}.pageInfo.hasNextPage` is missing or not a boolean"
                ))
            })?;

        Ok(Page {
            nodes,
            cursors,
            has_next,
            metadata: self.decode_metadata(data),
        })
    }

    fn decode_metadata(&self, data: &JsonValue) -> Option<Metadata> {
        let metadata: Metadata = self
            .query
            .metadata
            .iter()
            .filter_map(|(field, path)| {
                lookup(data, path)
                    .filter(|v| !v.is_null())
                    .map(|v| (field.clone(), v.clone()))
            })
            .collect();

        (!metadata.is_empty()).then_some(metadata)
    }
}

/// Follow a dot-separated path through nested objects
fn lookup<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.').try_fold(value, |current, key| match current {
        JsonValue::Object(map) => map.get(key),
        _ => None,
    })
}
