//! GraphQL wire types

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a GraphQL HTTP request
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    /// Query document
    pub query: &'a str,
    /// Bound variables
    pub variables: &'a JsonObject,
}

/// Envelope of a GraphQL HTTP response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    /// Result data, absent when the whole operation failed
    #[serde(default)]
    pub data: Option<JsonValue>,
    /// Errors reported by the server
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Extract `data`, failing if the server reported any errors
    pub fn into_data(self) -> Result<JsonValue> {
        if !self.errors.is_empty() {
            return Err(Error::GraphQl(self.errors));
        }
        match self.data {
            Some(JsonValue::Null) | None => Err(Error::decode("response contains no data")),
            Some(data) => Ok(data),
        }
    }
}

/// A single error entry from a GraphQL response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message
    pub message: String,
    /// Path of the response field that failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<JsonValue>>,
    /// Server-specific extra information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonValue>,
}

impl GraphQlError {
    /// Create an error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    /// Set the response path
    #[must_use]
    pub fn with_path(mut self, path: Vec<JsonValue>) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.as_ref().map_or_else(
            || "unknown".to_string(),
            |segments| {
                segments
                    .iter()
                    .map(|segment| match segment {
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("::")
            },
        );
        write!(f, "‣ [{path}] {}", self.message)
    }
}
