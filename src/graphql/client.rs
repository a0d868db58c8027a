//! HTTP GraphQL client

use super::executor::QueryExecutor;
use super::types::{GraphQlRequest, GraphQlResponse};
use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use tracing::trace;

/// GraphQL-over-HTTP executor authenticated with a bearer token
#[derive(Debug)]
pub struct GraphQlClient {
    http: HttpClient,
    credentials: Credentials,
}

impl GraphQlClient {
    /// Create a client with the default HTTP configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, HttpClientConfig::default())
    }

    /// Create a client with a custom HTTP configuration
    pub fn with_config(credentials: Credentials, config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(config)?,
            credentials,
        })
    }

    /// The credentials this client authenticates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[async_trait]
impl QueryExecutor for GraphQlClient {
    async fn execute(&self, query: &str, variables: &JsonObject) -> Result<JsonValue> {
        let body = serde_json::to_value(GraphQlRequest { query, variables })?;
        trace!(variables = %JsonValue::Object(variables.clone()), "executing query");

        let response = match self
            .http
            .post_json(self.credentials.endpoint(), &body, Some(&self.credentials))
            .await
        {
            Ok(response) => response,
            Err(Error::HttpStatus { status, .. }) if matches!(status, 401 | 403) => {
                return Err(Error::auth(format!(
                    "the API rejected the token (HTTP {status})"
                )));
            }
            Err(Error::HttpStatus { status, body }) => {
                // Some servers report query errors with a non-2xx status.
                if let Ok(parsed) = serde_json::from_str::<GraphQlResponse>(&body) {
                    if !parsed.errors.is_empty() {
                        return Err(Error::GraphQl(parsed.errors));
                    }
                }
                return Err(Error::HttpStatus { status, body });
            }
            Err(e) => return Err(e),
        };

        let text = response.text().await?;
        let parsed: GraphQlResponse = serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("response is not a GraphQL document: {e}")))?;
        parsed.into_data()
    }
}
