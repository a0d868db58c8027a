//! Credential resolution

use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::fmt;
use url::Url;

/// Default endpoint for the forged.dev API
pub const DEFAULT_API_URL: &str = "https://api.forged.dev";

/// Environment variable probed for the API token
pub const ENV_API_TOKEN: &str = "FORGED_API_TOKEN";

/// Environment variable probed for the API endpoint
pub const ENV_API_URL: &str = "FORGED_API_URL";

/// Endpoint and bearer token for a GraphQL API
#[derive(Clone)]
pub struct Credentials {
    endpoint: Url,
    token: String,
}

impl Credentials {
    /// Create credentials from an endpoint URL and token
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::auth("API token is empty"));
        }
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            token,
        })
    }

    /// Resolve credentials from explicit values, falling back to the process
    /// environment
    pub fn resolve(token: Option<String>, endpoint: Option<String>) -> Result<Self> {
        Self::resolve_with(token, endpoint, |key| std::env::var(key).ok())
    }

    /// Resolve credentials using a custom environment lookup
    pub fn resolve_with<F>(token: Option<String>, endpoint: Option<String>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| env(ENV_API_TOKEN).filter(|t| !t.is_empty()))
            .ok_or_else(|| {
                Error::auth(format!(
                    "no API token provided (use --token or set {ENV_API_TOKEN})"
                ))
            })?;

        let endpoint = endpoint
            .filter(|u| !u.is_empty())
            .or_else(|| env(ENV_API_URL).filter(|u| !u.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::new(&endpoint, token)
    }

    /// The API endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Attach the bearer token to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"***")
            .finish()
    }
}
