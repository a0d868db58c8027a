//! Error types for relay-pager
//!
//! Every public API returns `Result<T, Error>`. Each variant belongs to one
//! [`ErrorKind`], which is what callers match on when they only care about
//! the class of failure (auth, transport, decode, protocol, cancellation).

use std::fmt;
use thiserror::Error;

/// The main error type for relay-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid connection definition or CLI setting
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Page size of zero or larger than `u32::MAX`
    #[error("Page size must be a positive integer, got {value}")]
    InvalidPageSize {
        /// The rejected value
        value: u64,
    },

    /// Connection definition is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Reading a definition file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Endpoint is not a valid absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Missing token, or the API rejected it
    #[error("Authentication failed: {message}")]
    Auth {
        /// Reason
        message: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// reqwest failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// 429 from the server
    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited {
        /// Value of `Retry-After`
        retry_after_seconds: u64,
    },

    /// Request took longer than the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    // ============================================================================
    // Response Errors
    // ============================================================================
    /// Response did not have the expected shape
    #[error("Failed to decode response: {message}")]
    Decode {
        /// What was missing or mistyped
        message: String,
    },

    /// Body was not valid JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The server reported query errors
    #[error("The GraphQL server returned errors:\n{}", DisplayGraphQlErrors(.0))]
    GraphQl(Vec<crate::graphql::GraphQlError>),

    /// The connection contract was broken
    #[error("Protocol violation: {message}")]
    Protocol {
        /// Which rule was broken
        message: String,
    },

    /// More pages were needed than the configured bound allows
    #[error("Traversal exceeded the limit of {max_pages} pages")]
    PageLimitExceeded {
        /// The bound
        max_pages: u32,
    },

    // ============================================================================
    // Outcomes
    // ============================================================================
    /// Cancellation was observed before a fetch
    #[error("Traversal cancelled")]
    Cancelled,

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Free-form error, usually with added context
    #[error("{0}")]
    Other(String),

    /// Error from glue code
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential missing or rejected
    Auth,
    /// Network-level failure or unexpected HTTP status
    Transport,
    /// Response did not have the expected shape
    Decode,
    /// Server response violated the connection contract
    Protocol,
    /// Traversal was cancelled at a page boundary
    Cancelled,
    /// Local configuration problem
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth { .. } => ErrorKind::Auth,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::RateLimited { .. }
            | Error::Timeout { .. } => ErrorKind::Transport,
            Error::Decode { .. } | Error::JsonParse(_) => ErrorKind::Decode,
            Error::Protocol { .. } | Error::GraphQl(_) | Error::PageLimitExceeded { .. } => {
                ErrorKind::Protocol
            }
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Config { .. }
            | Error::InvalidPageSize { .. }
            | Error::YamlParse(_)
            | Error::Io(_)
            | Error::InvalidUrl(_) => ErrorKind::Config,
            Error::Other(_) | Error::Anyhow(_) => ErrorKind::Other,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

struct DisplayGraphQlErrors<'a>(&'a [crate::graphql::GraphQlError]);

impl fmt::Display for DisplayGraphQlErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Result type alias for relay-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphQlError;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::protocol("hasNextPage without cursor");
        assert_eq!(
            err.to_string(),
            "Protocol violation: hasNextPage without cursor"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        assert_eq!(Error::Cancelled.to_string(), "Traversal cancelled");
    }

    #[test]
    fn test_graphql_error_display() {
        let err = Error::GraphQl(vec![
            GraphQlError::new("not allowed").with_path(vec!["currentProvisioner".into()]),
            GraphQlError::new("boom"),
        ]);
        assert_eq!(
            err.to_string(),
            "The GraphQL server returned errors:\n‣ [currentProvisioner] not allowed\n‣ [unknown] boom"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::auth("no token").kind(), ErrorKind::Auth);
        assert_eq!(Error::http_status(500, "").kind(), ErrorKind::Transport);
        assert_eq!(Error::Timeout { timeout_ms: 10 }.kind(), ErrorKind::Transport);
        assert_eq!(Error::decode("missing nodes").kind(), ErrorKind::Decode);
        assert_eq!(Error::protocol("no cursor").kind(), ErrorKind::Protocol);
        assert_eq!(
            Error::PageLimitExceeded { max_pages: 3 }.kind(),
            ErrorKind::Protocol
        );
        assert_eq!(Error::GraphQl(vec![]).kind(), ErrorKind::Protocol);
        assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(Error::InvalidPageSize { value: 0 }.kind(), ErrorKind::Config);
        assert_eq!(
            Error::from(url::Url::parse("").unwrap_err()).kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::http_status(401, "").is_retryable());
        assert!(!Error::decode("bad").is_retryable());
        assert!(!Error::protocol("bad").is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
