//! Authentication module
//!
//! Resolves the API endpoint and provisioner token used by the GraphQL
//! client. Explicit values win over the environment; a missing token is an
//! [`Error::Auth`](crate::Error::Auth) raised before any request is made.

mod credentials;

pub use credentials::{Credentials, DEFAULT_API_URL, ENV_API_TOKEN, ENV_API_URL};
