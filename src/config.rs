//! Connection query definitions
//!
//! A [`ConnectionQuery`] is everything the traversal needs to know about one
//! paginated query: the document, the names of its cursor and page-size
//! variables, where the connection sits in the response and which top-level
//! values to capture as metadata. Definitions are written in YAML; a few
//! ship embedded in the binary.

use crate::error::{Error, Result, ResultExt};
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

// ============================================================================
// Connection Query
// ============================================================================

/// Declarative description of a Relay-style connection query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionQuery {
    /// Short identifier (e.g. "devices")
    pub name: String,

    /// Plural noun for the records, used in summaries
    #[serde(default = "default_label")]
    pub label: String,

    /// GraphQL query document
    pub query: String,

    /// Dot-separated path from the response root to the connection object
    pub connection_path: String,

    /// Variable carrying the continuation cursor
    #[serde(default = "default_cursor_variable")]
    pub cursor_variable: String,

    /// Variable carrying the page size
    #[serde(default = "default_page_size_variable")]
    pub page_size_variable: String,

    /// Metadata field name -> dot-separated path from the response root
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Metadata field naming the container of the connection
    #[serde(default = "default_container_field")]
    pub container_field: String,

    /// Extra variables sent with every page request
    #[serde(default)]
    pub variables: JsonObject,
}

fn default_label() -> String {
    "records".to_string()
}

fn default_cursor_variable() -> String {
    "cursor".to_string()
}

fn default_page_size_variable() -> String {
    "first".to_string()
}

fn default_container_field() -> String {
    "name".to_string()
}

impl ConnectionQuery {
    /// Create a definition with default variable names and no metadata
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        connection_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: default_label(),
            query: query.into(),
            connection_path: connection_path.into(),
            cursor_variable: default_cursor_variable(),
            page_size_variable: default_page_size_variable(),
            metadata: BTreeMap::new(),
            container_field: default_container_field(),
            variables: JsonObject::new(),
        }
    }

    /// Capture a top-level value as metadata
    #[must_use]
    pub fn with_metadata(mut self, field: impl Into<String>, path: impl Into<String>) -> Self {
        self.metadata.insert(field.into(), path.into());
        self
    }

    /// Send a static variable with every request
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Set the record label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Check the definition for obvious mistakes
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::config(format!("connection '{}': query is empty", self.name)));
        }
        if self.connection_path.split('.').any(str::is_empty) {
            return Err(Error::config(format!(
                "connection '{}': invalid connection_path '{}'",
                self.name, self.connection_path
            )));
        }
        if self.cursor_variable.is_empty() || self.page_size_variable.is_empty() {
            return Err(Error::config(format!(
                "connection '{}': variable names must not be empty",
                self.name
            )));
        }
        if self.cursor_variable == self.page_size_variable {
            return Err(Error::config(format!(
                "connection '{}': cursor and page size variables are both '{}'",
                self.name, self.cursor_variable
            )));
        }
        for (field, path) in &self.metadata {
            if path.split('.').any(str::is_empty) {
                return Err(Error::config(format!(
                    "connection '{}': invalid path '{path}' for metadata field '{field}'",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Built-in Definitions
// ============================================================================

/// Built-in connection YAML definitions
pub static BUILTIN_CONNECTIONS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("devices", include_str!("../connections/devices.yaml"));
        m
    });

/// Name of the connection used when none is given
pub const DEFAULT_CONNECTION: &str = "devices";

/// Get a built-in connection definition by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_CONNECTIONS.get(name).copied()
}

/// List built-in connection names, sorted
pub fn list_builtin() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_CONNECTIONS.keys().copied().collect();
    names.sort_unstable();
    names
}

// ============================================================================
// Loader Functions
// ============================================================================

/// Load a connection definition from a built-in name or a YAML file path
pub fn load_connection(name_or_path: impl AsRef<Path>) -> Result<ConnectionQuery> {
    let path = name_or_path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml")
    {
        if let Some(yaml) = get_builtin(&path_str) {
            return load_connection_from_str(yaml);
        }
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!(
                "Connection '{}' not found. Built-in connections: {}. Or provide a path to a YAML file.",
                path.display(),
                list_builtin().join(", ")
            ))
        } else {
            Error::Io(e)
        }
    })?;
    load_connection_from_str(&content)
        .with_context(|| format!("Invalid connection file '{}'", path.display()))
}

/// Load a connection definition from a YAML string
pub fn load_connection_from_str(yaml: &str) -> Result<ConnectionQuery> {
    let query: ConnectionQuery = serde_yaml::from_str(yaml)?;
    query.validate()?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_builtin_devices() {
        let query = load_connection("devices").unwrap();
        assert_eq!(query.name, "devices");
        assert_eq!(query.label, "devices");
        assert_eq!(query.connection_path, "currentProvisioner.project.devices");
        assert_eq!(query.cursor_variable, "cursor");
        assert_eq!(query.page_size_variable, "first");
        assert_eq!(
            query.metadata.get("name"),
            Some(&"currentProvisioner.project.name".to_string())
        );
        assert!(query.query.contains("devices(after: $cursor, first: $first)"));
        assert_eq!(list_builtin(), vec!["devices"]);
    }

    #[test]
    fn test_defaults_applied() {
        let query = load_connection_from_str(
            r#"
name: users
query: "query($cursor: String, $first: Int!) { users(after: $cursor, first: $first) { nodes { id } pageInfo { hasNextPage } } }"
connection_path: users
"#,
        )
        .unwrap();

        assert_eq!(query.label, "records");
        assert_eq!(query.container_field, "name");
        assert!(query.metadata.is_empty());
        assert!(query.variables.is_empty());
    }

    #[test]
    fn test_custom_variables() {
        let query = load_connection_from_str(
            r#"
name: runs
label: runs
query: "query($after: String, $limit: Int!, $project: ID!) { project(id: $project) { title runs(after: $after, first: $limit) { nodes { id } pageInfo { hasNextPage } } } }"
connection_path: project.runs
cursor_variable: after
page_size_variable: limit
container_field: title
metadata:
  title: project.title
variables:
  project: "p-1"
"#,
        )
        .unwrap();

        assert_eq!(query.cursor_variable, "after");
        assert_eq!(query.page_size_variable, "limit");
        assert_eq!(query.container_field, "title");
        assert_eq!(query.variables.get("project"), Some(&serde_json::json!("p-1")));
    }

    #[test]
    fn test_validate_rejects_bad_definitions() {
        let ok = ConnectionQuery::new("x", "{ x }", "a.b");
        assert!(ok.validate().is_ok());

        assert!(ConnectionQuery::new("x", "  ", "a").validate().is_err());
        assert!(ConnectionQuery::new("x", "{ x }", "a..b").validate().is_err());
        assert!(ConnectionQuery::new("x", "{ x }", "").validate().is_err());

        let mut same = ConnectionQuery::new("x", "{ x }", "a");
        same.page_size_variable = "cursor".to_string();
        assert!(same.validate().is_err());

        let bad_meta = ConnectionQuery::new("x", "{ x }", "a").with_metadata("name", ".name");
        assert!(bad_meta.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "name: chips\nquery: \"{{ chips {{ nodes {{ id }} }} }}\"\nconnection_path: chips"
        )
        .unwrap();

        let query = load_connection(file.path()).unwrap();
        assert_eq!(query.name, "chips");
        assert_eq!(query.connection_path, "chips");
    }

    #[test]
    fn test_load_unknown_connection() {
        let err = load_connection("no-such-connection").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("devices"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let err = load_connection_from_str("name: [unterminated").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }
}
