//! CLI module
//!
//! Command-line interface for listing a connection.
//!
//! # Output
//!
//! - `pretty` - `All <label> for <container> (<n> in total)` then `<id>: <name>` per record
//! - `json` - `{"metadata": ..., "nodes": [...]}`

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::{render_json, render_pretty, Runner};
