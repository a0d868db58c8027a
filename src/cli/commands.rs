//! CLI arguments

use crate::types::PageSize;
use clap::Parser;

/// List every record of a paginated GraphQL connection
#[derive(Parser, Debug)]
#[command(name = "relay-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GraphQL endpoint (falls back to FORGED_API_URL, then https://api.forged.dev)
    #[arg(long)]
    pub api: Option<String>,

    /// API token (falls back to FORGED_API_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Connection definition: a built-in name or a YAML file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONNECTION)]
    pub connection: String,

    /// Records requested per page
    #[arg(long, default_value_t = PageSize::DEFAULT.get(), value_parser = parse_page_size)]
    pub page_size: u32,

    /// Fail instead of fetching more than this many pages
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Page size as a validated [`PageSize`]
    pub fn page_size(&self) -> crate::Result<PageSize> {
        PageSize::new(u64::from(self.page_size))
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Summary line followed by `<id>: <name>` per record
    Pretty,
    /// One JSON document with metadata and nodes
    Json,
}

fn parse_page_size(raw: &str) -> std::result::Result<u32, String> {
    let value: u64 = raw.parse().map_err(|e| format!("{e}"))?;
    PageSize::new(value)
        .map(PageSize::get)
        .map_err(|e| e.to_string())
}
