//! CLI runner - lists a connection and renders it

use crate::auth::Credentials;
use crate::cli::commands::{Cli, OutputFormat};
use crate::config::{load_connection, ConnectionQuery};
use crate::error::Result;
use crate::graphql::{GraphQlClient, QueryExecutor};
use crate::pagination::{CancelHandle, Connection, ConnectionTraverser, TraversalOptions};
use crate::types::{JsonValue, PageSize};
use futures::{Stream, StreamExt};
use std::fmt::Write as _;
use std::time::Instant;
use tracing::{error, info, warn};

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// CLI runner
pub struct Runner {
    cli: Cli,
    env: EnvLookup,
}

impl Runner {
    /// Create a new runner reading fallbacks from the process environment
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Replace the environment lookup used for token and endpoint fallbacks
    #[must_use]
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(env);
        self
    }

    /// Run the CLI and print the result to stdout
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        print!("{output}");
        Ok(())
    }

    /// Traverse the selected connection and return the rendered output
    pub async fn execute(&self) -> Result<String> {
        let credentials = Credentials::resolve_with(
            self.cli.token.clone(),
            self.cli.api.clone(),
            |key| (self.env)(key),
        )?;
        let query = load_connection(&self.cli.connection)?;
        let page_size = self.cli.page_size()?;

        info!(
            connection = %query.name,
            endpoint = %credentials.endpoint(),
            page_size = %page_size,
            "listing connection"
        );

        let client = GraphQlClient::new(credentials)?;
        let connection = self.traverse(client, query.clone(), page_size).await?;

        match self.cli.format {
            OutputFormat::Pretty => Ok(render_pretty(&query, &connection)),
            OutputFormat::Json => render_json(&connection),
        }
    }

    /// Fetch every node. The first Ctrl-C stops at the next page boundary,
    /// a second one exits immediately.
    async fn traverse<E: QueryExecutor>(
        &self,
        executor: E,
        query: ConnectionQuery,
        page_size: PageSize,
    ) -> Result<Connection> {
        let mut options = TraversalOptions::new();
        if let Some(max_pages) = self.cli.max_pages {
            options = options.with_max_pages(max_pages);
        }

        let cancel = CancelHandle::new();
        let traverser = ConnectionTraverser::for_query(executor, query)?
            .with_options(options)
            .with_cancel(cancel.signal());

        let interrupt = tokio::spawn(async move {
            if relay_interrupts(ctrl_c_signals(), cancel).await {
                error!("interrupted again, exiting");
                std::process::exit(130);
            }
        });

        let start = Instant::now();
        let result = traverser.traverse_all(page_size).await;
        interrupt.abort();

        if let Ok(connection) = &result {
            info!(
                nodes = connection.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "connection listed"
            );
        }
        result
    }
}

/// Forward interrupts to `cancel`.
///
/// The first signal requests cancellation. Returns `true` once a second signal
/// arrives, `false` if the signal source ends first.
pub(crate) async fn relay_interrupts<S>(signals: S, cancel: CancelHandle) -> bool
where
    S: Stream<Item = ()>,
{
    let mut signals = std::pin::pin!(signals);
    if signals.next().await.is_none() {
        return false;
    }
    warn!("interrupted, stopping after the current page (Ctrl-C again to exit now)");
    cancel.cancel();
    signals.next().await.is_some()
}

fn ctrl_c_signals() -> impl Stream<Item = ()> + Send {
    futures::stream::unfold((), |()| async {
        tokio::signal::ctrl_c().await.ok().map(|()| ((), ()))
    })
}

/// Summary line plus one `<id>: <name>` line per node
pub fn render_pretty(query: &ConnectionQuery, connection: &Connection) -> String {
    let container = connection
        .metadata_field(&query.container_field)
        .map_or_else(|| "unknown".to_string(), display_value);

    let mut out = format!(
        "All {} for {} ({} in total)\n",
        query.label,
        container,
        connection.len()
    );
    for node in &connection.nodes {
        let _ = writeln!(
            out,
            "{}: {}",
            display_field(node, "id"),
            display_field(node, "name")
        );
    }
    out
}

/// `{"metadata": ..., "nodes": [...]}` on a single line
pub fn render_json(connection: &Connection) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string(connection)?))
}

fn display_field(node: &JsonValue, field: &str) -> String {
    node.get(field).map_or_else(|| "-".to_string(), display_value)
}

fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => "-".to_string(),
        other => other.to_string(),
    }
}
