//! CLI entry point for tunegraph.
//!
//! Results go to stdout; logs go to stderr so output can be piped as JSON.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tunegraph_core::Settings;
use tunegraph_graph::{GraphClient, GraphConfig};

use tunegraph_cli::cli::Cli;
use tunegraph_cli::commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.json_logs {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let settings = Settings::load(&cli.config)?;
    let graph = GraphClient::connect(&GraphConfig::from(settings.neo4j)).await?;

    let result = commands::run(&graph, &settings.limits, cli.command).await;
    graph.close();

    println!("{}", result?);
    Ok(())
}
