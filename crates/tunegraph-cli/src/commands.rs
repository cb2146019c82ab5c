//! Subcommand dispatch: one graph operation per command.

use std::path::Path;

use serde::Serialize;

use tunegraph_core::config::LimitSettings;
use tunegraph_core::Dataset;
use tunegraph_graph::GraphClient;

use crate::cli::Command;
use crate::error::{CliError, Result};
use crate::report::DemoReport;

/// Run a single command against an open client.
///
/// Returns the text to print on stdout: pretty JSON for every command except
/// `demo`, which returns a readable report.
pub async fn run(graph: &GraphClient, limits: &LimitSettings, command: Command) -> Result<String> {
    let output = match command {
        Command::Friends { username, limit } => {
            let limit = limit.unwrap_or(limits.friends);
            to_json(&graph.friend_recommendations(&username, limit).await?)?
        }
        Command::Genre { username, limit } => {
            let limit = limit.unwrap_or(limits.genre);
            to_json(&graph.genre_recommendations(&username, limit).await?)?
        }
        Command::Combined { username, limit } => {
            let limit = limit.unwrap_or(limits.combined);
            to_json(&graph.combined_recommendations(&username, limit).await?)?
        }
        Command::Profile { username } => to_json(&graph.user_profile(&username).await?)?,
        Command::Listen { username, song_id } => {
            to_json(&graph.record_listen(&username, &song_id).await?)?
        }
        Command::Schema => {
            graph.ensure_schema().await?;
            to_json(&serde_json::json!({ "schema": "ok" }))?
        }
        Command::Seed { file } => {
            let dataset = load_dataset(&file)?;
            if dataset.is_empty() {
                tracing::warn!(path = %file.display(), "Dataset is empty, nothing to seed");
            } else {
                graph.seed(&dataset).await?;
            }
            to_json(&serde_json::json!({
                "users": dataset.users.len(),
                "songs": dataset.songs.len(),
                "follows": dataset.follows.len(),
                "listens": dataset.listens.len(),
            }))?
        }
        Command::Demo { username, song } => {
            let mut report = DemoReport {
                friends: graph.friend_recommendations(&username, limits.friends).await?,
                genre: graph.genre_recommendations(&username, limits.genre).await?,
                combined: graph
                    .combined_recommendations(&username, limits.combined)
                    .await?,
                profile: graph.user_profile(&username).await?,
                ..Default::default()
            };
            if let Some(song_id) = song {
                let total = graph.record_listen(&username, &song_id).await?;
                report.listen = Some((song_id, total));
            }
            report.username = username;
            report.render()
        }
    };

    Ok(output)
}

/// Read and parse a JSON dataset file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Dataset::from_json(&raw).map_err(|e| CliError::Dataset(format!("{}: {e}", path.display())))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
