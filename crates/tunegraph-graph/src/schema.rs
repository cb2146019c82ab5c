//! Uniqueness constraints backing the music graph's identity rules.

use neo4rs::query;

use tunegraph_core::Label;

use crate::client::{GraphClient, GraphError};

/// Labels whose key property must be unique.
const CONSTRAINED_LABELS: [Label; 3] = [Label::User, Label::Song, Label::Genre];

impl GraphClient {
    /// Create the uniqueness constraints for users, songs, and genres.
    ///
    /// Idempotent: existing constraints are left alone.
    pub async fn ensure_schema(&self) -> Result<(), GraphError> {
        for label in CONSTRAINED_LABELS {
            self.run(query(&constraint_cypher(label))).await?;
        }
        tracing::info!(constraints = CONSTRAINED_LABELS.len(), "Schema ensured");
        Ok(())
    }
}

fn constraint_name(label: Label) -> String {
    format!(
        "{}_{}_unique",
        label.as_cypher().to_lowercase(),
        label.key_property()
    )
}

fn constraint_cypher(label: Label) -> String {
    format!(
        "CREATE CONSTRAINT {name} IF NOT EXISTS
         FOR (n:{label}) REQUIRE n.{key} IS UNIQUE",
        name = constraint_name(label),
        label = label.as_cypher(),
        key = label.key_property(),
    )
}
