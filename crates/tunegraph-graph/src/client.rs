//! Neo4j connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph, Query, Row};
use serde::de::DeserializeOwned;

use tunegraph_core::config::Neo4jSettings;

/// Errors from graph operations.
///
/// A missing user or song is not an error: queries return an empty `Vec`
/// or `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Neo4jSettings::default().into()
    }
}

impl From<Neo4jSettings> for GraphConfig {
    fn from(s: Neo4jSettings) -> Self {
        Self {
            uri: s.uri,
            user: s.user,
            password: s.password,
            database: s.database,
            max_connections: s.max_connections,
            fetch_size: s.fetch_size,
        }
    }
}

/// Neo4j client for the music graph, backed by a connection pool.
///
/// Each operation checks a session out of the pool for one query and hands it
/// back when the result stream is dropped, on success and on error alike.
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    uri: String,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    ///
    /// Fails with [`GraphError::Connection`] if the store is unreachable or
    /// rejects the credentials.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let mut builder = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size);
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }
        let neo_config = builder
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        // The pool is lazy; a round trip surfaces bad addresses and credentials here.
        graph
            .run(neo4rs::query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self {
            graph,
            uri: config.uri.clone(),
        })
    }

    /// Release the connection pool. The client cannot be used afterwards.
    ///
    /// Dropping the client has the same effect; this just makes the end of
    /// its lifetime explicit at the call site.
    pub fn close(self) {
        drop(self.graph);
        tracing::info!(uri = %self.uri, "Closed Neo4j connection");
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }

    /// Execute a read query and deserialize every row into `T`.
    ///
    /// Field names of `T` must match the query's `RETURN` aliases.
    pub async fn query_as<T: DeserializeOwned>(&self, query: Query) -> Result<Vec<T>, GraphError> {
        self.query_rows(query)
            .await?
            .iter()
            .map(row_to)
            .collect()
    }

    /// Begin a transaction.
    pub async fn start_txn(&self) -> Result<neo4rs::Txn, GraphError> {
        Ok(self.graph.start_txn().await?)
    }
}

/// Read an integer column, such as a count returned by a write query.
pub(crate) fn row_i64(row: &Row, key: &str) -> Result<i64, GraphError> {
    row.get::<i64>(key)
        .map_err(|e| GraphError::Serialization(format!("Failed to read {key}: {e}")))
}

/// Deserialize a whole row into a record type.
pub(crate) fn row_to<T: DeserializeOwned>(row: &Row) -> Result<T, GraphError> {
    row.to::<T>().map_err(|e| {
        GraphError::Serialization(format!(
            "Failed to deserialize {}: {e}",
            std::any::type_name::<T>()
        ))
    })
}
