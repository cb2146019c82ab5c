//! tunegraph-graph: Neo4j recommendation client for the music graph.
//!
//! All recommendation logic runs inside Neo4j as fixed Cypher queries. This
//! crate owns the connection, passes parameters, and maps rows into the
//! typed records from `tunegraph-core`.

pub mod client;
pub mod mutations;
pub mod queries;
pub mod schema;

pub use client::{GraphClient, GraphConfig, GraphError};
