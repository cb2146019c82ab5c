//! Configuration management for tunegraph.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`TUNEGRAPH__` prefix, `__` separator,
//!    e.g. `TUNEGRAPH__NEO4J__URI`)
//! 2. Config file (`tunegraph.toml`, or any prefix passed to [`Settings::load`])
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;
use crate::types::{DEFAULT_COMBINED_LIMIT, DEFAULT_FRIEND_LIMIT, DEFAULT_GENRE_LIMIT};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TUNEGRAPH";

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub neo4j: Neo4jSettings,
    pub limits: LimitSettings,
}

/// Connection settings for the graph store.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Target database; the server default when unset.
    pub database: Option<String>,
    pub max_connections: u32,
    pub fetch_size: usize,
}

/// Default result sizes when a caller does not pass a limit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitSettings {
    pub friends: u32,
    pub genre: u32,
    pub combined: u32,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "tunegraph-dev".to_string(),
            database: None,
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            friends: DEFAULT_FRIEND_LIMIT,
            genre: DEFAULT_GENRE_LIMIT,
            combined: DEFAULT_COMBINED_LIMIT,
        }
    }
}

impl Settings {
    /// Load settings from `<file_prefix>.{toml,json,yaml,...}` (optional) and
    /// the process environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with_env(file_prefix, environment())
    }

    fn load_with_env(file_prefix: &str, env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(env)
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        tracing::debug!(
            uri = %settings.neo4j.uri,
            user = %settings.neo4j.user,
            "Loaded settings"
        );
        Ok(settings)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
