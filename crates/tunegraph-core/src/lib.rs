//! tunegraph-core: Shared types, configuration, and error handling for tunegraph.
//!
//! This crate provides the foundational types used across all tunegraph crates:
//! - Node and relationship types (User, Song, Genre, FOLLOWS, ...) for the music graph
//! - Typed records returned by the recommendation queries
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Settings;
pub use error::TuneError;
pub use types::{
    CombinedRecommendation, Dataset, FavoriteSong, Follow, FriendRecommendation, Genre,
    GenreRecommendation, Label, Listen, RelType, Song, User, UserProfile,
};
