//! Core domain types for the music graph.
//!
//! Input types (`User`, `Song`, `Genre`, ...) describe what gets written to
//! the store. Record types (`FriendRecommendation`, ...) describe the rows the
//! recommendation queries return; their field names match the Cypher
//! `RETURN` aliases so a row deserializes straight into them.

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ── Limits ────────────────────────────────────────────────────────

/// Default number of friend-based recommendations.
pub const DEFAULT_FRIEND_LIMIT: u32 = 10;

/// Default number of genre-based recommendations.
pub const DEFAULT_GENRE_LIMIT: u32 = 5;

/// Default number of combined recommendations.
pub const DEFAULT_COMBINED_LIMIT: u32 = 10;

// ── Graph Schema ──────────────────────────────────────────────────

/// Node labels used in the music graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Label {
    User,
    Song,
    Genre,
}

impl Label {
    /// The Cypher label string.
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Song => "Song",
            Self::Genre => "Genre",
        }
    }

    /// The property that uniquely identifies a node with this label.
    pub fn key_property(&self) -> &'static str {
        match self {
            Self::User => "username",
            Self::Song => "id",
            Self::Genre => "name",
        }
    }
}

/// Relationship types between nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelType {
    /// User → User.
    Follows,
    /// User → Song, weighted by `count`.
    ListenedTo,
    /// Song → Genre, exactly one per song.
    BelongsTo,
}

impl RelType {
    /// The Cypher relationship type string.
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::Follows => "FOLLOWS",
            Self::ListenedTo => "LISTENED_TO",
            Self::BelongsTo => "BELONGS_TO",
        }
    }
}

// ── Node Types ────────────────────────────────────────────────────

/// A listener account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A track. Belongs to exactly one genre, referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub genre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub name: String,
}

/// A FOLLOWS edge between two usernames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Follow {
    pub follower: String,
    pub followee: String,
}

/// A pre-aggregated LISTENED_TO edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listen {
    pub username: String,
    pub song_id: String,
    #[serde(default = "default_listen_count")]
    pub count: i64,
}

fn default_listen_count() -> i64 {
    1
}

/// A complete set of nodes and edges to load into an empty or existing store.
///
/// Genres referenced by songs are created on demand, so `genres` only needs
/// to list genres that have no songs yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Dataset {
    pub genres: Vec<Genre>,
    pub users: Vec<User>,
    pub songs: Vec<Song>,
    pub follows: Vec<Follow>,
    pub listens: Vec<Listen>,
}

impl Dataset {
    /// Parse a dataset from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.users.is_empty()
            && self.songs.is_empty()
            && self.follows.is_empty()
            && self.listens.is_empty()
    }
}

// ── Query Records ─────────────────────────────────────────────────

/// A song heard by someone the user follows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FriendRecommendation {
    pub song_id: String,
    pub title: String,
    pub friend_username: String,
    pub listen_count: i64,
}

/// An unheard song from the user's most-listened genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreRecommendation {
    pub song_id: String,
    pub title: String,
    pub genre_name: String,
}

/// An unheard song from the user's top genre that followees have heard.
///
/// `friend_username` is the lexically first of the recommending followees;
/// `friends_count` is how many distinct followees heard the song.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinedRecommendation {
    pub song_id: String,
    pub title: String,
    pub friend_username: String,
    pub genre_name: String,
    pub friends_count: i64,
}

/// A song in a user's profile, paired with its genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteSong {
    pub title: String,
    pub genre: Option<String>,
}

/// A user with every song they have listened to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Option<String>,
    pub username: String,
    pub email: Option<String>,
    pub favorite_songs: Vec<FavoriteSong>,
}

/// A profile row exactly as the store returns it.
///
/// An OPTIONAL MATCH with no listens can still collect a map whose values are
/// all null; those placeholder entries are dropped in [`UserProfile::from`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfileRow {
    pub id: Option<String>,
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub favorite_songs: Vec<RawFavoriteSong>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFavoriteSong {
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl From<RawProfileRow> for UserProfile {
    fn from(row: RawProfileRow) -> Self {
        let favorite_songs = row
            .favorite_songs
            .into_iter()
            .filter_map(|s| {
                s.title.map(|title| FavoriteSong {
                    title,
                    genre: s.genre,
                })
            })
            .collect();

        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            favorite_songs,
        }
    }
}
