//! Read operations: recommendations and user profiles.
//!
//! Ranking happens in Cypher; these methods only bind parameters and map rows.
//! "Top genre" is the genre with the most distinct songs the user has heard,
//! ties broken by genre name ascending.

use neo4rs::query;

use tunegraph_core::types::RawProfileRow;
use tunegraph_core::{
    CombinedRecommendation, FriendRecommendation, GenreRecommendation, UserProfile,
};

use crate::client::{row_to, GraphClient, GraphError};

impl GraphClient {
    // ── Recommendations ──────────────────────────────────────────

    /// Songs heard by users that `username` follows and that `username` has
    /// not heard yet, most-played first.
    ///
    /// One row per (friend, song) pair. Ties are broken by title, then by
    /// friend username. Empty when the user follows nobody or does not exist.
    pub async fn friend_recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<FriendRecommendation>, GraphError> {
        let q = query(
            "MATCH (user:User {username: $username})-[:FOLLOWS]->(friend:User)
                   -[l:LISTENED_TO]->(song:Song)
             WHERE NOT (user)-[:LISTENED_TO]->(song)
             RETURN song.id AS song_id, song.title AS title,
                    friend.username AS friend_username, l.count AS listen_count
             ORDER BY listen_count DESC, title ASC, friend_username ASC
             LIMIT $limit",
        )
        .param("username", username.to_string())
        .param("limit", i64::from(limit));

        let recs: Vec<FriendRecommendation> = self.query_as(q).await?;
        tracing::debug!(username, limit, found = recs.len(), "Friend recommendations");
        Ok(recs)
    }

    /// Unheard songs from the user's top genre, ordered by title.
    ///
    /// Empty when the user has no listening history.
    pub async fn genre_recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<GenreRecommendation>, GraphError> {
        let q = query(
            "MATCH (user:User {username: $username})-[:LISTENED_TO]->(:Song)
                   -[:BELONGS_TO]->(genre:Genre)
             WITH user, genre, count(*) AS genre_count
             ORDER BY genre_count DESC, genre.name ASC
             LIMIT 1
             MATCH (genre)<-[:BELONGS_TO]-(song:Song)
             WHERE NOT (user)-[:LISTENED_TO]->(song)
             RETURN song.id AS song_id, song.title AS title, genre.name AS genre_name
             ORDER BY title ASC
             LIMIT $limit",
        )
        .param("username", username.to_string())
        .param("limit", i64::from(limit));

        let recs: Vec<GenreRecommendation> = self.query_as(q).await?;
        tracing::debug!(username, limit, found = recs.len(), "Genre recommendations");
        Ok(recs)
    }

    /// Unheard songs from the user's top genre that people they follow have
    /// heard, one row per song.
    ///
    /// Ordered by number of distinct recommending friends (descending), then
    /// title. `friend_username` is the alphabetically first recommender.
    pub async fn combined_recommendations(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<CombinedRecommendation>, GraphError> {
        let q = query(
            "MATCH (user:User {username: $username})-[:LISTENED_TO]->(:Song)
                   -[:BELONGS_TO]->(genre:Genre)
             WITH user, genre, count(*) AS genre_count
             ORDER BY genre_count DESC, genre.name ASC
             LIMIT 1
             MATCH (user)-[:FOLLOWS]->(friend:User)-[:LISTENED_TO]->(song:Song)
                   -[:BELONGS_TO]->(genre)
             WHERE NOT (user)-[:LISTENED_TO]->(song)
             WITH song, genre, friend
             ORDER BY friend.username ASC
             WITH song, genre, collect(DISTINCT friend.username) AS friends
             RETURN song.id AS song_id, song.title AS title,
                    friends[0] AS friend_username, genre.name AS genre_name,
                    size(friends) AS friends_count
             ORDER BY friends_count DESC, title ASC
             LIMIT $limit",
        )
        .param("username", username.to_string())
        .param("limit", i64::from(limit));

        let recs: Vec<CombinedRecommendation> = self.query_as(q).await?;
        tracing::debug!(username, limit, found = recs.len(), "Combined recommendations");
        Ok(recs)
    }

    // ── Profiles ─────────────────────────────────────────────────

    /// A user and every song they have listened to, with its genre.
    ///
    /// Returns `None` if the user does not exist.
    pub async fn user_profile(&self, username: &str) -> Result<Option<UserProfile>, GraphError> {
        let q = query(
            "MATCH (user:User {username: $username})
             OPTIONAL MATCH (user)-[:LISTENED_TO]->(song:Song)
             OPTIONAL MATCH (song)-[:BELONGS_TO]->(genre:Genre)
             WITH user, song, genre
             ORDER BY song.title ASC
             RETURN user.id AS id, user.username AS username, user.email AS email,
                    collect(CASE WHEN song IS NULL THEN NULL
                                 ELSE {title: song.title, genre: genre.name} END)
                      AS favorite_songs",
        )
        .param("username", username.to_string());

        match self.query_one(q).await? {
            Some(row) => {
                let raw: RawProfileRow = row_to(&row)?;
                let profile = UserProfile::from(raw);
                tracing::debug!(
                    username,
                    songs = profile.favorite_songs.len(),
                    "Loaded profile"
                );
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
