//! Write operations for the music graph.
//!
//! Recording a listen is the only write the recommendation workflow makes.
//! The upserts below load users, songs, and relationships; all of them use
//! MERGE so re-running a seed is harmless.

use chrono::Utc;
use neo4rs::{query, Query};

use tunegraph_core::{Dataset, Follow, Genre, Listen, RelType, Song, User};

use crate::client::{row_i64, GraphClient, GraphError};

impl GraphClient {
    // ── Listens ──────────────────────────────────────────────────

    /// Record that `username` listened to `song_id` once more.
    ///
    /// Creates the LISTENED_TO edge with count 1 on the first listen and
    /// increments it afterwards. Returns the new total, or `None` if either
    /// the user or the song does not exist.
    pub async fn record_listen(
        &self,
        username: &str,
        song_id: &str,
    ) -> Result<Option<i64>, GraphError> {
        let q = query(
            "MATCH (user:User {username: $username}), (song:Song {id: $song_id})
             MERGE (user)-[listen:LISTENED_TO]->(song)
             ON CREATE SET
               listen.count = 1,
               listen.first_listened_at = $now, listen.last_listened_at = $now
             ON MATCH SET
               listen.count = listen.count + 1,
               listen.last_listened_at = $now
             RETURN listen.count AS total_listens",
        )
        .param("username", username.to_string())
        .param("song_id", song_id.to_string())
        .param("now", Utc::now().to_rfc3339());

        match self.query_one(q).await? {
            Some(row) => {
                let total = row_i64(&row, "total_listens")?;
                tracing::debug!(username, song_id, total, "Recorded listen");
                Ok(Some(total))
            }
            None => {
                tracing::debug!(username, song_id, "Listen not recorded: user or song missing");
                Ok(None)
            }
        }
    }

    // ── Node Upserts ─────────────────────────────────────────────

    /// Upsert a User node keyed by username.
    ///
    /// A user without an email leaves any stored email unchanged.
    pub async fn upsert_user(&self, user: &User) -> Result<(), GraphError> {
        self.run(user_query(user)).await
    }

    /// Upsert a Genre node keyed by name.
    pub async fn upsert_genre(&self, genre: &Genre) -> Result<(), GraphError> {
        self.run(genre_query(genre)).await
    }

    /// Upsert a Song node and point it at its genre.
    ///
    /// Any BELONGS_TO edge to a different genre is removed, so a song always
    /// has exactly one genre.
    pub async fn upsert_song(&self, song: &Song) -> Result<(), GraphError> {
        self.run(song_query(song)).await
    }

    // ── Edge Upserts ─────────────────────────────────────────────

    /// Make `follower` follow `followee`.
    ///
    /// Returns `false` if either user does not exist.
    pub async fn follow(&self, follower: &str, followee: &str) -> Result<bool, GraphError> {
        let q = follow_query(&Follow {
            follower: follower.to_string(),
            followee: followee.to_string(),
        });

        match self.query_one(q).await? {
            Some(row) => Ok(row_i64(&row, "linked")? > 0),
            None => Ok(false),
        }
    }

    // ── Batch Operations ─────────────────────────────────────────

    /// Load a whole dataset in a single transaction.
    ///
    /// Nodes are written before edges. Follows and listens that reference
    /// missing nodes are skipped by the store.
    pub async fn seed(&self, dataset: &Dataset) -> Result<(), GraphError> {
        if let Some(bad) = dataset.listens.iter().find(|l| l.count < 0) {
            return Err(GraphError::InvalidInput(format!(
                "negative listen count {} for {} -> {}",
                bad.count, bad.username, bad.song_id
            )));
        }

        let mut txn = self.start_txn().await?;

        for genre in &dataset.genres {
            txn.run(genre_query(genre)).await?;
        }
        for user in &dataset.users {
            txn.run(user_query(user)).await?;
        }
        for song in &dataset.songs {
            txn.run(song_query(song)).await?;
        }
        for follow in &dataset.follows {
            txn.run(follow_query(follow)).await?;
        }
        for listen in &dataset.listens {
            txn.run(listen_query(listen)).await?;
        }

        txn.commit().await?;
        tracing::info!(
            users = dataset.users.len(),
            songs = dataset.songs.len(),
            follows = dataset.follows.len(),
            listens = dataset.listens.len(),
            "Seeded dataset"
        );
        Ok(())
    }
}

// ── Statement Builders ───────────────────────────────────────────

fn user_query(user: &User) -> Query {
    query(
        "MERGE (u:User {username: $username})
         SET u.id = $id, u.email = coalesce($email, u.email)",
    )
    .param("username", user.username.clone())
    .param("id", user.id.clone())
    .param("email", user.email.clone())
}

fn genre_query(genre: &Genre) -> Query {
    query("MERGE (:Genre {name: $name})").param("name", genre.name.clone())
}

fn song_query(song: &Song) -> Query {
    let rel = RelType::BelongsTo.as_cypher();
    let cypher = format!(
        "MERGE (g:Genre {{name: $genre}})
         MERGE (s:Song {{id: $id}})
         SET s.title = $title
         WITH s, g
         OPTIONAL MATCH (s)-[old:{rel}]->(other:Genre)
         WHERE other <> g
         DELETE old
         WITH DISTINCT s, g
         MERGE (s)-[:{rel}]->(g)"
    );

    query(&cypher)
        .param("id", song.id.clone())
        .param("title", song.title.clone())
        .param("genre", song.genre.clone())
}

fn follow_query(follow: &Follow) -> Query {
    let rel = RelType::Follows.as_cypher();
    let cypher = format!(
        "MATCH (a:User {{username: $follower}}), (b:User {{username: $followee}})
         MERGE (a)-[:{rel}]->(b)
         RETURN count(*) AS linked"
    );

    query(&cypher)
        .param("follower", follow.follower.clone())
        .param("followee", follow.followee.clone())
}

fn listen_query(listen: &Listen) -> Query {
    let rel = RelType::ListenedTo.as_cypher();
    let cypher = format!(
        "MATCH (u:User {{username: $username}}), (s:Song {{id: $song_id}})
         MERGE (u)-[l:{rel}]->(s)
         ON CREATE SET l.first_listened_at = $now
         SET l.count = $count, l.last_listened_at = $now"
    );

    query(&cypher)
        .param("username", listen.username.clone())
        .param("song_id", listen.song_id.clone())
        .param("count", listen.count)
        .param("now", Utc::now().to_rfc3339())
}
