//! Plain-text rendering for the `demo` subcommand.

use std::fmt::Write;

use tunegraph_core::{
    CombinedRecommendation, FriendRecommendation, GenreRecommendation, UserProfile,
};

const RULE_WIDTH: usize = 60;

/// Everything the demo fetched for one user.
#[derive(Debug, Default)]
pub struct DemoReport {
    pub username: String,
    pub friends: Vec<FriendRecommendation>,
    pub genre: Vec<GenreRecommendation>,
    pub combined: Vec<CombinedRecommendation>,
    pub profile: Option<UserProfile>,
    /// `(song_id, new total)` when a listen was recorded.
    pub listen: Option<(String, Option<i64>)>,
}

impl DemoReport {
    pub fn render(&self) -> String {
        let mut out = String::new();

        section(&mut out, &format!("Friend recommendations for {}", self.username));
        if self.friends.is_empty() {
            empty(&mut out);
        }
        for rec in &self.friends {
            let _ = writeln!(
                out,
                "  {} - heard by {} ({} {})",
                rec.title,
                rec.friend_username,
                rec.listen_count,
                plural(rec.listen_count, "listen", "listens")
            );
        }

        section(&mut out, "From your favorite genre");
        if self.genre.is_empty() {
            empty(&mut out);
        }
        for rec in &self.genre {
            let _ = writeln!(out, "  {} ({})", rec.title, rec.genre_name);
        }

        section(&mut out, "Combined recommendations");
        if self.combined.is_empty() {
            empty(&mut out);
        }
        for rec in &self.combined {
            let _ = writeln!(
                out,
                "  {} - friend: {} ({}, {} {})",
                rec.title,
                rec.friend_username,
                rec.genre_name,
                rec.friends_count,
                plural(rec.friends_count, "friend", "friends")
            );
        }

        section(&mut out, "User profile");
        match &self.profile {
            Some(profile) => {
                let email = profile.email.as_deref().unwrap_or("no email");
                let _ = writeln!(out, "  User: {} ({email})", profile.username);
                let _ = writeln!(out, "  Songs listened to: {}", profile.favorite_songs.len());
                for song in &profile.favorite_songs {
                    let genre = song.genre.as_deref().unwrap_or("unknown genre");
                    let _ = writeln!(out, "    - {} ({genre})", song.title);
                }
            }
            None => {
                let _ = writeln!(out, "  User {} not found", self.username);
            }
        }

        if let Some((song_id, total)) = &self.listen {
            section(&mut out, "Recording a listen");
            match total {
                Some(n) => {
                    let _ = writeln!(
                        out,
                        "  {} has listened to {song_id} {n} {}",
                        self.username,
                        plural(*n, "time", "times")
                    );
                }
                None => {
                    let _ = writeln!(out, "  Not recorded: user or song {song_id} not found");
                }
            }
        }

        out
    }
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n{}\n{rule}", title.to_uppercase());
}

fn empty(out: &mut String) {
    out.push_str("  (none)\n");
}

fn plural<'a>(n: i64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
