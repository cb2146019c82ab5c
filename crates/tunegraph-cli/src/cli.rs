//! Command-line arguments for the `tunegraph` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tunegraph")]
#[command(about = "Music recommendations from a Neo4j listening graph")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file prefix (default: tunegraph).
    #[arg(short, long, default_value = "tunegraph", global = true)]
    pub config: String,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Songs heard by people the user follows.
    Friends {
        username: String,
        /// Maximum results (default from config, 10).
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Unheard songs from the user's most-listened genre.
    Genre {
        username: String,
        /// Maximum results (default from config, 5).
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Top-genre songs that followees have heard, ranked by friend count.
    Combined {
        username: String,
        /// Maximum results (default from config, 10).
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// A user and every song they have listened to.
    Profile { username: String },
    /// Record one listen and print the new total (null if user or song is missing).
    Listen { username: String, song_id: String },
    /// Create uniqueness constraints for users, songs, and genres.
    Schema,
    /// Load a JSON dataset of users, songs, follows, and listens.
    Seed { file: PathBuf },
    /// Print a readable report of every recommendation for a user.
    Demo {
        username: String,
        /// Also record one listen of this song id.
        #[arg(long)]
        song: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_friends_with_limit() {
        let cli = Cli::try_parse_from(["tunegraph", "friends", "alice", "--limit", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Friends {
                username: "alice".to_string(),
                limit: Some(3),
            }
        );
        assert_eq!(cli.config, "tunegraph");
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_parse_listen_and_global_config() {
        let cli =
            Cli::try_parse_from(["tunegraph", "listen", "alice", "song_5", "-c", "prod"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Listen {
                username: "alice".to_string(),
                song_id: "song_5".to_string(),
            }
        );
        assert_eq!(cli.config, "prod");
    }

    #[test]
    fn test_parse_demo_without_song() {
        let cli = Cli::try_parse_from(["tunegraph", "--json-logs", "demo", "bob"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Demo {
                username: "bob".to_string(),
                song: None,
            }
        );
        assert!(cli.json_logs);
    }

    #[test]
    fn test_rejects_missing_username() {
        assert!(Cli::try_parse_from(["tunegraph", "genre"]).is_err());
        assert!(Cli::try_parse_from(["tunegraph", "friends", "alice", "--limit", "-1"]).is_err());
    }
}
