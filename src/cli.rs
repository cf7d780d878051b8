use clap::{Parser, Subcommand};

use crate::utils::APP_NAME;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Touch playlist and playback controller for a personal media server", long_about = None)]
pub struct Cli {
    /// Server base URL, overriding the configured one
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the server playlist
    Playlist,

    /// Keep the playlist on screen, refreshing it while nothing else is going on
    Watch,

    /// Add a media file to the playlist
    Add {
        /// Path of the file on the server
        path: String,

        /// Open the added entry in the player
        #[arg(long)]
        play: bool,
    },

    /// Remove an entry from the playlist
    Delete {
        /// Server id of the entry
        id: String,
    },

    /// Move an entry in front of another one
    Move {
        /// Server id of the entry to move
        id: String,

        /// Entry to place it before; moves to the end when omitted
        before: Option<String>,
    },

    /// Show the entry after the given one
    Next {
        /// Server id of the reference entry
        id: String,
    },

    /// Show the entry before the given one
    Prev {
        /// Server id of the reference entry
        id: String,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_override_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([APP_NAME, "playlist", "--server", "http://nas:9000"]).unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://nas:9000"));
        assert!(matches!(cli.command, Commands::Playlist));
    }

    #[test]
    fn move_target_is_optional() {
        let cli = Cli::try_parse_from([APP_NAME, "move", "7"]).unwrap();
        match cli.command {
            Commands::Move { id, before } => {
                assert_eq!(id, "7");
                assert_eq!(before, None);
            }
            _ => panic!("expected move"),
        }

        let cli = Cli::try_parse_from([APP_NAME, "add", "/media/a b.mkv", "--play"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { play: true, .. }));
    }
}
