//! Command-line interface for the tic-tac-toe driver.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe - two named players, one board
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play scripted tic-tac-toe matches between two named players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up two players and play a match from a list of cells
    Play(PlayArgs),

    /// List the avatars players can choose from
    Avatars {
        /// Avatar directory (overrides the config file)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Player setup and moves for one match.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Player 1 name (blank uses "Player 1")
    #[arg(long, default_value = "")]
    pub p1_name: String,

    /// Player 1 avatar: file name or 1-based catalog number
    #[arg(long)]
    pub p1_avatar: Option<String>,

    /// Player 2 name (blank uses "Player 2")
    #[arg(long, default_value = "")]
    pub p2_name: String,

    /// Player 2 avatar: file name or 1-based catalog number
    #[arg(long)]
    pub p2_avatar: Option<String>,

    /// Cells to play in order, comma separated (0-8, row-major)
    #[arg(long, value_delimiter = ',', required = true)]
    pub moves: Vec<usize>,

    /// Cells for a second match with the same players, after a reset
    #[arg(long, value_delimiter = ',')]
    pub rematch: Vec<usize>,

    /// Print the final board as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play() {
        let cli = Cli::try_parse_from([
            "tictactoe",
            "play",
            "--p1-name",
            "Ada",
            "--p1-avatar",
            "fox.png",
            "--p2-avatar",
            "2",
            "--moves",
            "0,3,1,4,2",
        ])
        .unwrap();

        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.p1_name, "Ada");
        assert_eq!(args.p2_name, "");
        assert_eq!(args.p2_avatar.as_deref(), Some("2"));
        assert_eq!(args.moves, vec![0, 3, 1, 4, 2]);
        assert!(args.rematch.is_empty());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_play_requires_moves() {
        assert!(Cli::try_parse_from(["tictactoe", "play"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tictactoe", "avatars", "--config", "tictactoe.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tictactoe.toml")));
    }
}
