//! Command-line interface for lobby_server.

use clap::{Parser, Subcommand};

/// Lobby Server - list and display stored tic-tac-toe games
#[derive(Parser, Debug)]
#[command(name = "lobby_server")]
#[command(about = "List and display stored tic-tac-toe games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// SQLite database path (overrides config and DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert a demo user with two idle games
    Seed,

    /// Print stored games, one per line
    List {
        /// Only games with this status (idle, inProgress, gameOver, gameOverDraw)
        #[arg(long)]
        status: Option<String>,

        /// Only games this player takes part in
        #[arg(long)]
        player: Option<String>,
    },

    /// Run the JSON HTTP API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
}
