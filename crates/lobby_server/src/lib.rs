//! Lobby Server - stored tic-tac-toe games, listed and displayed
//!
//! # Architecture
//!
//! - **Db**: diesel/SQLite persistence, the row fetcher and seed data
//! - **Mapping**: every fetched row goes through [`lobby_games`] to become
//!   a typed [`GameEntity`](lobby_games::GameEntity)
//! - **Http**: JSON listing API (axum)
//! - **Listing**: text and summary views used by the CLI and API
//!
//! # Example
//!
//! ```no_run
//! use lobby_server::{GameFilter, GameRepository};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = GameRepository::new("lobby.db".to_string())?;
//! repository.run_migrations()?;
//!
//! for game in repository.list_games(&GameFilter::idle())? {
//!     println!("{}", lobby_server::describe(&game));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod listing;

/// HTTP API.
pub mod http;

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_URL_VAR, LobbyConfig};

// Crate-level exports - Database
pub use db::{
    DbError, GameFilter, GamePlayer, GameRepository, GameRow, NewGame, NewUser, RepoError,
    SEED_LOGIN, SeedSummary, User, seed,
};

// Crate-level exports - Views
pub use listing::{IdleListing, describe};
