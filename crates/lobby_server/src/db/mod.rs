//! Database persistence layer for games and their players.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod seed;

pub use error::{DbError, RepoError};
pub use models::{GamePlayer, GameRow, NewGame, NewUser, User};
pub use repository::{GameFilter, GameRepository};
pub use seed::{SEED_LOGIN, SeedSummary, seed};
