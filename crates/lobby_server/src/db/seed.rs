//! Demo data: one user with two open games.

use derive_getters::Getters;
use lobby_games::{BOARD_SIZE, GameStatus};
use serde_json::Value;
use tracing::{info, instrument};

use crate::db::{DbError, GameRepository, NewGame, NewUser, User};

/// Login of the seeded user.
pub const SEED_LOGIN: &str = "user";

const SEED_PASSWORD_HASH: &str = "asdipjapsdok";
const SEED_RATING: i32 = 1000;
const SEED_GAMES: usize = 2;

/// What [`seed`] wrote.
#[derive(Debug, Clone, Getters)]
pub struct SeedSummary {
    /// The seeded (or reused) user.
    user: User,
    /// Identifiers of the games created.
    game_ids: Vec<String>,
}

/// Seeds the store with a demo user and two idle games created by them.
///
/// The user is reused if the login already exists, so seeding twice adds
/// two more games but no second user.
///
/// # Errors
///
/// Returns [`DbError`] if a database error occurs.
#[instrument(skip(repository))]
pub fn seed(repository: &GameRepository) -> Result<SeedSummary, DbError> {
    let user = match repository.get_user_by_login(SEED_LOGIN)? {
        Some(user) => {
            info!(user_id = %user.id(), "Reusing seed user");
            user
        }
        None => repository.create_user(NewUser::generated(
            SEED_LOGIN.to_string(),
            SEED_PASSWORD_HASH.to_string(),
            SEED_RATING,
        ))?,
    };

    let empty_field = Value::Array(vec![Value::Null; BOARD_SIZE]).to_string();
    let players = [user.id().clone()];

    let game_ids = (0..SEED_GAMES)
        .map(|_| {
            let game = NewGame::generated(GameStatus::Idle, Some(empty_field.clone()), None);
            repository.create_game(game, &players)
        })
        .collect::<Result<Vec<_>, DbError>>()?;

    info!(games = game_ids.len(), "Seed complete");
    Ok(SeedSummary { user, game_ids })
}
