//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use lobby_games::{GameStatus, Player};
use tracing::instrument;

use crate::db::schema;

/// User account database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    id: String,
    login: String,
    password_hash: String,
    rating: i32,
}

impl User {
    /// Projects the account onto the public player view.
    #[instrument(skip(self), fields(user_id = %self.id))]
    pub fn to_player(&self) -> Player {
        Player::new(self.id.clone(), self.login.clone(), self.rating)
    }
}

/// Insertable user model for creating new accounts.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    id: String,
    login: String,
    password_hash: String,
    rating: i32,
}

impl NewUser {
    /// Creates a new user with a freshly generated identifier.
    #[instrument(skip(password_hash))]
    pub fn generated(login: String, password_hash: String, rating: i32) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), login, password_hash, rating)
    }
}

/// Game database model, exactly as stored.
///
/// `status` and `field` stay untyped here; they are only checked when the
/// row is mapped into a [`GameEntity`](lobby_games::GameEntity).
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameRow {
    id: String,
    status: String,
    field: Option<String>,
    winner_id: Option<String>,
    created_at: NaiveDateTime,
}

/// Insertable game model.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGame {
    id: String,
    status: String,
    field: Option<String>,
    winner_id: Option<String>,
}

impl NewGame {
    /// Creates a game row with a freshly generated identifier.
    #[instrument(skip(field))]
    pub fn generated(status: GameStatus, field: Option<String>, winner_id: Option<String>) -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            status.as_ref().to_string(),
            field,
            winner_id,
        )
    }
}

/// Link between a game and one of its players.
#[derive(
    Debug, Clone, Queryable, Identifiable, Associations, Selectable, Insertable, new, Getters,
)]
#[diesel(table_name = schema::game_players)]
#[diesel(primary_key(game_id, user_id))]
#[diesel(belongs_to(GameRow, foreign_key = game_id))]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GamePlayer {
    game_id: String,
    user_id: String,
    seat: i32,
}
