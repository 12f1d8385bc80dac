//! Database repository for games and the users playing them.

use std::collections::HashMap;

use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use lobby_games::{GameEntity, GameError, GameIdle, GameRecord, GameStatus, Player, RawField};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GamePlayer, GameRow, NewGame, NewUser, RepoError, User, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Criteria for [`GameRepository::list_games`]. Empty criteria match every game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, new)]
pub struct GameFilter {
    /// Only games with this stored status.
    status: Option<GameStatus>,
    /// Only games this user takes part in.
    player_id: Option<String>,
}

impl GameFilter {
    /// Matches every game.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches idle games only.
    pub fn idle() -> Self {
        Self::default().with_status(GameStatus::Idle)
    }

    /// Restricts the filter to one status.
    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to games a player takes part in.
    pub fn with_player(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }
}

/// Database repository for game listing and seeding.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path must not be empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection with foreign keys enforced.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        Ok(conn)
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the login is already taken or a database error occurs.
    #[instrument(skip(self, new_user), fields(login = %new_user.login()))]
    pub fn create_user(&self, new_user: NewUser) -> Result<User, DbError> {
        debug!("Creating user");
        let mut conn = self.connection()?;

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = %user.id(), login = %user.login(), "User created");
        Ok(user)
    }

    /// Gets a user by login. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_login(&self, login: &str) -> Result<Option<User>, DbError> {
        debug!(login = %login, "Looking up user by login");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::login.eq(login))
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = user.is_some(), "User lookup finished");
        Ok(user)
    }

    /// Inserts a raw game row and links its players, seated in slice order.
    ///
    /// The row is stored as given: status and field are not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a referenced user does not exist or a database
    /// error occurs. Nothing is written in that case.
    #[instrument(skip(self, new_game), fields(game_id = %new_game.id(), status = %new_game.status()))]
    pub fn create_game(&self, new_game: NewGame, player_ids: &[String]) -> Result<String, DbError> {
        debug!(players = player_ids.len(), "Creating game");
        let mut conn = self.connection()?;

        let links: Vec<GamePlayer> = player_ids
            .iter()
            .zip(0..)
            .map(|(user_id, seat)| GamePlayer::new(new_game.id().clone(), user_id.clone(), seat))
            .collect();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(schema::games::table)
                .values(&new_game)
                .execute(conn)?;
            if !links.is_empty() {
                diesel::insert_into(schema::game_players::table)
                    .values(&links)
                    .execute(conn)?;
            }
            Ok(())
        })?;

        info!("Game created");
        Ok(new_game.id().clone())
    }

    /// Lists games matching `filter`, each mapped into a [`GameEntity`].
    ///
    /// Games come back in storage order (creation time, then id) with
    /// players in seat order.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Database`] on storage failure and
    /// [`RepoError::Mapping`] if any matching row violates the shape its
    /// status requires. One bad row fails the whole listing.
    #[instrument(skip(self))]
    pub fn list_games(&self, filter: &GameFilter) -> Result<Vec<GameEntity>, RepoError> {
        debug!("Listing games");
        let records = self.load_records(filter)?;

        let games = records
            .into_iter()
            .map(|record| {
                GameEntity::try_from(record).inspect_err(|err| {
                    warn!(game_id = %err.game_id, error = %err, "Stored game rejected");
                })
            })
            .collect::<Result<Vec<_>, GameError>>()?;

        info!(count = games.len(), "Games listed");
        Ok(games)
    }

    /// Lists idle games, the open lobby.
    ///
    /// # Errors
    ///
    /// Same as [`list_games`](Self::list_games).
    #[instrument(skip(self))]
    pub fn list_idle_games(&self) -> Result<Vec<GameIdle>, RepoError> {
        let games = self
            .list_games(&GameFilter::idle())?
            .into_iter()
            .filter_map(|game| match game {
                GameEntity::Idle(idle) => Some(idle),
                other => {
                    warn!(
                        game_id = %other.id(),
                        status = %other.status(),
                        "Non-idle game skipped in idle listing"
                    );
                    None
                }
            })
            .collect();
        Ok(games)
    }

    /// Gets one game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Same as [`list_games`](Self::list_games).
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: &str) -> Result<Option<GameEntity>, RepoError> {
        debug!(game_id = %game_id, "Looking up game");
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(game_id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            debug!("Game not found");
            return Ok(None);
        };

        let record = self
            .attach_associations(&mut conn, vec![row])?
            .into_iter()
            .next();
        match record {
            Some(record) => Ok(Some(GameEntity::try_from(record)?)),
            None => Ok(None),
        }
    }

    /// Fetches matching rows and builds raw records with their associations.
    #[instrument(skip(self))]
    fn load_records(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, RepoError> {
        let mut conn = self.connection()?;

        let mut query = schema::games::table
            .select(GameRow::as_select())
            .order((schema::games::created_at.asc(), schema::games::id.asc()))
            .into_boxed();

        if let Some(status) = filter.status() {
            query = query.filter(schema::games::status.eq(status.as_ref().to_string()));
        }

        if let Some(player_id) = filter.player_id() {
            let game_ids: Vec<String> = schema::game_players::table
                .filter(schema::game_players::user_id.eq(player_id.clone()))
                .select(schema::game_players::game_id)
                .load(&mut conn)
                .map_err(DbError::from)?;
            query = query.filter(schema::games::id.eq_any(game_ids));
        }

        let rows = query.load::<GameRow>(&mut conn).map_err(DbError::from)?;
        debug!(rows = rows.len(), "Game rows loaded");

        self.attach_associations(&mut conn, rows)
    }

    /// Joins players (by seat) and winners onto game rows.
    ///
    /// The field text is passed through undecoded.
    fn attach_associations(
        &self,
        conn: &mut SqliteConnection,
        rows: Vec<GameRow>,
    ) -> Result<Vec<GameRecord>, RepoError> {
        let seated = GamePlayer::belonging_to(&rows)
            .inner_join(schema::users::table)
            .order(schema::game_players::seat.asc())
            .select((GamePlayer::as_select(), User::as_select()))
            .load::<(GamePlayer, User)>(conn)
            .map_err(DbError::from)?;
        let players_per_game = seated.grouped_by(&rows);

        let winner_ids: Vec<String> = rows.iter().filter_map(|row| row.winner_id().clone()).collect();
        let winners: HashMap<String, Player> = schema::users::table
            .filter(schema::users::id.eq_any(winner_ids))
            .select(User::as_select())
            .load::<User>(conn)
            .map_err(DbError::from)?
            .into_iter()
            .map(|user| (user.id().clone(), user.to_player()))
            .collect();

        let records = rows
            .into_iter()
            .zip(players_per_game)
            .map(|(row, seated)| {
                let players = seated.iter().map(|(_, user)| user.to_player()).collect();
                let winner = row
                    .winner_id()
                    .as_ref()
                    .and_then(|id| winners.get(id).cloned());
                GameRecord::new(
                    row.id().clone(),
                    row.status().clone(),
                    row.field().clone().map(RawField::Text),
                    players,
                    winner,
                )
            })
            .collect::<Vec<_>>();
        Ok(records)
    }
}
