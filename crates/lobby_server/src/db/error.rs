//! Database error types.

use derive_more::{Display, Error, From};
use lobby_games::GameError;
use tracing::instrument;

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

/// Failure of a repository operation.
///
/// Storage failures and record mapping failures are kept apart so callers
/// can tell a broken connection from a broken row.
#[derive(Debug, Clone, Display, Error, From)]
pub enum RepoError {
    /// The store could not be read or written.
    #[display("{}", _0)]
    Database(DbError),
    /// A stored game violates the shape required by its status.
    #[display("{}", _0)]
    Mapping(GameError),
}

impl From<diesel::result::Error> for RepoError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(DbError::from(err))
    }
}
