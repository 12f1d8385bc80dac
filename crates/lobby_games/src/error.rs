//! Errors raised while turning a stored row into a [`GameEntity`](crate::GameEntity).

use derive_more::{Display, Error};
use tracing::instrument;

use crate::FieldError;

/// What was wrong with the record.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// An idle game has no players, so no creator.
    #[display("creator should be present in an idle game")]
    MissingCreator,

    /// A won game has no winner.
    #[display("winner should be present in a finished game")]
    MissingWinner,

    /// The board column failed validation.
    #[display("invalid field: {}", _0)]
    InvalidField(FieldError),

    /// The status tag is not one of the known values.
    #[display("unhandled game status: '{}'", _0)]
    UnhandledStatus(String),
}

/// Mapping failure for a single game record, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game '{}' rejected: {} at {}:{}", game_id, kind, file, line)]
pub struct GameError {
    /// What went wrong.
    pub kind: GameErrorKind,
    /// Identifier of the offending record.
    pub game_id: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new mapping error with caller location tracking.
    #[track_caller]
    #[instrument(skip(game_id), fields(game_id = %game_id.as_ref()))]
    pub fn new(game_id: impl AsRef<str>, kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            game_id: game_id.as_ref().to_string(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// True for a missing required relationship (creator or winner).
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self.kind,
            GameErrorKind::MissingCreator | GameErrorKind::MissingWinner
        )
    }

    /// True when the board failed validation.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, GameErrorKind::InvalidField(_))
    }
}
