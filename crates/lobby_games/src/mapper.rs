//! Raw storage record and its conversion into a [`GameEntity`].

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument, warn};

use crate::{
    Board, GameEntity, GameError, GameErrorKind, GameIdle, GameInProgress, GameOver, GameOverDraw,
    GameStatus, Player, RawField,
};

/// One stored game row with its joined players and optional winner.
///
/// `status` and `field` are kept exactly as storage returned them; nothing
/// is checked or decoded until the record is converted, and the field only
/// for statuses that carry a board.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct GameRecord {
    /// Game identifier.
    id: String,
    /// Raw status tag.
    status: String,
    /// Raw board column, if any.
    field: Option<RawField>,
    /// Participants in storage order.
    players: Vec<Player>,
    /// Winner, if one is linked.
    winner: Option<Player>,
}

impl GameRecord {
    /// Converts a borrowed record, leaving it usable afterwards.
    ///
    /// # Errors
    ///
    /// Same as the [`TryFrom`] conversion.
    pub fn to_entity(&self) -> Result<GameEntity, GameError> {
        GameEntity::try_from(self.clone())
    }
}

impl TryFrom<GameRecord> for GameEntity {
    type Error = GameError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        map_record(record)
    }
}

#[instrument(skip(record), fields(game_id = %record.id, status = %record.status))]
fn map_record(record: GameRecord) -> Result<GameEntity, GameError> {
    let GameRecord {
        id,
        status,
        field,
        players,
        winner,
    } = record;

    let Ok(tag) = status.parse::<GameStatus>() else {
        warn!("Unknown status tag");
        return Err(GameError::new(id, GameErrorKind::UnhandledStatus(status)));
    };

    let entity = match tag {
        GameStatus::Idle => {
            let Some(game) = GameIdle::from_parts(id.clone(), players) else {
                warn!("Idle game without a creator");
                return Err(GameError::new(id, GameErrorKind::MissingCreator));
            };
            GameEntity::Idle(game)
        }
        GameStatus::InProgress => {
            let field = parse_field(&id, field.as_ref())?;
            GameEntity::InProgress(GameInProgress::new(id, players, field))
        }
        GameStatus::GameOverDraw => {
            let field = parse_field(&id, field.as_ref())?;
            GameEntity::GameOverDraw(GameOverDraw::new(id, players, field))
        }
        GameStatus::GameOver => {
            let Some(winner) = winner else {
                warn!("Finished game without a winner");
                return Err(GameError::new(id, GameErrorKind::MissingWinner));
            };
            let field = parse_field(&id, field.as_ref())?;
            GameEntity::GameOver(GameOver::new(id, players, field, winner))
        }
    };

    debug!(players = entity.players().len(), "Record mapped");
    Ok(entity)
}

fn parse_field(id: &str, raw: Option<&RawField>) -> Result<Board, GameError> {
    Board::parse_raw(raw).map_err(|err| {
        warn!(error = %err, "Board rejected");
        GameError::new(id, GameErrorKind::InvalidField(err))
    })
}
