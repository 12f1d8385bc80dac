//! Game entities: the closed, status-tagged union handed to presentation code.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::Board;

/// Read-only projection of a user taking part in a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Player {
    /// Player identifier.
    id: String,
    /// Login name.
    login: String,
    /// Rating.
    rating: i32,
}

/// Status tag as stored in the `games.status` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum GameStatus {
    /// Waiting for players.
    Idle,
    /// Being played.
    InProgress,
    /// Finished with a winner.
    GameOver,
    /// Finished without a winner.
    GameOverDraw,
}

/// A game waiting for opponents. Always has at least one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameIdle {
    /// Game identifier.
    id: String,
    /// Participants, creator first.
    players: Vec<Player>,
}

impl GameIdle {
    /// The player who opened the game: first in list order.
    pub fn creator(&self) -> &Player {
        // Non-empty by construction in the mapper.
        &self.players[0]
    }

    pub(crate) fn from_parts(id: String, players: Vec<Player>) -> Option<Self> {
        if players.is_empty() {
            None
        } else {
            Some(Self { id, players })
        }
    }
}

/// A game being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct GameInProgress {
    id: String,
    players: Vec<Player>,
    field: Board,
}

/// A finished game with a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct GameOver {
    id: String,
    players: Vec<Player>,
    field: Board,
    winner: Player,
}

/// A finished game without a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, new)]
pub struct GameOverDraw {
    id: String,
    players: Vec<Player>,
    field: Board,
}

/// Validated game, one variant per status.
///
/// Serializes with an inline `status` tag, e.g.
/// `{"status":"gameOver","id":"..","players":[..],"field":[..],"winner":{..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GameEntity {
    /// Waiting for players.
    Idle(GameIdle),
    /// Being played.
    InProgress(GameInProgress),
    /// Finished with a winner.
    GameOver(GameOver),
    /// Finished without a winner.
    GameOverDraw(GameOverDraw),
}

impl GameEntity {
    /// Returns the game identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Idle(game) => game.id().as_str(),
            Self::InProgress(game) => game.id().as_str(),
            Self::GameOver(game) => game.id().as_str(),
            Self::GameOverDraw(game) => game.id().as_str(),
        }
    }

    /// Returns the status tag of this variant.
    pub fn status(&self) -> GameStatus {
        match self {
            Self::Idle(_) => GameStatus::Idle,
            Self::InProgress(_) => GameStatus::InProgress,
            Self::GameOver(_) => GameStatus::GameOver,
            Self::GameOverDraw(_) => GameStatus::GameOverDraw,
        }
    }

    /// Returns the participants in list order.
    pub fn players(&self) -> &[Player] {
        match self {
            Self::Idle(game) => game.players().as_slice(),
            Self::InProgress(game) => game.players().as_slice(),
            Self::GameOver(game) => game.players().as_slice(),
            Self::GameOverDraw(game) => game.players().as_slice(),
        }
    }

    /// Returns the board, absent for idle games.
    pub fn field(&self) -> Option<&Board> {
        match self {
            Self::Idle(_) => None,
            Self::InProgress(game) => Some(game.field()),
            Self::GameOver(game) => Some(game.field()),
            Self::GameOverDraw(game) => Some(game.field()),
        }
    }

    /// Returns the winner, present only for won games.
    pub fn winner(&self) -> Option<&Player> {
        match self {
            Self::GameOver(game) => Some(game.winner()),
            _ => None,
        }
    }
}
