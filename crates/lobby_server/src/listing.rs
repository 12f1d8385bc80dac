//! Plain-text and summary views of listed games.

use derive_getters::Getters;
use lobby_games::{GameEntity, GameIdle, Player};
use serde::Serialize;

/// Lobby card for an idle game: who opened it and at what rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct IdleListing {
    /// Game identifier.
    id: String,
    /// Player who opened the game.
    creator: Player,
    /// Everyone seated so far, creator first.
    players: Vec<Player>,
}

impl From<&GameIdle> for IdleListing {
    fn from(game: &GameIdle) -> Self {
        Self {
            id: game.id().clone(),
            creator: game.creator().clone(),
            players: game.players().clone(),
        }
    }
}

/// One line describing a game, as printed by `lobby_server list`.
pub fn describe(game: &GameEntity) -> String {
    match game {
        GameEntity::Idle(idle) => {
            let creator = idle.creator();
            format!(
                "{} [{}] creator: {} (rating {})",
                idle.id(),
                game.status(),
                creator.login(),
                creator.rating()
            )
        }
        GameEntity::GameOver(over) => format!(
            "{} [{}] players: {} winner: {}",
            over.id(),
            game.status(),
            logins(game.players()),
            over.winner().login()
        ),
        _ => format!(
            "{} [{}] players: {}",
            game.id(),
            game.status(),
            logins(game.players())
        ),
    }
}

fn logins(players: &[Player]) -> String {
    players
        .iter()
        .map(|p| p.login().as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
