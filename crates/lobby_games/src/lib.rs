//! Lobby Games - typed tic-tac-toe game entities
//!
//! Stored game rows are loosely typed: a free-form status string, a board
//! kept as an untyped JSON column and optional associations. This crate
//! turns one such row into exactly one variant of [`GameEntity`], or fails
//! with a [`GameError`] naming the violated invariant.
//!
//! # Example
//!
//! ```
//! use lobby_games::{GameEntity, GameRecord, GameStatus, Player};
//!
//! let creator = Player::new("p1".to_string(), "alice".to_string(), 1000);
//! let record = GameRecord::new(
//!     "g1".to_string(),
//!     "idle".to_string(),
//!     None,
//!     vec![creator.clone()],
//!     None,
//! );
//!
//! let entity = GameEntity::try_from(record).expect("valid idle game");
//! assert_eq!(entity.status(), GameStatus::Idle);
//! assert_eq!(entity.players(), &[creator]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod entity;
mod error;
mod mapper;

// Crate-level exports - Board
pub use board::{BOARD_SIZE, Board, Cell, FieldError, Mark, RawField};

// Crate-level exports - Entities
pub use entity::{GameEntity, GameIdle, GameInProgress, GameOver, GameOverDraw, GameStatus, Player};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Mapper
pub use mapper::GameRecord;
