use crate::model::card::{Card, Category};
use crate::model::player::PlayerId;
use thiserror::Error;

pub const MIN_PLAYERS: usize = 2;

/// Setup failures. Fatal: no game is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("at least 2 players are required, got {count}")]
    TooFewPlayers { count: usize },
    #[error("the {0} catalog is empty")]
    EmptyCategory(Category),
    #[error("{0} is dealt twice or is not in the catalog")]
    MisdealtCard(Card),
    #[error("{0} was never dealt")]
    UndealtCard(Card),
}

/// Rejections of a single action. The game state is left untouched and the
/// turn is not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{0} is not part of this game")]
    InvalidInput(Card),
    #[error("there is no player at seat {0}")]
    UnknownPlayer(usize),
    #[error("you must move to a room before suggesting")]
    PrecedingAction,
    #[error("not your turn: waiting for {expected}, got {actual}")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    #[error("{0} has been eliminated")]
    Eliminated(PlayerId),
    #[error("the game is over")]
    GameOver,
}
