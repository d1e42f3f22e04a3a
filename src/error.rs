use thiserror::Error;

use crate::action::PlayerId;

/// Errors that can occur while driving a game to completion.
///
/// `InvariantViolation` never reaches a public `Result`: conservation and
/// state-machine invariants are checked with `assert!`/`debug_assert!`
/// inside [`crate::game::Game`] and abort the process, since a failure there
/// indicates a bug in the engine rather than a bad player action.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("malformed card code: {0}")]
    CardEncodeDecode(String),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Recoverable problems with a single player action. Caught at the
/// engine's turn boundary and converted into an `INVALID_ACTION` observation
/// that re-prompts the same actor; the actor does not change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("no cards were supplied for the play")]
    NoCardsPlayed,
    #[error("cards must all share one rank")]
    MixedRanks,
    #[error("requested cards are not available in the expected source")]
    CardsNotAvailable,
    #[error("play is not in the set of available plays for the current state")]
    IllegalPlay,
    #[error("discard pile is empty")]
    EmptyDiscardPile,
    #[error("expected exactly {expected} distinct table cards, received {received}")]
    TableCardSelection { expected: usize, received: usize },
    #[error("response shape is invalid for the requested action")]
    ProtocolError,
}
