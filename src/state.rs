//! Read-only snapshots of a running game, used for CLI rendering and for
//! handing a concrete perspective to a bot without exposing the engine's
//! mutable internals.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, MAX_PLAYERS, MIN_PLAYERS, TABLE_STACKS};
use crate::error::GameError;

/// Fixed configuration for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub number_of_players: usize,
    pub table_stacks: usize,
    pub max_turns: usize,
}

impl GameSettings {
    pub fn new(number_of_players: usize, max_turns: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&number_of_players) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 4",
            ));
        }
        if max_turns == 0 {
            return Err(GameError::InvalidConfiguration(
                "max_turns must be positive",
            ));
        }
        Ok(Self {
            number_of_players,
            table_stacks: TABLE_STACKS,
            max_turns,
        })
    }
}

/// Public view of a single TableStack: the face-up card if any, and whether
/// a hidden bottom card remains (the stack has not yet been consumed).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStackPublic {
    pub top_card: Option<Card>,
    pub has_hidden_card: bool,
}

/// Portion of a player's state that every other player may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub hand_size: usize,
    pub table_stacks: Vec<TableStackPublic>,
    pub is_current: bool,
    pub has_won: bool,
}

/// Status of the entire game (turn-level state machine's terminal states).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won { winner: PlayerId },
    /// `max_turns` elapsed with no winner. Not reachable under the rules as
    /// written, but guards `Game::run` against a pathological cycle of
    /// picked-up, re-discarded cards that never triggers a burn.
    Draw,
}

/// Full-information snapshot from one player's perspective: public state for
/// every seat plus the viewer's own hand and table cards in full.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub deck_count: usize,
    pub discard_pile: Vec<Card>,
    pub eliminated_count: usize,
    pub last_play: Option<Vec<Card>>,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}
