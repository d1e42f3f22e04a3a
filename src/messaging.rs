//! Messaging adapter (component C): multiplexes per-player observation
//! events and blocking requests onto a synchronous request/reply channel.
//! The engine only depends on the [`Messaging`] trait; this crate ships a
//! single in-process implementation, [`BotMessaging`], that routes directly
//! to [`crate::bot::Bot`] trait objects. A real network transport is an
//! explicit non-goal and would be a separate adapter built against the
//! same trait.

use serde::{Deserialize, Serialize};

use crate::action::{Action, PlayerId, RequestType};
use crate::bot::Bot;
use crate::card::{Card, cards_wire};

/// An observation event emitted by the rules engine. Each variant carries
/// exactly the fields that event needs, so e.g. a `BurnDiscardPile` with a
/// `player_number` is unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "update_type")]
pub enum Update {
    #[serde(rename = "GAME_INITIATED")]
    GameInitiated { number_of_players: usize },
    #[serde(rename = "DECK_DEPLETED")]
    DeckDepleted,
    #[serde(rename = "PLAYER_WINS")]
    PlayerWins { player_number: PlayerId },
    #[serde(rename = "YOU_DREW_CARD")]
    YouDrewCard {
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAYER_DREW_CARD")]
    PlayerDrewCard { player_number: PlayerId },
    #[serde(rename = "YOU_PICKED_UP_DISCARD_PILE")]
    YouPickedUpDiscardPile {
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAYER_PICKED_UP_DISCARD_PILE")]
    PlayerPickedUpDiscardPile { player_number: PlayerId },
    #[serde(rename = "BURN_DISCARD_PILE")]
    BurnDiscardPile,
    #[serde(rename = "PLAY_FROM_HAND")]
    PlayFromHand {
        player_number: PlayerId,
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAY_FROM_TABLE")]
    PlayFromTable {
        player_number: PlayerId,
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAY_FROM_FACEDOWN_SUCCESS")]
    PlayFromFacedownSuccess {
        player_number: PlayerId,
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAY_FROM_FACEDOWN_FAILURE")]
    PlayFromFacedownFailure {
        player_number: PlayerId,
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAY_FROM_FACEUP_FAILURE")]
    PlayFromFaceupFailure {
        player_number: PlayerId,
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "SET_TABLE_CARDS")]
    SetTableCards {
        player_number: PlayerId,
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "INVALID_ACTION")]
    InvalidAction { message: String },
}

/// Transport-agnostic request/reply channel the rules engine drives.
///
/// `request` is blocking: in the in-process [`BotMessaging`] adapter this
/// just means a synchronous method call, but a future networked adapter
/// would block on a socket read here. There is no concurrency anywhere in
/// this crate — only one request is outstanding at a time.
pub trait Messaging {
    fn send_update(&mut self, player: PlayerId, update: Update);
    fn request(&mut self, player: PlayerId, request_type: RequestType) -> Action;
}

/// The only [`Messaging`] implementation this crate ships: routes updates
/// and requests directly to in-process [`Bot`] trait objects, one per seat.
pub struct BotMessaging {
    bots: Vec<Box<dyn Bot>>,
}

impl BotMessaging {
    pub fn new(bots: Vec<Box<dyn Bot>>) -> Self {
        Self { bots }
    }
}

impl Messaging for BotMessaging {
    fn send_update(&mut self, player: PlayerId, update: Update) {
        self.bots[player].handle_update(&update);
    }

    fn request(&mut self, player: PlayerId, request_type: RequestType) -> Action {
        match request_type {
            RequestType::SetTableCards => self.bots[player].select_table_cards(),
            RequestType::Play => self.bots[player].select_play(),
        }
    }
}
