use serde::{Deserialize, Serialize};

use crate::card::{Card, cards_wire};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// The kind of blocking request the engine can issue to a player.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RequestType {
    SetTableCards,
    Play,
}

/// A player's reply to a request, and the wire-level `Response` shape
/// simultaneously: `{action, cards?}` where `cards` is a comma-joined code
/// list rather than a JSON array. `PLAY_FACE_DOWN` is deliberately absent —
/// it is never a player-chosen action, only something the engine issues to
/// itself, so it is unrepresentable here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Action {
    #[serde(rename = "SET_TABLE_CARDS")]
    SetTableCards {
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PLAY_KNOWN_CARDS")]
    PlayKnownCards {
        #[serde(with = "cards_wire")]
        cards: Vec<Card>,
    },
    #[serde(rename = "PICK_UP_DISCARD_PILE")]
    PickUpDiscardPile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    #[test]
    fn wire_shape_matches_spec() {
        let action = Action::PlayKnownCards {
            cards: vec![Card::new(Rank::Queen, Suit::Hearts)],
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"PLAY_KNOWN_CARDS","cards":"HQ"}"#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn pickup_has_no_cards_field() {
        let action = Action::PickUpDiscardPile;
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"PICK_UP_DISCARD_PILE"}"#);
    }
}
