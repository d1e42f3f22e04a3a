use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Suit of a playing card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
}

impl Suit {
    fn code(&self) -> char {
        match self {
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c {
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Rank of a playing card. Declaration order is the *natural order* used for
/// trump and threshold comparisons: 3 < 4 < ... < 9 < T < J < Q < K < A < 2.
/// Ten and Two are "power" ranks: always a legal single-card play regardless
/// of the running threshold (see [`crate::legality`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
    Rank::Two,
];

pub const ALL_SUITS: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

impl Rank {
    /// Ten always burns the discard pile; Two is always playable and never skips.
    #[inline]
    pub fn is_power(&self) -> bool {
        matches!(self, Rank::Ten | Rank::Two)
    }

    #[inline]
    pub fn is_burn(&self) -> bool {
        matches!(self, Rank::Ten)
    }

    fn code(&self) -> char {
        match self {
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Two => '2',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Play-preference rank used by policies only: T, 2, A, K, Q, J,
    /// 9..3 (descending preference). Larger is more preferred. Deliberately
    /// unrelated to the natural (trump) order above.
    pub fn play_preference(&self) -> u8 {
        match self {
            Rank::Ten => 12,
            Rank::Two => 11,
            Rank::Ace => 10,
            Rank::King => 9,
            Rank::Queen => 8,
            Rank::Jack => 7,
            Rank::Nine => 6,
            Rank::Eight => 5,
            Rank::Seven => 4,
            Rank::Six => 3,
            Rank::Five => 2,
            Rank::Four => 1,
            Rank::Three => 0,
        }
    }
}

/// A single playing card. Ordering compares rank first (the natural order)
/// then suit, purely to give a deterministic canonical sort for serialised
/// multi-card plays.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Two-character wire code: suit then rank, e.g. "ST" for the ten of spades.
    pub fn code(&self) -> String {
        format!("{}{}", self.suit.code(), self.rank.code())
    }

    /// Parses a single two-character card code.
    pub fn parse(code: &str) -> Result<Self, GameError> {
        let mut chars = code.chars();
        let (Some(suit_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(GameError::CardEncodeDecode(code.to_string()));
        };
        let suit = Suit::from_code(suit_char)
            .ok_or_else(|| GameError::CardEncodeDecode(code.to_string()))?;
        let rank = Rank::from_code(rank_char)
            .ok_or_else(|| GameError::CardEncodeDecode(code.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Serialises a list of cards as a comma-separated code list. An empty
/// slice serialises to the empty string.
pub fn serialize_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::code).collect::<Vec<_>>().join(",")
}

/// Parses a comma-separated code list. The empty string denotes the empty set.
pub fn parse_cards(encoded: &str) -> Result<Vec<Card>, GameError> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    encoded.split(',').map(Card::parse).collect()
}

/// Builds the 52-card universe in deterministic (unshuffled) order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_LEN);
    for &suit in ALL_SUITS.iter() {
        for &rank in ALL_RANKS.iter() {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// `serde(with = "cards_wire")` helper: (de)serialises a `Vec<Card>` as the
/// comma-joined code string used on the wire, rather than a JSON array of
/// card objects.
pub mod cards_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Card, parse_cards, serialize_cards};

    pub fn serialize<S>(cards: &[Card], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&serialize_cards(cards))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Card>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_cards(&raw).map_err(serde::de::Error::custom)
    }
}

pub const TABLE_STACKS: usize = 3;
pub const HAND_CARDS: usize = 3;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const DECK_LEN: usize = 52;
/// Number of cards dealt to each player's hand at the start of a game
/// (`HAND_CARDS + TABLE_STACKS` rounds of round-robin dealing).
pub const INITIAL_HAND_SIZE: usize = HAND_CARDS + TABLE_STACKS;
/// Consecutive discard cards of equal rank that trigger a "four in a row" burn.
pub const BURN_RUN_LENGTH: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_has_52_unique_cards() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let unique: std::collections::HashSet<_> = deck.iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn natural_order_places_two_above_ace() {
        assert!(Rank::Two > Rank::Ace);
        assert!(Rank::Ace > Rank::King);
        assert!(Rank::Ten < Rank::Jack);
        assert!(Rank::Three < Rank::Four);
    }

    #[test]
    fn roundtrip_all_codes() {
        for card in full_deck() {
            let code = card.code();
            assert_eq!(Card::parse(&code).unwrap(), card);
        }
    }

    #[test]
    fn serialize_then_deserialize_preserves_order() {
        let cards = vec![
            Card::new(Rank::Ten, Suit::Spades),
            Card::new(Rank::Two, Suit::Hearts),
        ];
        let s = serialize_cards(&cards);
        assert_eq!(s, "ST,H2");
        assert_eq!(parse_cards(&s).unwrap(), cards);
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        assert!(Card::parse("X").is_err());
        assert!(Card::parse("XX").is_err());
        assert!(Card::parse("D1").is_err());
    }

    #[test]
    fn empty_string_is_empty_card_list() {
        assert_eq!(parse_cards("").unwrap(), Vec::<Card>::new());
        assert_eq!(serialize_cards(&[]), "");
    }
}
