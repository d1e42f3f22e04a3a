//! Player-state tracker & reconstructor (component D). Each player process
//! (human or bot) maintains one of these from the observation stream it
//! receives; it never sees the engine's real state directly.
//! [`PlayerState::create_game_state`] reconstructs a concrete, fully-dealt
//! [`Game`] consistent with everything this tracker has observed, filling
//! in the rest at random — the basis for the one-ply Monte Carlo policy.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::PlayerId;
use crate::card::{Card, DECK_LEN, full_deck};
use crate::error::GameError;
use crate::game::{Game, ReconstructedHand};
use crate::messaging::Update;

/// What this player knows about one opponent.
#[derive(Clone, Debug, Default)]
pub struct OpponentHand {
    /// Cards demonstrably in this opponent's hand (picked up from the
    /// discard pile, or returned after a failed face-down/face-up play).
    pub known_hand: Vec<Card>,
    /// Cards known to exist in the hand but whose identity is unknown.
    pub hand_count_unknown: usize,
    /// Known face-up table cards.
    pub table_stack: Vec<Card>,
    /// Count of TableStacks still remaining (face-up known + face-down hidden).
    pub table_stacks: usize,
}

/// The tracked player's own hand — fully known by construction.
#[derive(Clone, Debug, Default)]
pub struct OwnHand {
    pub hand_stack: Vec<Card>,
    pub table_stack: Vec<Card>,
    pub table_stacks: usize,
}

/// Belief state maintained by one player across the whole game.
pub struct PlayerState {
    pub player_number: PlayerId,
    pub number_of_players: usize,
    pub deck_length: usize,
    pub last_play: Option<Vec<Card>>,
    pub discard_pile: Vec<Card>,
    pub eliminated_cards: Vec<Card>,
    pub win: Option<bool>,
    pub hand: OwnHand,
    pub opponent_hands: BTreeMap<PlayerId, OpponentHand>,
}

impl PlayerState {
    /// A tracker with no belief yet; populated on the first `GAME_INITIATED`
    /// update via [`PlayerState::handle_update`].
    pub fn new(player_number: PlayerId) -> Self {
        Self {
            player_number,
            number_of_players: 0,
            deck_length: 0,
            last_play: None,
            discard_pile: Vec::new(),
            eliminated_cards: Vec::new(),
            win: None,
            hand: OwnHand::default(),
            opponent_hands: BTreeMap::new(),
        }
    }

    /// Applies one observation event, maintaining every belief invariant.
    /// Panics (via `assert!`) if card conservation is violated — that is a
    /// bug in the engine or in this tracker, never a recoverable condition.
    pub fn handle_update(&mut self, update: &Update) {
        match update {
            Update::GameInitiated { number_of_players } => self.build_state(*number_of_players),
            Update::DeckDepleted => assert_eq!(self.deck_length, 0, "deck_length out of sync at depletion"),
            Update::PlayerWins { player_number } => {
                self.win = Some(*player_number == self.player_number);
            }
            Update::YouDrewCard { cards } => self.you_drew_card(cards),
            Update::PlayerDrewCard { player_number } => self.player_drew_card(*player_number),
            Update::YouPickedUpDiscardPile { cards } => self.you_picked_up_discard_pile(cards),
            Update::PlayerPickedUpDiscardPile { player_number } => {
                self.opponent_picked_up_discard_pile(*player_number)
            }
            Update::BurnDiscardPile => self.burn_discard_pile(),
            Update::PlayFromHand { player_number, cards } => self.play_from_hand(*player_number, cards),
            Update::PlayFromTable { player_number, cards } => self.play_from_table(*player_number, cards),
            Update::PlayFromFacedownSuccess { player_number, cards } => {
                self.play_from_facedown_success(*player_number, cards)
            }
            Update::PlayFromFacedownFailure { player_number, cards } => {
                self.play_from_facedown_failure(*player_number, cards)
            }
            Update::PlayFromFaceupFailure { player_number, cards } => {
                self.play_from_faceup_failure(*player_number, cards)
            }
            Update::SetTableCards { player_number, cards } => self.set_table_cards(*player_number, cards),
            Update::InvalidAction { .. } => {}
        }
        assert_eq!(self.sum_cards(), DECK_LEN, "belief conservation invariant violated");
    }

    /// Belief conservation: deck_length + discard + eliminated + own visible
    /// + Σ opponent(known + unknown + face-up + table-stack count) = 52.
    pub fn sum_cards(&self) -> usize {
        let common = self.deck_length + self.discard_pile.len() + self.eliminated_cards.len();
        let own = self.hand.hand_stack.len() + self.hand.table_stack.len() + self.hand.table_stacks;
        let opponents: usize = self
            .opponent_hands
            .values()
            .map(|o| o.known_hand.len() + o.table_stack.len() + o.table_stacks + o.hand_count_unknown)
            .sum();
        common + own + opponents
    }

    fn build_state(&mut self, number_of_players: usize) {
        self.number_of_players = number_of_players;
        self.deck_length = DECK_LEN - crate::card::TABLE_STACKS * number_of_players;
        self.last_play = None;
        self.discard_pile.clear();
        self.eliminated_cards.clear();
        self.win = None;
        self.hand = OwnHand { table_stacks: crate::card::TABLE_STACKS, ..OwnHand::default() };
        self.opponent_hands = (0..number_of_players)
            .filter(|&p| p != self.player_number)
            .map(|p| (p, OpponentHand { table_stacks: crate::card::TABLE_STACKS, ..OpponentHand::default() }))
            .collect();
    }

    fn you_drew_card(&mut self, cards: &[Card]) {
        self.deck_length -= 1;
        self.hand.hand_stack.extend(cards.iter().copied());
    }

    fn player_drew_card(&mut self, player_number: PlayerId) {
        self.deck_length -= 1;
        self.opponent_hands.get_mut(&player_number).unwrap().hand_count_unknown += 1;
    }

    fn you_picked_up_discard_pile(&mut self, cards: &[Card]) {
        self.hand.hand_stack.extend(cards.iter().copied());
        self.discard_pile.clear();
        self.last_play = None;
    }

    fn opponent_picked_up_discard_pile(&mut self, player_number: PlayerId) {
        let cards = std::mem::take(&mut self.discard_pile);
        self.opponent_hands.get_mut(&player_number).unwrap().known_hand.extend(cards);
        self.last_play = None;
    }

    fn burn_discard_pile(&mut self) {
        let cards = std::mem::take(&mut self.discard_pile);
        self.eliminated_cards.extend(cards);
        self.last_play = None;
    }

    fn play_from_hand(&mut self, player_number: PlayerId, cards: &[Card]) {
        self.last_play = Some(cards.to_vec());
        self.discard_pile.extend(cards.iter().copied());
        if player_number == self.player_number {
            remove_all(&mut self.hand.hand_stack, cards);
        } else {
            self.remove_from_opponent_hand(player_number, cards);
        }
    }

    fn play_from_table(&mut self, player_number: PlayerId, cards: &[Card]) {
        self.last_play = Some(cards.to_vec());
        self.discard_pile.extend(cards.iter().copied());
        if player_number == self.player_number {
            remove_all(&mut self.hand.table_stack, cards);
        } else {
            remove_all(&mut self.opponent_hands.get_mut(&player_number).unwrap().table_stack, cards);
        }
    }

    fn play_from_facedown_success(&mut self, player_number: PlayerId, cards: &[Card]) {
        self.last_play = Some(cards.to_vec());
        self.discard_pile.extend(cards.iter().copied());
        if player_number == self.player_number {
            self.hand.table_stacks -= 1;
        } else {
            self.opponent_hands.get_mut(&player_number).unwrap().table_stacks -= 1;
        }
    }

    fn play_from_facedown_failure(&mut self, player_number: PlayerId, cards: &[Card]) {
        if player_number == self.player_number {
            self.hand.hand_stack.extend(cards.iter().copied());
            self.hand.table_stacks -= 1;
        } else {
            let opponent = self.opponent_hands.get_mut(&player_number).unwrap();
            opponent.known_hand.extend(cards.iter().copied());
            opponent.table_stacks -= 1;
        }
    }

    fn play_from_faceup_failure(&mut self, player_number: PlayerId, cards: &[Card]) {
        if player_number == self.player_number {
            self.hand.hand_stack.extend(cards.iter().copied());
            remove_all(&mut self.hand.table_stack, cards);
        } else {
            let opponent = self.opponent_hands.get_mut(&player_number).unwrap();
            opponent.known_hand.extend(cards.iter().copied());
            remove_all(&mut opponent.table_stack, cards);
        }
    }

    fn set_table_cards(&mut self, player_number: PlayerId, cards: &[Card]) {
        if player_number == self.player_number {
            self.hand.table_stack.extend(cards.iter().copied());
            remove_all(&mut self.hand.hand_stack, cards);
        } else {
            let opponent = self.opponent_hands.get_mut(&player_number).unwrap();
            opponent.table_stack.extend(cards.iter().copied());
            opponent.hand_count_unknown -= cards.len();
        }
    }

    /// Removes `cards` from `known_hand` where present; any remainder is
    /// assumed to have come from the unknown pool and decrements that count.
    fn remove_from_opponent_hand(&mut self, player_number: PlayerId, cards: &[Card]) {
        let opponent = self.opponent_hands.get_mut(&player_number).unwrap();
        let mut unresolved = 0;
        for &card in cards {
            if let Some(pos) = opponent.known_hand.iter().position(|&c| c == card) {
                opponent.known_hand.remove(pos);
            } else {
                unresolved += 1;
            }
        }
        opponent.hand_count_unknown -= unresolved;
    }

    /// Source stack a `PLAY_KNOWN_CARDS` action would draw from right now:
    /// hand if non-empty, else known face-up table cards.
    pub fn available_source(&self) -> &[Card] {
        if !self.hand.hand_stack.is_empty() { &self.hand.hand_stack } else { &self.hand.table_stack }
    }

    /// Reconstructor: produces a concrete `Game` consistent with this
    /// belief, with every unknown card drawn at random from the unseen-card
    /// pool via `rng` (injected, for reproducible rollouts).
    pub fn create_game_state(&self, rng: &mut impl Rng) -> Result<Game, GameError> {
        let mut deck = full_deck();
        deck.shuffle(rng);

        let mut known = HashSet::new();
        known.extend(self.hand.hand_stack.iter().copied());
        known.extend(self.hand.table_stack.iter().copied());
        known.extend(self.discard_pile.iter().copied());
        known.extend(self.eliminated_cards.iter().copied());
        for opponent in self.opponent_hands.values() {
            known.extend(opponent.known_hand.iter().copied());
            known.extend(opponent.table_stack.iter().copied());
        }
        deck.retain(|c| !known.contains(c));

        let mut hands = Vec::with_capacity(self.number_of_players);
        for player_number in 0..self.number_of_players {
            if player_number == self.player_number {
                let table_stacks =
                    deal_bottom_cards(&mut deck, self.hand.table_stacks, &self.hand.table_stack);
                hands.push(ReconstructedHand { hand_stack: self.hand.hand_stack.clone(), table_stacks });
            } else {
                let opponent = &self.opponent_hands[&player_number];
                let table_stacks = deal_bottom_cards(&mut deck, opponent.table_stacks, &opponent.table_stack);
                let mut hand_stack = opponent.known_hand.clone();
                for _ in 0..opponent.hand_count_unknown {
                    hand_stack.push(deck.pop().expect("deck has enough unknown cards"));
                }
                hands.push(ReconstructedHand { hand_stack, table_stacks });
            }
        }

        assert_eq!(deck.len(), self.deck_length, "reconstructed deck length does not match tracked belief");

        Game::from_reconstruction(
            self.player_number,
            deck,
            self.discard_pile.clone(),
            self.eliminated_cards.clone(),
            self.last_play.clone(),
            hands,
        )
    }
}

/// Deals a random `bottom_card` for each of `count` remaining TableStacks.
/// The first `known_top_cards.len()` stacks also carry their already-observed
/// face-up card as `top_card`; the rest are still fully face-down.
fn deal_bottom_cards(deck: &mut Vec<Card>, count: usize, known_top_cards: &[Card]) -> Vec<(Card, Option<Card>)> {
    (0..count)
        .map(|i| {
            let bottom_card = deck.pop().expect("deck has enough cards for table stacks");
            let top_card = known_top_cards.get(i).copied();
            (bottom_card, top_card)
        })
        .collect()
}

/// Removes each of `cards` from `from` (first match per card); panics if a
/// card is missing, since by the time these updates arrive the cards must
/// already be tracked as present (these update rules are only ever applied
/// to engine-emitted events, which are authoritative).
fn remove_all(from: &mut Vec<Card>, cards: &[Card]) {
    for &card in cards {
        let pos = from.iter().position(|&c| c == card).expect("tracked card missing from expected stack");
        from.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn game_initiated_resets_belief_and_conserves_cards() {
        let mut state = PlayerState::new(0);
        state.handle_update(&Update::GameInitiated { number_of_players: 2 });
        assert_eq!(state.deck_length, DECK_LEN - 2 * crate::card::TABLE_STACKS);
        assert_eq!(state.sum_cards(), DECK_LEN);
    }

    #[test]
    fn you_drew_card_adds_to_own_hand_and_decrements_deck() {
        let mut state = PlayerState::new(0);
        state.handle_update(&Update::GameInitiated { number_of_players: 2 });
        let before = state.deck_length;
        state.handle_update(&Update::YouDrewCard { cards: vec![card(Rank::Ace, Suit::Spades)] });
        assert_eq!(state.deck_length, before - 1);
        assert!(state.hand.hand_stack.contains(&card(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn opponent_pickup_moves_discard_into_known_hand() {
        let mut state = PlayerState::new(0);
        state.handle_update(&Update::GameInitiated { number_of_players: 2 });
        state.discard_pile = vec![card(Rank::Nine, Suit::Hearts)];
        state.handle_update(&Update::PlayerPickedUpDiscardPile { player_number: 1 });
        assert!(state.discard_pile.is_empty());
        assert!(state.last_play.is_none());
        assert!(state.opponent_hands[&1].known_hand.contains(&card(Rank::Nine, Suit::Hearts)));
    }

    #[test]
    fn reconstructor_produces_a_game_consistent_with_tracked_deck_length() {
        let mut state = PlayerState::new(0);
        state.handle_update(&Update::GameInitiated { number_of_players: 2 });
        state.handle_update(&Update::YouDrewCard { cards: vec![card(Rank::Ace, Suit::Spades)] });
        state.handle_update(&Update::PlayerDrewCard { player_number: 1 });

        let mut rng = StdRng::seed_from_u64(7);
        let game = state.create_game_state(&mut rng).unwrap();
        assert_eq!(game.player_turn(), 0);
    }
}
