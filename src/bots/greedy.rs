//! Greedy policy: plays the cheapest legal group available each turn, and
//! seeds its face-down table cards with its highest-value ones. Also the
//! participant used to fill every non-deciding seat during an MCTS rollout
//! ([`crate::bots::mcts::SimpleMctsBot`]).

use std::cmp::Reverse;

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::card::{Card, TABLE_STACKS};
use crate::legality;
use crate::messaging::Update;
use crate::player_state::PlayerState;

/// Always takes the lowest-`play_preference` legal group it can, breaking
/// ties by preferring to shed more cards at once; picks up the discard pile
/// only when nothing is playable.
pub struct GreedyBot {
    player_state: PlayerState,
}

impl GreedyBot {
    pub fn new(player_number: PlayerId) -> Self {
        Self { player_state: PlayerState::new(player_number) }
    }

    /// Wraps an already-populated tracker. Used by the MCTS rollout to drive
    /// every non-deciding seat from a [`PlayerState`] built directly
    /// off the reconstructed concrete game, rather than from a live update
    /// stream.
    pub(crate) fn from_player_state(player_state: PlayerState) -> Self {
        Self { player_state }
    }

    fn pick_cheapest(mut plays: Vec<Vec<Card>>) -> Vec<Card> {
        plays.sort_by_key(|group| (group[0].rank.play_preference(), group.len()));
        plays
            .into_iter()
            .next()
            .expect("caller only calls this with a non-empty play list")
    }
}

impl Bot for GreedyBot {
    fn handle_update(&mut self, update: &Update) {
        self.player_state.handle_update(update);
    }

    fn select_table_cards(&mut self) -> Action {
        let mut hand = self.player_state.hand.hand_stack.clone();
        hand.sort_by_key(|card| Reverse(card.rank.play_preference()));
        hand.truncate(TABLE_STACKS);
        Action::SetTableCards { cards: hand }
    }

    fn select_play(&mut self) -> Action {
        let source = self.player_state.available_source().to_vec();
        let plays: Vec<Vec<Card>> = legality::available_plays(
            &source,
            self.player_state.last_play.as_deref(),
            &self.player_state.discard_pile,
        )
        .into_iter()
        .collect();
        if plays.is_empty() {
            Action::PickUpDiscardPile
        } else {
            Action::PlayKnownCards { cards: Self::pick_cheapest(plays) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn table_cards_keep_the_most_preferred_ranks() {
        let mut bot = GreedyBot::new(0);
        bot.handle_update(&Update::GameInitiated { number_of_players: 2 });
        for c in [
            card(Rank::Three, Suit::Clubs),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Five, Suit::Hearts),
        ] {
            bot.handle_update(&Update::YouDrewCard { cards: vec![c] });
        }
        let Action::SetTableCards { cards } = bot.select_table_cards() else {
            panic!("expected SetTableCards");
        };
        assert!(cards.contains(&card(Rank::Ten, Suit::Spades)));
        assert!(cards.contains(&card(Rank::Two, Suit::Hearts)));
        assert!(cards.contains(&card(Rank::Ace, Suit::Diamonds)));
    }

    #[test]
    fn plays_the_cheapest_available_group() {
        let mut bot = GreedyBot::new(0);
        bot.handle_update(&Update::GameInitiated { number_of_players: 2 });
        for c in [card(Rank::Three, Suit::Clubs), card(Rank::King, Suit::Hearts)] {
            bot.handle_update(&Update::YouDrewCard { cards: vec![c] });
        }
        match bot.select_play() {
            Action::PlayKnownCards { cards } => {
                assert_eq!(cards, vec![card(Rank::Three, Suit::Clubs)]);
            }
            other => panic!("expected a known-cards play, got {other:?}"),
        }
    }

    #[test]
    fn picks_up_when_nothing_is_playable() {
        let mut bot = GreedyBot::new(0);
        bot.handle_update(&Update::GameInitiated { number_of_players: 2 });
        bot.handle_update(&Update::YouDrewCard { cards: vec![card(Rank::Four, Suit::Clubs)] });
        bot.handle_update(&Update::PlayerDrewCard { player_number: 1 });
        bot.handle_update(&Update::PlayFromHand {
            player_number: 1,
            cards: vec![card(Rank::King, Suit::Hearts)],
        });
        assert_eq!(bot.select_play(), Action::PickUpDiscardPile);
    }
}
