//! Uniform-random policy: the simplest conforming [`Bot`], useful as a
//! baseline opponent and as filler when a CLI session does not name enough
//! bots to fill every seat.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::card::TABLE_STACKS;
use crate::legality;
use crate::messaging::Update;
use crate::player_state::PlayerState;

/// Picks uniformly among the legal choices at each decision point, using its
/// own belief state to know what those choices are.
pub struct RandomBot<R: Rng> {
    player_state: PlayerState,
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(player_number: PlayerId, rng: R) -> Self {
        Self { player_state: PlayerState::new(player_number), rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn handle_update(&mut self, update: &Update) {
        self.player_state.handle_update(update);
    }

    fn select_table_cards(&mut self) -> Action {
        let hand = &self.player_state.hand.hand_stack;
        let choices = legality::combinations(hand, TABLE_STACKS);
        let cards = choices
            .choose(&mut self.rng)
            .cloned()
            .expect("hand has at least TABLE_STACKS cards at setup");
        Action::SetTableCards { cards }
    }

    fn select_play(&mut self) -> Action {
        let source = self.player_state.available_source().to_vec();
        let mut choices: Vec<Action> = legality::available_plays(
            &source,
            self.player_state.last_play.as_deref(),
            &self.player_state.discard_pile,
        )
        .into_iter()
        .map(|cards| Action::PlayKnownCards { cards })
        .collect();
        if !self.player_state.discard_pile.is_empty() {
            choices.push(Action::PickUpDiscardPile);
        }
        choices
            .choose(&mut self.rng)
            .cloned()
            .expect("a player with known cards always has at least one available play or a pickup")
    }
}
