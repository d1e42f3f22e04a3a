//! Interactive human-controlled seat. Renders only what this player's own
//! belief state would know — never the authoritative [`Game`], so a human
//! bot cannot see anything a real socket-connected player could not.

use std::io::{self, Write};

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::card::TABLE_STACKS;
use crate::legality;
use crate::messaging::Update;
use crate::player_state::PlayerState;
use crate::visualize::{describe_action, render_player_state};

/// Queries a human via standard input at every decision point.
pub struct HumanBot {
    name: String,
    player_state: PlayerState,
}

impl HumanBot {
    pub fn new(player_number: PlayerId, name: impl Into<String>) -> Self {
        Self { name: name.into(), player_state: PlayerState::new(player_number) }
    }
}

impl Bot for HumanBot {
    fn handle_update(&mut self, update: &Update) {
        self.player_state.handle_update(update);
    }

    fn select_table_cards(&mut self) -> Action {
        let hand = self.player_state.hand.hand_stack.clone();
        let options: Vec<Action> = legality::combinations(&hand, TABLE_STACKS)
            .into_iter()
            .map(|cards| Action::SetTableCards { cards })
            .collect();
        self.prompt("Choose your face-down table cards", &options)
    }

    fn select_play(&mut self) -> Action {
        let source = self.player_state.available_source().to_vec();
        let mut options: Vec<Action> = legality::available_plays(
            &source,
            self.player_state.last_play.as_deref(),
            &self.player_state.discard_pile,
        )
        .into_iter()
        .map(|cards| Action::PlayKnownCards { cards })
        .collect();
        if !self.player_state.discard_pile.is_empty() {
            options.push(Action::PickUpDiscardPile);
        }
        self.prompt("Your turn", &options)
    }
}

impl HumanBot {
    fn prompt(&self, title: &str, options: &[Action]) -> Action {
        assert!(!options.is_empty(), "a human bot is never prompted with zero options");
        loop {
            println!("\n=== {} ({}) ===", title, self.name);
            println!("{}", render_player_state(&self.player_state));
            println!("Options:");
            for (index, action) in options.iter().enumerate() {
                println!("  [{index}] {}", describe_action(action));
            }
            print!("Selection: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                eprintln!("failed to read input");
                continue;
            }
            let trimmed = input.trim();
            let Ok(choice) = trimmed.parse::<usize>() else {
                println!("Invalid input: '{trimmed}'. Please enter a number.");
                continue;
            };
            if let Some(action) = options.get(choice) {
                return action.clone();
            }
            println!("Index out of range. Please choose a valid option.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::full_deck;

    #[test]
    fn table_card_options_are_three_card_groups() {
        let mut bot = HumanBot::new(0, "Ada");
        bot.handle_update(&Update::GameInitiated { number_of_players: 2 });
        for card in full_deck().into_iter().take(6) {
            bot.handle_update(&Update::YouDrewCard { cards: vec![card] });
        }
        let hand = bot.player_state.hand.hand_stack.clone();
        let options = legality::combinations(&hand, TABLE_STACKS);
        assert!(options.iter().all(|group| group.len() == TABLE_STACKS));
        assert!(!options.is_empty());
    }
}
