//! CLI rendering helpers. [`render_state`] shows the full-information
//! spectator view used by `bin/simulate`; [`render_player_state`] shows only
//! what a single tracked belief knows, which is what [`HumanBot`] renders
//! for its player — neither ever leaks more than its source knows.
//!
//! [`HumanBot`]: crate::bots::HumanBot

use std::fmt::Write;

use crate::action::Action;
use crate::card::serialize_cards;
use crate::player_state::PlayerState;
use crate::state::{GameStateView, GameStatus};

pub fn render_state(state: &GameStateView) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Won { winner } => format!("Won (player {winner})"),
        GameStatus::Draw => String::from("Draw"),
    };
    let _ = writeln!(out, "Status: {status}");
    let _ = writeln!(
        out,
        "Current player: {}{}",
        state.current_player,
        if state.current_player == state.self_player { " (You)" } else { "" }
    );
    let _ = writeln!(
        out,
        "Deck: {}  Discard: {}  Eliminated: {}",
        state.deck_count,
        state.discard_pile.len(),
        state.eliminated_count
    );
    let _ = writeln!(
        out,
        "Last play: {}",
        state.last_play.as_deref().map(serialize_cards).unwrap_or_else(|| String::from("-"))
    );
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player { " (You)" } else { "" };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let stacks: Vec<String> = player
            .table_stacks
            .iter()
            .map(|stack| match stack.top_card {
                Some(card) => card.code(),
                None => String::from("--"),
            })
            .collect();
        let _ = writeln!(
            out,
            "  Player {}{} - hand {} - table [{}]{}{}",
            player.id,
            label_you,
            player.hand_size,
            stacks.join(" "),
            if player.has_won { " WON" } else { "" },
            current_tag
        );
    }
    if state.hand.is_empty() {
        let _ = writeln!(out, "Your hand: (empty)");
    } else {
        let _ = writeln!(out, "Your hand: {}", serialize_cards(&state.hand));
    }
    out
}

/// Renders one player's own belief: its own hand/table in full, and
/// whatever it has actually observed about every opponent.
pub fn render_player_state(state: &PlayerState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Seat {} of {}", state.player_number, state.number_of_players);
    let _ = writeln!(out, "Deck: {}  Discard: {}", state.deck_length, state.discard_pile.len());
    let _ = writeln!(
        out,
        "Last play: {}",
        state.last_play.as_deref().map(serialize_cards).unwrap_or_else(|| String::from("-"))
    );
    let _ = writeln!(
        out,
        "Your hand: {}  table: {}  face-down remaining: {}",
        serialize_cards(&state.hand.hand_stack),
        serialize_cards(&state.hand.table_stack),
        state.hand.table_stacks.saturating_sub(state.hand.table_stack.len()),
    );
    for (player, opponent) in &state.opponent_hands {
        let _ = writeln!(
            out,
            "  Player {player}: known {} + {} unknown, table {} + {} hidden",
            serialize_cards(&opponent.known_hand),
            opponent.hand_count_unknown,
            serialize_cards(&opponent.table_stack),
            opponent.table_stacks.saturating_sub(opponent.table_stack.len()),
        );
    }
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::SetTableCards { cards } => format!("Set table cards: {}", serialize_cards(cards)),
        Action::PlayKnownCards { cards } => format!("Play: {}", serialize_cards(cards)),
        Action::PickUpDiscardPile => String::from("Pick up discard pile"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_state_includes_hand_and_status() {
        let game = GameBuilder::new(2).unwrap().build().unwrap();
        let view = game.state_view(0).unwrap();
        let text = render_state(&view);
        assert!(text.contains("Status: Ongoing"));
        assert!(text.contains("Your hand:"));
    }

    #[test]
    fn render_player_state_shows_own_seat() {
        let state = PlayerState::new(1);
        let text = render_player_state(&state);
        assert!(text.contains("Seat 1 of 0"));
    }

    #[test]
    fn describe_action_covers_every_variant() {
        assert!(describe_action(&Action::PickUpDiscardPile).contains("Pick up"));
    }
}
