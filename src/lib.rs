//! Rules engine, messaging adapter and bot policies for a shedding-style
//! trick card game. The crate is organized around the same seam the
//! reference implementation's player process uses: the engine only ever
//! talks to a [`Messaging`] adapter, never to a policy directly, so any
//! combination of human/bot/simulated seats can sit behind that trait.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod legality;
pub mod messaging;
pub mod player_state;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PlayerId, RequestType};
pub use crate::bot::Bot;
pub use crate::bots::{GreedyBot, HumanBot, RandomBot, SimpleMctsBot, create_bot_from_spec, label_for_spec};
pub use crate::card::{Card, Rank, Suit};
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::messaging::{BotMessaging, Messaging, Update};
pub use crate::player_state::PlayerState;
pub use crate::state::{GameSettings, GameStateView, GameStatus, PlayerPublicState, TableStackPublic};
pub use crate::visualize::{describe_action, render_player_state, render_state};
