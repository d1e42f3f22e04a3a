pub mod greedy;
pub mod human;
pub mod mcts;
pub mod random;
mod registry;

pub use greedy::GreedyBot;
pub use human::HumanBot;
pub use mcts::SimpleMctsBot;
pub use random::RandomBot;
pub use registry::{create_bot_from_spec, label_for_spec};
