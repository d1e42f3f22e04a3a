//! Bot-spec parsing for CLI tooling: turns a `name[:config]` string into a
//! boxed [`Bot`], mirroring the reference player process's notion of a
//! pluggable policy without hardcoding the roster at every call site.

use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::PlayerId;
use crate::bot::Bot;
use crate::bots::{GreedyBot, HumanBot, RandomBot, SimpleMctsBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':').next().unwrap_or(spec).trim().to_ascii_lowercase()
}

/// Creates a bot instance from a CLI-style spec. Supported specs:
/// - `human[:name]`
/// - `random[:seed]`
/// - `greedy`
/// - `mcts[:iterations]`
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let player_number: PlayerId = index;
    match label_for_spec(spec).as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string())
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(player_number, name)))
        }
        "random" => {
            let custom_seed = spec
                .split_once(':')
                .and_then(|(_, value)| value.parse::<u64>().ok())
                .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomBot::new(player_number, StdRng::seed_from_u64(custom_seed))))
        }
        "greedy" => Ok(Box::new(GreedyBot::new(player_number))),
        "mcts" => {
            let custom_seed = seed ^ ((index as u64 + 1) * 0x9E37_79B9);
            let rng = StdRng::seed_from_u64(custom_seed);
            match spec.split_once(':').and_then(|(_, value)| value.parse::<usize>().ok()) {
                Some(iterations) => Ok(Box::new(SimpleMctsBot::with_iterations(player_number, rng, iterations))),
                None => Ok(Box::new(SimpleMctsBot::new(player_number, rng))),
            }
        }
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_strips_configuration_suffix() {
        assert_eq!(label_for_spec("random:42"), "random");
        assert_eq!(label_for_spec("HUMAN:Ada"), "human");
        assert_eq!(label_for_spec("greedy"), "greedy");
    }

    #[test]
    fn unrecognized_spec_is_an_error() {
        assert!(create_bot_from_spec("nonexistent", 0, 1).is_err());
    }

    #[test]
    fn every_documented_spec_resolves() {
        for spec in ["human", "random", "greedy", "mcts", "mcts:3"] {
            assert!(create_bot_from_spec(spec, 0, 1).is_ok(), "spec {spec} should resolve");
        }
    }
}
