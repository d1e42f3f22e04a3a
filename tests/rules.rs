use palace::{Action, Bot, BotMessaging, Game, GameError, GameStatus, RandomBot};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_game(num_players: usize, seed: u64) -> (Game, Vec<Box<dyn Bot>>) {
    let game = Game::builder(num_players).unwrap().with_seed(seed).build().unwrap();
    let bots: Vec<Box<dyn Bot>> = (0..num_players)
        .map(|i| Box::new(RandomBot::new(i, StdRng::seed_from_u64(seed ^ i as u64))) as Box<dyn Bot>)
        .collect();
    (game, bots)
}

#[test]
fn a_game_between_random_bots_always_reaches_a_terminal_status() -> Result<(), GameError> {
    for seed in 0..8u64 {
        let (mut game, bots) = random_game(3, seed);
        let mut messaging = BotMessaging::new(bots);
        let status = game.run(&mut messaging);
        assert!(matches!(status, GameStatus::Won { .. } | GameStatus::Draw), "seed {seed} never finished");
    }
    Ok(())
}

#[test]
fn two_player_game_deals_six_card_hands_before_any_play() -> Result<(), GameError> {
    let game = Game::builder(2)?.with_seed(11).build()?;
    let view = game.state_view(0)?;
    // deal_table_cards + deal_hand_cards run inside Game::run, not the builder;
    // a freshly built game has nothing dealt yet.
    assert!(view.hand.is_empty());
    assert_eq!(view.deck_count, 52);
    Ok(())
}

#[test]
fn legal_actions_are_empty_before_any_known_cards_exist() -> Result<(), GameError> {
    let game = Game::builder(2)?.build()?;
    let actions = game.legal_actions(0)?;
    assert!(actions.is_empty());
    Ok(())
}

#[test]
fn apply_action_rejects_set_table_cards_outside_setup() {
    let (mut game, bots) = random_game(2, 1);
    let mut messaging = BotMessaging::new(bots);
    let err = game
        .apply_action(0, Action::SetTableCards { cards: vec![] }, &mut messaging)
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidAction(_)));
}

#[test]
fn action_wire_round_trip_preserves_every_variant() {
    use palace::Card;
    let cards = vec![Card::parse("ST").unwrap(), Card::parse("H2").unwrap()];
    for action in [
        Action::SetTableCards { cards: cards.clone() },
        Action::PlayKnownCards { cards },
        Action::PickUpDiscardPile,
    ] {
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}

#[test]
fn invalid_player_index_is_rejected() {
    let game = Game::builder(2).unwrap().build().unwrap();
    assert!(matches!(game.legal_actions(5), Err(GameError::InvalidPlayer(5))));
    assert!(matches!(game.state_view(5), Err(GameError::InvalidPlayer(5))));
}
