//! Rules engine: owns all game state and drives play through a
//! [`Messaging`] adapter. `Game` never talks to a bot
//! directly — every observation and request passes through that trait, so
//! the engine is agnostic to whether the other end is in-process, a test
//! double, or (if someone built it) a socket.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use std::collections::BTreeMap;

use crate::action::{Action, PlayerId, RequestType};
use crate::card::{Card, INITIAL_HAND_SIZE, Rank, TABLE_STACKS, full_deck};
use crate::error::{GameError, InvalidAction};
use crate::legality;
use crate::messaging::{Messaging, Update};
use crate::player_state::{OpponentHand, OwnHand, PlayerState};
use crate::state::{GameSettings, GameStateView, GameStatus, PlayerPublicState, TableStackPublic};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;
pub(crate) const DEFAULT_MAX_TURNS: usize = 10_000;

/// A face-down/face-up pair a player owns until it is fully consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableStack {
    pub bottom_card: Card,
    pub top_card: Option<Card>,
}

impl TableStack {
    fn card_count(&self) -> usize {
        if self.top_card.is_some() { 2 } else { 1 }
    }

    fn as_public(&self) -> TableStackPublic {
        TableStackPublic {
            top_card: self.top_card,
            has_hidden_card: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct PlayerHand {
    hand_stack: Vec<Card>,
    table_stacks: Vec<TableStack>,
}

impl PlayerHand {
    fn card_count(&self) -> usize {
        self.hand_stack.len() + self.table_stacks.iter().map(TableStack::card_count).sum::<usize>()
    }

    fn has_won(&self) -> bool {
        self.hand_stack.is_empty() && self.table_stacks.is_empty()
    }

    fn face_up_cards(&self) -> Vec<Card> {
        self.table_stacks.iter().filter_map(|s| s.top_card).collect()
    }

    fn has_known_cards(&self) -> bool {
        !self.hand_stack.is_empty() || self.table_stacks.iter().any(|s| s.top_card.is_some())
    }
}

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub number_of_players: usize,
    pub seed: u64,
    pub max_turns: usize,
}

impl GameConfig {
    pub fn new(number_of_players: usize) -> Result<Self, GameError> {
        GameSettings::new(number_of_players, DEFAULT_MAX_TURNS)?;
        Ok(Self {
            number_of_players,
            seed: DEFAULT_SEED,
            max_turns: DEFAULT_MAX_TURNS,
        })
    }
}

/// Builder that enables deterministic deck injection for testing and for
/// seeding simulator rollouts.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new(number_of_players: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(number_of_players)?,
            deck: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Supplies an exact 52-card deck, bypassing the shuffle. The deck's
    /// *last* element is dealt first (deck top = `Vec` end).
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// One player's hand as reconstructed by [`crate::player_state::PlayerState`]
/// from its belief state, for feeding back into [`Game::from_reconstruction`].
/// Kept separate from the private `PlayerHand` so the tracker never needs to
/// know this module's internal representation.
pub(crate) struct ReconstructedHand {
    pub hand_stack: Vec<Card>,
    /// `(bottom_card, top_card)` per remaining TableStack, in order.
    pub table_stacks: Vec<(Card, Option<Card>)>,
}

/// Core rules engine. Holds every card in the game; the only information
/// hidden from the outside world is which cards sit where, which the
/// [`Messaging`] boundary is responsible for not leaking.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    player_turn: PlayerId,
    player_hands: Vec<PlayerHand>,
    deck: Vec<Card>,
    discard_pile: Vec<Card>,
    eliminated_cards: Vec<Card>,
    last_play: Option<Vec<Card>>,
}

impl Game {
    pub fn builder(number_of_players: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(number_of_players)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn player_turn(&self) -> PlayerId {
        self.player_turn
    }

    pub fn last_play(&self) -> Option<&[Card]> {
        self.last_play.as_deref()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        if perspective >= self.player_hands.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let players = self
            .player_hands
            .iter()
            .enumerate()
            .map(|(id, hand)| PlayerPublicState {
                id,
                hand_size: hand.hand_stack.len(),
                table_stacks: hand.table_stacks.iter().map(TableStack::as_public).collect(),
                is_current: id == self.player_turn,
                has_won: hand.has_won(),
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings,
            status: self.status,
            self_player: perspective,
            current_player: self.player_turn,
            deck_count: self.deck.len(),
            discard_pile: self.discard_pile.clone(),
            eliminated_count: self.eliminated_cards.len(),
            last_play: self.last_play.clone(),
            players,
            hand: self.player_hands[perspective].hand_stack.clone(),
        })
    }

    /// Every legal [`Action`] for `player`, given the current state. Used by
    /// policies and by tests; the turn loop itself only ever
    /// needs to *validate* a proposed action, not enumerate all of them.
    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if player >= self.player_hands.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        let hand = &self.player_hands[player];
        let mut actions = Vec::new();
        if hand.has_known_cards() {
            let source = if !hand.hand_stack.is_empty() {
                hand.hand_stack.clone()
            } else {
                hand.face_up_cards()
            };
            for group in legality::available_plays(&source, self.last_play.as_deref(), &self.discard_pile) {
                actions.push(Action::PlayKnownCards { cards: group });
            }
            if !self.discard_pile.is_empty() {
                actions.push(Action::PickUpDiscardPile);
            }
        }
        Ok(actions)
    }

    /// Drives the game to completion, issuing updates and requests through
    /// `messaging`: setup, then the turn loop.
    pub fn run(&mut self, messaging: &mut dyn Messaging) -> GameStatus {
        self.broadcast(
            messaging,
            Update::GameInitiated {
                number_of_players: self.settings.number_of_players,
            },
        );
        self.deal_table_cards();
        self.deal_hand_cards(messaging);
        self.request_table_cards(messaging);
        self.assert_conservation_of_cards();

        self.play_until_terminal(messaging)
    }

    /// Drives an already set-up game (whether freshly dealt or reconstructed
    /// from a belief via [`crate::player_state::PlayerState::create_game_state`])
    /// forward turn by turn until a player wins or `max_turns` elapses.
    /// Used both by [`Game::run`] and by the MCTS rollout, which skips
    /// straight to this after reconstructing a concrete mid-game instance.
    pub(crate) fn play_until_terminal(&mut self, messaging: &mut dyn Messaging) -> GameStatus {
        for _ in 0..self.settings.max_turns {
            let player = self.player_turn;
            if let Some(status) = self.play_turn(player, messaging) {
                self.status = status;
                return status;
            }
            self.assert_conservation_of_cards();
        }
        self.status = GameStatus::Draw;
        GameStatus::Draw
    }

    /// Builds one fully-informed [`PlayerState`] tracker per seat from this
    /// concrete instance, for driving an MCTS
    /// rollout's greedy participants. Every card is "known" here because the
    /// instance is already just one guessed concrete world, not the real
    /// hidden game — there is nothing left to conceal from a simulated bot.
    pub(crate) fn build_player_states(&self) -> Vec<PlayerState> {
        (0..self.settings.number_of_players)
            .map(|seat| {
                let mut opponent_hands = BTreeMap::new();
                for (other, hand) in self.player_hands.iter().enumerate() {
                    if other == seat {
                        continue;
                    }
                    opponent_hands.insert(
                        other,
                        OpponentHand {
                            known_hand: hand.hand_stack.clone(),
                            hand_count_unknown: 0,
                            table_stack: hand.face_up_cards(),
                            table_stacks: hand.table_stacks.len(),
                        },
                    );
                }
                let me = &self.player_hands[seat];
                PlayerState {
                    player_number: seat,
                    number_of_players: self.settings.number_of_players,
                    deck_length: self.deck.len(),
                    last_play: self.last_play.clone(),
                    discard_pile: self.discard_pile.clone(),
                    eliminated_cards: self.eliminated_cards.clone(),
                    win: None,
                    hand: OwnHand {
                        hand_stack: me.hand_stack.clone(),
                        table_stack: me.face_up_cards(),
                        table_stacks: me.table_stacks.len(),
                    },
                    opponent_hands,
                }
            })
            .collect()
    }

    /// Applies one already-chosen action for `player`, for tests and CLI
    /// tooling that drive the engine without a full [`Messaging`] adapter.
    /// Bypasses the "no known cards ⇒ forced face-down play" branch of the
    /// turn loop — callers that want that behaviour should use [`Game::run`].
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
        messaging: &mut dyn Messaging,
    ) -> Result<Option<GameStatus>, GameError> {
        if player >= self.player_hands.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if !matches!(self.status, GameStatus::Ongoing) {
            return Err(GameError::GameOver);
        }
        if player != self.player_turn {
            return Err(GameError::NotPlayersTurn);
        }
        let status = self.validate_and_apply_known_play(player, action, messaging)?;
        if let Some(status) = status {
            self.status = status;
        }
        Ok(status)
    }

    /// Builds a concrete `Game` from a belief-state reconstruction:
    /// the caller has already resolved every hidden card (real or randomly
    /// drawn) and just needs it assembled into a playable `Game`. Skips
    /// setup — the returned game is already mid-turn with `player_turn` set.
    pub(crate) fn from_reconstruction(
        player_turn: PlayerId,
        deck: Vec<Card>,
        discard_pile: Vec<Card>,
        eliminated_cards: Vec<Card>,
        last_play: Option<Vec<Card>>,
        hands: Vec<ReconstructedHand>,
    ) -> Result<Self, GameError> {
        let settings = GameSettings::new(hands.len(), DEFAULT_MAX_TURNS)?;
        let player_hands = hands
            .into_iter()
            .map(|h| PlayerHand {
                hand_stack: h.hand_stack,
                table_stacks: h
                    .table_stacks
                    .into_iter()
                    .map(|(bottom_card, top_card)| TableStack { bottom_card, top_card })
                    .collect(),
            })
            .collect();

        Ok(Game {
            settings,
            status: GameStatus::Ongoing,
            player_turn,
            player_hands,
            deck,
            discard_pile,
            eliminated_cards,
            last_play,
        })
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameConfig { number_of_players, seed, max_turns } = builder.config;
        let settings = GameSettings::new(number_of_players, max_turns)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = if let Some(deck) = builder.deck {
            if deck.len() != crate::card::DECK_LEN {
                return Err(GameError::InvalidConfiguration(
                    "supplied deck must contain exactly 52 cards",
                ));
            }
            deck
        } else {
            let mut deck = full_deck();
            deck.shuffle(&mut rng);
            deck
        };

        Ok(Game {
            settings,
            status: GameStatus::Ongoing,
            player_turn: 0,
            player_hands: vec![PlayerHand::default(); number_of_players],
            deck,
            discard_pile: Vec::new(),
            eliminated_cards: Vec::new(),
            last_play: None,
        })
    }

    fn broadcast(&self, messaging: &mut dyn Messaging, update: Update) {
        for player in 0..self.settings.number_of_players {
            messaging.send_update(player, update.clone());
        }
    }

    fn other_players(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.settings.number_of_players).filter(move |&p| p != player)
    }

    fn deal_table_cards(&mut self) {
        for _ in 0..TABLE_STACKS {
            for player in 0..self.settings.number_of_players {
                let card = self.deck.pop().expect("deck has enough cards for table stacks");
                self.player_hands[player].table_stacks.push(TableStack {
                    bottom_card: card,
                    top_card: None,
                });
            }
        }
    }

    fn deal_hand_cards(&mut self, messaging: &mut dyn Messaging) {
        for _ in 0..INITIAL_HAND_SIZE {
            for player in 0..self.settings.number_of_players {
                self.deal_card(player, messaging);
            }
        }
    }

    /// Draws one card for `player` if the deck is non-empty, notifying
    /// everyone, and announces `DECK_DEPLETED`
    /// exactly once on the transition to empty.
    fn deal_card(&mut self, player: PlayerId, messaging: &mut dyn Messaging) {
        let Some(card) = self.deck.pop() else { return };
        self.player_hands[player].hand_stack.push(card);
        messaging.send_update(player, Update::YouDrewCard { cards: vec![card] });
        for other in self.other_players(player).collect::<Vec<_>>() {
            messaging.send_update(other, Update::PlayerDrewCard { player_number: player });
        }
        if self.deck.is_empty() {
            self.broadcast(messaging, Update::DeckDepleted);
        }
    }

    fn request_table_cards(&mut self, messaging: &mut dyn Messaging) {
        for player in 0..self.settings.number_of_players {
            loop {
                let action = messaging.request(player, RequestType::SetTableCards);
                match self.apply_table_card_selection(player, action) {
                    Ok(cards) => {
                        self.broadcast(
                            messaging,
                            Update::SetTableCards { player_number: player, cards },
                        );
                        break;
                    }
                    Err(e) => {
                        messaging.send_update(
                            player,
                            Update::InvalidAction { message: e.to_string() },
                        );
                    }
                }
            }
        }
    }

    fn apply_table_card_selection(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<Vec<Card>, InvalidAction> {
        let Action::SetTableCards { cards } = action else {
            return Err(InvalidAction::ProtocolError);
        };
        let unique_count = cards.iter().collect::<std::collections::HashSet<_>>().len();
        if cards.len() != TABLE_STACKS || unique_count != cards.len() {
            return Err(InvalidAction::TableCardSelection {
                expected: TABLE_STACKS,
                received: cards.len(),
            });
        }
        self.remove_cards_from_hand(player, &cards)?;
        for (slot, &card) in self.player_hands[player].table_stacks.iter_mut().zip(&cards) {
            slot.top_card = Some(card);
        }
        Ok(cards)
    }

    /// One full turn for `player`: a forced face-down play when no known
    /// cards remain, otherwise request-validate-retry on `PLAY`. Returns
    /// `Some` once the game has reached a terminal status.
    fn play_turn(&mut self, player: PlayerId, messaging: &mut dyn Messaging) -> Option<GameStatus> {
        if !self.player_hands[player].has_known_cards() {
            return self.handle_face_down_play(player, messaging);
        }
        loop {
            let action = messaging.request(player, RequestType::Play);
            match self.validate_and_apply_known_play(player, action, messaging) {
                Ok(status) => return status,
                Err(GameError::InvalidAction(e)) => {
                    messaging.send_update(player, Update::InvalidAction { message: e.to_string() });
                }
                Err(_) => unreachable!("validate_and_apply_known_play only raises InvalidAction"),
            }
        }
    }

    fn validate_and_apply_known_play(
        &mut self,
        player: PlayerId,
        action: Action,
        messaging: &mut dyn Messaging,
    ) -> Result<Option<GameStatus>, GameError> {
        match action {
            Action::PickUpDiscardPile => {
                if self.discard_pile.is_empty() {
                    return Err(InvalidAction::EmptyDiscardPile.into());
                }
                self.pickup_discard_pile(player, messaging);
                Ok(None)
            }
            Action::SetTableCards { .. } => Err(InvalidAction::ProtocolError.into()),
            Action::PlayKnownCards { cards } => {
                if cards.is_empty() {
                    return Err(InvalidAction::NoCardsPlayed.into());
                }
                if !legality::all_same_rank(&cards) {
                    return Err(InvalidAction::MixedRanks.into());
                }
                if !self.player_hands[player].hand_stack.is_empty() {
                    self.play_from_hand(player, cards, messaging)
                } else {
                    self.play_from_face_up(player, cards, messaging)
                }
            }
        }
    }

    fn play_from_hand(
        &mut self,
        player: PlayerId,
        cards: Vec<Card>,
        messaging: &mut dyn Messaging,
    ) -> Result<Option<GameStatus>, GameError> {
        if !is_subset(&cards, &self.player_hands[player].hand_stack) {
            return Err(InvalidAction::CardsNotAvailable.into());
        }
        if !legality::is_play_available(
            &self.player_hands[player].hand_stack,
            self.last_play.as_deref(),
            &cards,
            &self.discard_pile,
        ) {
            return Err(InvalidAction::IllegalPlay.into());
        }
        self.remove_cards_from_hand(player, &cards)?;
        let status = self.play_cards_common(player, cards.clone(), messaging);
        self.broadcast(messaging, Update::PlayFromHand { player_number: player, cards });
        Ok(status)
    }

    /// Playing from the face-up table (hand already empty). The engine
    /// tries the play first and only falls back to returning the cards if
    /// it turns out illegal-by-rank. Removal from the table is
    /// all-or-nothing: a partially-matched selection fails cleanly rather
    /// than silently dropping cards, fixing the source's early-return.
    fn play_from_face_up(
        &mut self,
        player: PlayerId,
        cards: Vec<Card>,
        messaging: &mut dyn Messaging,
    ) -> Result<Option<GameStatus>, GameError> {
        let face_up = self.player_hands[player].face_up_cards();
        if !is_subset(&cards, &face_up) {
            return Err(InvalidAction::CardsNotAvailable.into());
        }
        let is_available =
            legality::is_play_available(&face_up, self.last_play.as_deref(), &cards, &self.discard_pile);
        self.remove_cards_from_face_up(player, &cards)?;

        if is_available {
            let status = self.play_cards_common(player, cards.clone(), messaging);
            self.broadcast(messaging, Update::PlayFromTable { player_number: player, cards });
            Ok(status)
        } else {
            self.player_hands[player].hand_stack.extend(cards.iter().copied());
            self.broadcast(
                messaging,
                Update::PlayFromFaceupFailure { player_number: player, cards: cards.clone() },
            );
            self.pickup_discard_pile(player, messaging);
            Ok(None)
        }
    }

    /// Resolves a forced face-down play (no hand, no face-up cards left):
    /// pop the player's last TableStack and reveal its bottom card.
    fn handle_face_down_play(&mut self, player: PlayerId, messaging: &mut dyn Messaging) -> Option<GameStatus> {
        let stack = self.player_hands[player]
            .table_stacks
            .pop()
            .expect("forced face-down play requires a remaining table stack");
        let card = stack.bottom_card;

        if legality::trumps(card, self.last_play.as_deref()) {
            let status = self.play_cards_common(player, vec![card], messaging);
            self.broadcast(
                messaging,
                Update::PlayFromFacedownSuccess { player_number: player, cards: vec![card] },
            );
            status
        } else {
            self.player_hands[player].hand_stack.push(card);
            self.broadcast(
                messaging,
                Update::PlayFromFacedownFailure { player_number: player, cards: vec![card] },
            );
            self.pickup_discard_pile(player, messaging);
            None
        }
    }

    fn pickup_discard_pile(&mut self, player: PlayerId, messaging: &mut dyn Messaging) {
        let cards: Vec<Card> = self.discard_pile.drain(..).collect();
        self.player_hands[player].hand_stack.extend(cards.iter().copied());
        self.last_play = None;
        self.advance_turn(1);
        messaging.send_update(player, Update::YouPickedUpDiscardPile { cards: cards.clone() });
        for other in self.other_players(player).collect::<Vec<_>>() {
            messaging.send_update(other, Update::PlayerPickedUpDiscardPile { player_number: player });
        }
    }

    /// Shared tail of every successful play:
    /// records `last_play`, checks victory, checks burn, draws, advances.
    fn play_cards_common(
        &mut self,
        player: PlayerId,
        cards: Vec<Card>,
        messaging: &mut dyn Messaging,
    ) -> Option<GameStatus> {
        let stored_last = self.last_play.take();
        let rank = cards[0].rank;
        self.discard_pile.extend(cards.iter().copied());
        self.last_play = Some(cards);

        if self.player_hands[player].has_won() {
            self.broadcast(messaging, Update::PlayerWins { player_number: player });
            return Some(GameStatus::Won { winner: player });
        }

        if legality::is_burn(self.last_play.as_deref().unwrap(), &self.discard_pile) {
            self.eliminated_cards.append(&mut self.discard_pile);
            self.last_play = None;
            self.broadcast(messaging, Update::BurnDiscardPile);
            // current player plays again: turn advances by 0.
        } else {
            self.deal_card(player, messaging);
            let skipped = matches!(&stored_last, Some(prev) if prev[0].rank == rank && rank != Rank::Two);
            self.advance_turn(if skipped { 2 } else { 1 });
        }
        None
    }

    fn advance_turn(&mut self, count: usize) {
        self.player_turn = (self.player_turn + count) % self.settings.number_of_players;
    }

    fn remove_cards_from_hand(&mut self, player: PlayerId, cards: &[Card]) -> Result<(), InvalidAction> {
        let mut remaining = self.player_hands[player].hand_stack.clone();
        for &card in cards {
            match remaining.iter().position(|&c| c == card) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => return Err(InvalidAction::CardsNotAvailable),
            }
        }
        self.player_hands[player].hand_stack = remaining;
        Ok(())
    }

    fn remove_cards_from_face_up(&mut self, player: PlayerId, cards: &[Card]) -> Result<(), InvalidAction> {
        let mut scratch: Vec<Option<Card>> = self.player_hands[player]
            .table_stacks
            .iter()
            .map(|s| s.top_card)
            .collect();
        for &card in cards {
            match scratch.iter().position(|c| *c == Some(card)) {
                Some(pos) => scratch[pos] = None,
                None => return Err(InvalidAction::CardsNotAvailable),
            }
        }
        for (stack, new_top) in self.player_hands[player].table_stacks.iter_mut().zip(scratch) {
            stack.top_card = new_top;
        }
        Ok(())
    }

    fn assert_conservation_of_cards(&self) {
        let players_cards: usize = self.player_hands.iter().map(PlayerHand::card_count).sum();
        let total = self.deck.len() + self.discard_pile.len() + self.eliminated_cards.len() + players_cards;
        assert_eq!(total, crate::card::DECK_LEN, "card conservation invariant violated");
    }
}

fn is_subset(requested: &[Card], available: &[Card]) -> bool {
    let mut pool = available.to_vec();
    for &card in requested {
        match pool.iter().position(|&c| c == card) {
            Some(pos) => {
                pool.remove(pos);
            }
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank as R, Suit};
    use crate::messaging::Update as U;

    /// Minimal [`Messaging`] stub for tests that drive the engine directly
    /// via [`Game::apply_action`] instead of through bots.
    struct RecordingMessaging {
        updates: Vec<(PlayerId, U)>,
    }

    impl RecordingMessaging {
        fn new() -> Self {
            Self { updates: Vec::new() }
        }
    }

    impl Messaging for RecordingMessaging {
        fn send_update(&mut self, player: PlayerId, update: Update) {
            self.updates.push((player, update));
        }

        fn request(&mut self, _player: PlayerId, _request_type: RequestType) -> Action {
            panic!("RecordingMessaging never answers requests; drive plays via apply_action")
        }
    }

    fn card(rank: R, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Builds a 2-player game whose deck is already fully dealt out (empty),
    /// with explicit hands/table stacks for deterministic scenario tests.
    fn bare_game(number_of_players: usize) -> Game {
        GameBuilder::new(number_of_players)
            .unwrap()
            .with_deck(vec![card(R::Three, Suit::Clubs); crate::card::DECK_LEN])
            .build()
            .unwrap()
    }

    #[test]
    fn burns_on_rank_ten() {
        let mut game = bare_game(2);
        game.deck.clear();
        game.player_hands[0].hand_stack = vec![card(R::Ten, Suit::Spades)];
        // Leave one table stack behind so the play does not also end the game.
        game.player_hands[0].table_stacks =
            vec![TableStack { bottom_card: card(R::Six, Suit::Diamonds), top_card: None }];
        game.last_play = Some(vec![card(R::Nine, Suit::Hearts)]);
        game.discard_pile = vec![card(R::Nine, Suit::Hearts)];

        let mut messaging = RecordingMessaging::new();
        let status = game
            .apply_action(0, Action::PlayKnownCards { cards: vec![card(R::Ten, Suit::Spades)] }, &mut messaging)
            .unwrap();
        assert!(status.is_none());
        assert!(game.discard_pile.is_empty());
        assert!(game.last_play.is_none());
        assert_eq!(game.eliminated_cards.len(), 2);
        assert_eq!(game.player_turn, 0, "burn replays the same player");
        assert!(messaging.updates.iter().any(|(_, u)| matches!(u, U::BurnDiscardPile)));
    }

    #[test]
    fn skips_next_player_on_matching_rank() {
        let mut game = bare_game(3);
        game.deck.clear();
        // Leave player 0 a table stack so this play does not also win the game.
        game.player_hands[0].table_stacks =
            vec![TableStack { bottom_card: card(R::Six, Suit::Diamonds), top_card: None }];
        game.player_hands[0].hand_stack = vec![card(R::Seven, Suit::Hearts)];
        game.last_play = Some(vec![card(R::Seven, Suit::Spades)]);
        game.discard_pile = vec![card(R::Seven, Suit::Spades)];

        let mut messaging = RecordingMessaging::new();
        game.apply_action(0, Action::PlayKnownCards { cards: vec![card(R::Seven, Suit::Hearts)] }, &mut messaging)
            .unwrap();
        assert_eq!(game.player_turn, 2, "player 1 is skipped");
    }

    #[test]
    fn rank_two_never_skips() {
        let mut game = bare_game(2);
        game.deck.clear();
        game.player_hands[0].table_stacks =
            vec![TableStack { bottom_card: card(R::Six, Suit::Diamonds), top_card: None }];
        game.player_hands[0].hand_stack = vec![card(R::Two, Suit::Hearts)];
        game.last_play = Some(vec![card(R::Two, Suit::Spades)]);
        game.discard_pile = vec![card(R::Two, Suit::Spades)];

        let mut messaging = RecordingMessaging::new();
        game.apply_action(0, Action::PlayKnownCards { cards: vec![card(R::Two, Suit::Hearts)] }, &mut messaging)
            .unwrap();
        assert_eq!(game.player_turn, 1);
    }

    #[test]
    fn face_down_success_plays_and_redraws() {
        let mut game = bare_game(2);
        game.deck.clear();
        game.player_hands[0].hand_stack.clear();
        game.player_hands[0].table_stacks = vec![TableStack { bottom_card: card(R::King, Suit::Hearts), top_card: None }];
        game.discard_pile = vec![card(R::Nine, Suit::Spades)];
        game.last_play = Some(vec![card(R::Nine, Suit::Spades)]);

        let mut messaging = RecordingMessaging::new();
        game.handle_face_down_play(0, &mut messaging);
        assert_eq!(game.discard_pile.last(), Some(&card(R::King, Suit::Hearts)));
        assert!(
            messaging
                .updates
                .iter()
                .any(|(_, u)| matches!(u, U::PlayFromFacedownSuccess { .. }))
        );
    }

    #[test]
    fn face_down_failure_returns_card_and_picks_up() {
        let mut game = bare_game(2);
        game.deck.clear();
        game.player_hands[0].hand_stack.clear();
        game.player_hands[0].table_stacks = vec![TableStack { bottom_card: card(R::Five, Suit::Hearts), top_card: None }];
        game.discard_pile = vec![card(R::King, Suit::Spades)];
        game.last_play = Some(vec![card(R::King, Suit::Spades)]);

        let mut messaging = RecordingMessaging::new();
        game.handle_face_down_play(0, &mut messaging);
        assert!(game.discard_pile.is_empty());
        assert!(game.last_play.is_none());
        assert!(game.player_hands[0].hand_stack.contains(&card(R::Five, Suit::Hearts)));
        assert!(game.player_hands[0].hand_stack.contains(&card(R::King, Suit::Spades)));
        assert_eq!(game.player_turn, 1);
        assert!(
            messaging
                .updates
                .iter()
                .any(|(_, u)| matches!(u, U::PlayFromFacedownFailure { .. }))
        );
    }

    #[test]
    fn face_up_removal_is_all_or_nothing() {
        let mut game = bare_game(2);
        game.player_hands[0].table_stacks = vec![
            TableStack { bottom_card: card(R::Three, Suit::Clubs), top_card: Some(card(R::King, Suit::Hearts)) },
        ];
        let err = game
            .remove_cards_from_face_up(0, &[card(R::King, Suit::Hearts), card(R::Queen, Suit::Spades)])
            .unwrap_err();
        assert_eq!(err, InvalidAction::CardsNotAvailable);
        // Neither card should have been removed given the overall failure.
        assert_eq!(game.player_hands[0].table_stacks[0].top_card, Some(card(R::King, Suit::Hearts)));
    }

    #[test]
    fn victory_requires_empty_hand_and_no_table_stacks() {
        let mut game = bare_game(2);
        game.deck.clear();
        game.player_hands[0].hand_stack = vec![card(R::Four, Suit::Clubs)];
        game.player_hands[0].table_stacks.clear();
        game.last_play = None;
        game.discard_pile.clear();

        let mut messaging = RecordingMessaging::new();
        let status = game
            .apply_action(0, Action::PlayKnownCards { cards: vec![card(R::Four, Suit::Clubs)] }, &mut messaging)
            .unwrap();
        assert_eq!(status, Some(GameStatus::Won { winner: 0 }));
    }

    #[test]
    fn apply_action_rejects_play_after_game_is_won() {
        let mut game = bare_game(2);
        game.status = GameStatus::Won { winner: 0 };

        let mut messaging = RecordingMessaging::new();
        let err = game
            .apply_action(1, Action::PickUpDiscardPile, &mut messaging)
            .unwrap_err();
        assert!(matches!(err, GameError::GameOver));
    }
}
