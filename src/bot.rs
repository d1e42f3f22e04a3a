//! Bot trait (component C/D boundary): the engine never talks to a policy
//! directly, only through [`Messaging`](crate::messaging::Messaging), which
//! forwards to this trait. Rather than a pull-based
//! `select_action(state, legal_actions)` shape, bots here are *pushed*
//! observation events and must track their own belief state in order to
//! answer a later request — this mirrors the reference player process,
//! which only ever sees one event at a time over its own socket.

use crate::action::Action;
use crate::messaging::Update;

/// A seat at the table. Implementations own their belief state and must not
/// assume any particular interleaving beyond "updates and requests arrive in
/// the order the engine emits them".
pub trait Bot {
    /// Observe an event. Most bots use this only to keep belief state
    /// current; a human bot also uses it to render the table for the player.
    fn handle_update(&mut self, update: &Update);

    /// Answer a `SET_TABLE_CARDS` request: choose exactly
    /// [`crate::card::TABLE_STACKS`] distinct cards from the current hand to
    /// start face-down.
    fn select_table_cards(&mut self) -> Action;

    /// Answer a `PLAY` request: either a known multi-card play or picking up
    /// the discard pile. Face-down guesses are not represented here — the
    /// engine resolves those itself once a stack has no known alternative.
    fn select_play(&mut self) -> Action;
}
