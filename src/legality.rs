//! Card model & legality (component A): which multi-card selections are a
//! legal play against a given `last_play` and `discard_pile`.

use std::collections::{BTreeSet, HashMap};

use crate::card::{BURN_RUN_LENGTH, Card, Rank};

/// A single card trumps `last_play` iff there is no last play, the card's
/// natural rank is at least the last play's rank, or the card is a power
/// rank (T/2) — the "trump relation".
pub fn trumps(card: Card, last_play: Option<&[Card]>) -> bool {
    match last_play {
        None => true,
        Some(last) => card.rank.is_power() || card.rank >= last[0].rank,
    }
}

/// All cards share exactly one rank. An empty slice is never considered
/// same-rank (there is nothing to compare).
pub fn all_same_rank(cards: &[Card]) -> bool {
    match cards.split_first() {
        None => false,
        Some((first, rest)) => rest.iter().all(|c| c.rank == first.rank),
    }
}

/// Every legal multi-card selection ("available play") from `stack`, given
/// `last_play` and the current `discard_pile`. Returns canonically-sorted
/// card groups; callers compare against a played set by sorting it the
/// same way.
pub fn available_plays(
    stack: &[Card],
    last_play: Option<&[Card]>,
    discard_pile: &[Card],
) -> BTreeSet<Vec<Card>> {
    let mut by_rank: HashMap<Rank, Vec<Card>> = HashMap::new();
    for &card in stack {
        by_rank.entry(card.rank).or_default().push(card);
    }

    let (threshold, required_count) = match last_play {
        None => (Rank::Three, 1),
        Some(last) => (last[0].rank, last.len()),
    };

    let mut plays = BTreeSet::new();

    for (rank, cards) in by_rank.iter() {
        if rank.is_power() {
            for &card in cards {
                plays.insert(vec![card]);
            }
            continue;
        }

        if cards.len() < BURN_RUN_LENGTH {
            let needed = BURN_RUN_LENGTH - cards.len();
            if discard_pile.len() >= needed {
                let discard_tail = &discard_pile[discard_pile.len() - needed..];
                let mut combined = cards.clone();
                combined.extend_from_slice(discard_tail);
                if all_same_rank(&combined) {
                    let mut group = cards.clone();
                    group.sort();
                    plays.insert(group);
                    continue;
                }
            }
        }

        if *rank >= threshold && cards.len() >= required_count {
            for length in required_count..=cards.len() {
                for combo in combinations(cards, length) {
                    let mut group = combo;
                    group.sort();
                    plays.insert(group);
                }
            }
        }
    }

    plays
}

/// True iff `cards_played` (any order) is one of the available plays from
/// `source_stack` (hand if non-empty, else face-up table).
pub fn is_play_available(
    source_stack: &[Card],
    last_play: Option<&[Card]>,
    cards_played: &[Card],
    discard_pile: &[Card],
) -> bool {
    let plays = available_plays(source_stack, last_play, discard_pile);
    let mut sorted = cards_played.to_vec();
    sorted.sort();
    plays.contains(&sorted)
}

/// Burn predicate for a just-played set `played`, given `discard_pile`
/// *after* `played` has already been appended to it: rank ten always burns;
/// otherwise four equal-rank cards in a row burns, except runs of rank two
/// (the "four in a row" exclusion).
pub fn is_burn(played: &[Card], discard_pile: &[Card]) -> bool {
    let rank = played[0].rank;
    if rank.is_burn() {
        return true;
    }
    if rank == Rank::Two {
        return false;
    }
    discard_pile.len() >= BURN_RUN_LENGTH
        && all_same_rank(&discard_pile[discard_pile.len() - BURN_RUN_LENGTH..])
}

/// Every `length`-sized combination of `items`, order-preserving per combo.
/// Exposed crate-wide so the random, human and MCTS policies can enumerate
/// `SET_TABLE_CARDS` candidates the same way `available_plays` enumerates
/// play candidates.
pub(crate) fn combinations(items: &[Card], length: usize) -> Vec<Vec<Card>> {
    if length == 0 {
        return vec![Vec::new()];
    }
    if length > items.len() {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..length).collect();
    loop {
        result.push(indices.iter().map(|&i| items[i]).collect());
        let mut i = length;
        loop {
            if i == 0 {
                return result;
            }
            i -= 1;
            if indices[i] != i + items.len() - length {
                break;
            }
        }
        indices[i] += 1;
        for j in i + 1..length {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn wild_ranks_always_singly_available() {
        let stack = vec![card(Rank::Ten, Suit::Spades), card(Rank::Two, Suit::Hearts)];
        let last_play = vec![card(Rank::Ace, Suit::Clubs)];
        let plays = available_plays(&stack, Some(&last_play), &[]);
        assert!(plays.contains(&vec![card(Rank::Ten, Suit::Spades)]));
        assert!(plays.contains(&vec![card(Rank::Two, Suit::Hearts)]));
    }

    #[test]
    fn below_threshold_rank_is_unavailable() {
        let stack = vec![card(Rank::Four, Suit::Spades)];
        let last_play = vec![card(Rank::Nine, Suit::Clubs)];
        let plays = available_plays(&stack, Some(&last_play), &[]);
        assert!(plays.is_empty());
    }

    #[test]
    fn empty_last_play_allows_any_rank() {
        let stack = vec![card(Rank::Three, Suit::Spades)];
        let plays = available_plays(&stack, None, &[]);
        assert!(plays.contains(&vec![card(Rank::Three, Suit::Spades)]));
    }

    #[test]
    fn partial_four_in_a_row_completion_is_available() {
        let stack = vec![card(Rank::Four, Suit::Clubs)];
        let discard = vec![
            card(Rank::Four, Suit::Diamonds),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Four, Suit::Spades),
        ];
        let last_play = vec![card(Rank::King, Suit::Clubs)];
        let plays = available_plays(&stack, Some(&last_play), &discard);
        assert!(plays.contains(&vec![card(Rank::Four, Suit::Clubs)]));
    }

    #[test]
    fn four_in_a_row_excludes_rank_two() {
        let stack = vec![card(Rank::Two, Suit::Clubs)];
        let discard_before = vec![
            card(Rank::Two, Suit::Diamonds),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Two, Suit::Spades),
        ];
        // Twos are handled by the wild branch, not the four-in-a-row branch,
        // so they should still be playable — just via the power-rank rule.
        let plays = available_plays(&stack, None, &discard_before);
        assert!(plays.contains(&vec![card(Rank::Two, Suit::Clubs)]));
        let discard_after = [discard_before, vec![card(Rank::Two, Suit::Clubs)]].concat();
        assert!(!is_burn(&[card(Rank::Two, Suit::Clubs)], &discard_after));
    }

    #[test]
    fn burn_on_rank_ten() {
        assert!(is_burn(&[card(Rank::Ten, Suit::Spades)], &[]));
    }

    #[test]
    fn burn_on_four_equal_ranks_in_discard() {
        let discard = vec![
            card(Rank::Four, Suit::Diamonds),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Four, Suit::Spades),
            card(Rank::Four, Suit::Clubs),
        ];
        assert!(is_burn(&[card(Rank::Four, Suit::Clubs)], &discard));
    }
}
