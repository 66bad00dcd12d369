// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Jacks or Better video poker hold strategy.
//!
//! The strategy is a priority list where the first matching hold wins:
//!
//! ```text
//!   1. Royal flush                 10. Four to a flush
//!   2. Straight flush              11. Low pair
//!   3. Four of a kind              12. Four to an open-ended straight
//!   4. Full house                  13. Three to a royal flush
//!   5. Flush                       14. Two suited high cards
//!   6. Straight                    15. Two unsuited high cards
//!   7. Three of a kind             16. One high card
//!   8. Two pair                    17. Discard all
//!   9. High pair
//! ```
//!
//! Hold positions are 1-based and follow the order of the cards in the hand.
use dealwise_eval::{Card, HandRank, HandShape, JACK_VALUE, Suit, is_consecutive};

use crate::decision::{Decision, Play};

/// The number of cards in a video poker hand.
pub const HAND_SIZE: usize = 5;

/// Returns the cards to hold for a five cards hand.
///
/// Returns `None` if the hand doesn't have exactly five cards.
pub fn decide(cards: &[Card]) -> Option<Decision> {
    if cards.len() != HAND_SIZE {
        return None;
    }

    let shape = HandShape::new(cards);
    let rank = shape.rank();

    let made = match rank {
        HandRank::RoyalFlush => Some(hold_all("Royal Flush! Jackpot!")),
        HandRank::StraightFlush => Some(hold_all("Straight Flush!")),
        HandRank::FourOfAKind => Some(hold_all("Four of a Kind!")),
        HandRank::FullHouse => Some(hold_all("Full House!")),
        HandRank::Flush => Some(hold_all("Flush!")),
        HandRank::Straight => Some(hold_all("Straight!")),
        HandRank::ThreeOfAKind => Some(hold(of_a_kind(&shape, 3), "Three of a Kind")),
        HandRank::TwoPair => Some(hold(of_a_kind(&shape, 2), "Two Pair")),
        // High pair beats four to a flush.
        HandRank::HighPair => Some(hold(of_a_kind(&shape, 2), "High Pair (Jacks or Better)")),
        HandRank::LowPair | HandRank::HighCard => None,
    };

    if made.is_some() {
        return made;
    }

    if let Some(flush) = four_to_flush(&shape) {
        let reason = if rank == HandRank::LowPair {
            "4 to Flush beats Low Pair"
        } else {
            "4 to a Flush"
        };
        return Some(hold(flush, reason));
    }

    if rank == HandRank::LowPair {
        return Some(hold(of_a_kind(&shape, 2), "Low Pair"));
    }

    if let Some(straight) = four_to_straight(&shape) {
        return Some(hold(straight, "4 to an Open-Ended Straight"));
    }

    if let Some(royal) = suited_high_cards(&shape, 3) {
        return Some(hold(royal, "3 to a Royal Flush"));
    }

    if let Some(suited) = suited_high_cards(&shape, 2) {
        return Some(hold(suited, "Two Suited High Cards"));
    }

    let high = shape.positions(is_high_card);
    let decision = match high.as_slice() {
        [first, second, ..] => hold(vec![*first, *second], "Two High Cards (J, Q, K, A)"),
        [first] => hold(vec![*first], "Single High Card"),
        [] => hold(vec![], "Draw 5 new cards"),
    };

    Some(decision)
}

fn hold(indices: Vec<usize>, reason: &str) -> Decision {
    Decision::new(Play::Hold(indices), reason)
}

fn hold_all(reason: &str) -> Decision {
    hold((1..=HAND_SIZE).collect(), reason)
}

fn is_high_card(card: &Card) -> bool {
    card.poker_value() >= JACK_VALUE
}

/// Positions of the cards whose rank appears `n` times.
fn of_a_kind(shape: &HandShape<'_>, n: u8) -> Vec<usize> {
    shape.positions(|c| shape.count_of(c.poker_value()) == n)
}

/// Positions of four cards of the same suit.
fn four_to_flush(shape: &HandShape<'_>) -> Option<Vec<usize>> {
    let suit = Suit::suits().find(|&s| shape.suit_count(s) == 4)?;
    Some(shape.positions(|c| c.suit() == suit))
}

/// Positions of the lowest run of four consecutive values.
fn four_to_straight(shape: &HandShape<'_>) -> Option<Vec<usize>> {
    let run = shape
        .sorted_values()
        .windows(4)
        .find(|w| is_consecutive(w))?;

    let positions = shape.positions(|c| run.contains(&c.poker_value()));
    (positions.len() == 4).then_some(positions)
}

/// Positions of the first `n` high cards of the first suit, in hand order, that
/// has at least `n` high cards.
fn suited_high_cards(shape: &HandShape<'_>, n: usize) -> Option<Vec<usize>> {
    let cards = shape.cards();

    let mut suits = Vec::with_capacity(HAND_SIZE);
    for card in cards.iter().filter(|c| is_high_card(c)) {
        if !suits.contains(&card.suit()) {
            suits.push(card.suit());
        }
    }

    suits.into_iter().find_map(|suit| {
        let positions = shape.positions(|c| is_high_card(c) && c.suit() == suit);
        (positions.len() >= n).then(|| positions.into_iter().take(n).collect())
    })
}
