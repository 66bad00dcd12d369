// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three card poker raise or fold rule.
use dealwise_eval::{Card, HandShape};

use crate::decision::{Decision, Play};

/// The number of cards in a three card poker hand.
pub const HAND_SIZE: usize = 3;

const QUEEN: u8 = 12;
const KING: u8 = 13;

/// Decides whether to raise or fold a three card hand.
///
/// The rule raises any pair, flush or straight and any hand Q-6-4 or better,
/// returns `None` if the hand doesn't have exactly three cards.
pub fn decide(cards: &[Card]) -> Option<Decision> {
    if cards.len() != HAND_SIZE {
        return None;
    }

    let shape = HandShape::new(cards);

    if shape.has_pair() {
        return Some(raise("You have a pair or three of a kind"));
    }

    if shape.is_flush() {
        return Some(raise("You have a flush"));
    }

    // A-2-3 counts as a straight.
    if shape.is_straight() {
        return Some(raise("You have a straight"));
    }

    let &[third, second, high] = shape.sorted_values() else {
        return None;
    };

    let decision = match high {
        KING.. => raise("King-high or Ace-high always raises"),
        QUEEN if second > 6 => raise("Q-6-4 or better (second card beats 6)"),
        QUEEN if second == 6 && third >= 4 => raise("Q-6-4 or better (exactly Q-6-4 threshold)"),
        _ => Decision::new(Play::Fold, "Below Q-6-4 threshold"),
    };

    Some(decision)
}

fn raise(reason: &str) -> Decision {
    Decision::new(Play::Raise, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealwise_eval::{Deck, Rank, Suit};

    fn hand(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn play(s: &str) -> Play {
        decide(&hand(s)).unwrap().play
    }

    #[test]
    fn pairs_always_raise() {
        let ranks = Rank::ranks().collect::<Vec<_>>();
        for &r in &ranks {
            for &k in &ranks {
                let cards = [
                    Card::new(r, Suit::Hearts),
                    Card::new(r, Suit::Spades),
                    Card::new(k, Suit::Clubs),
                ];
                let d = decide(&cards).unwrap();
                assert_eq!(d.play, Play::Raise);
                assert_eq!(d.reason, "You have a pair or three of a kind");
            }
        }

        // Pair checked before the flush.
        assert_eq!(
            decide(&hand("2H 2S 2D")).unwrap().reason,
            "You have a pair or three of a kind"
        );
    }

    #[test]
    fn flushes_and_straights_raise() {
        let d = decide(&hand("2H 7H 9H")).unwrap();
        assert_eq!(d.play, Play::Raise);
        assert_eq!(d.reason, "You have a flush");

        let d = decide(&hand("4C 3D 5H")).unwrap();
        assert_eq!(d.play, Play::Raise);
        assert_eq!(d.reason, "You have a straight");

        let d = decide(&hand("AC 2D 3H")).unwrap();
        assert_eq!(d.play, Play::Raise);
        assert_eq!(d.reason, "You have a straight");

        assert_eq!(play("QC KD AH"), Play::Raise);
        // No wrap around.
        assert_eq!(
            decide(&hand("KC AD 2H")).unwrap().reason,
            "King-high or Ace-high always raises"
        );
    }

    #[test]
    fn queen_six_four_threshold() {
        let d = decide(&hand("QH 6S 4D")).unwrap();
        assert_eq!(d.play, Play::Raise);
        assert!(d.reason.starts_with("Q-6-4 or better"));

        let d = decide(&hand("QH 5S 3D")).unwrap();
        assert_eq!(d.play, Play::Fold);
        assert_eq!(d.reason, "Below Q-6-4 threshold");

        assert_eq!(play("QH 6S 3D"), Play::Fold);
        assert_eq!(play("QH 7S 2D"), Play::Raise);
        assert_eq!(play("QH 5S 9D"), Play::Raise);
        assert_eq!(play("QH 5S 2D"), Play::Fold);
        assert_eq!(play("4H 6S QD"), Play::Raise);
    }

    #[test]
    fn high_cards() {
        assert_eq!(play("KH 7S 2D"), Play::Raise);
        assert_eq!(play("AH 4S 2D"), Play::Raise);
        assert_eq!(play("JH 9S 7D"), Play::Fold);
        assert_eq!(play("2H 4S 7D"), Play::Fold);
    }

    #[test]
    fn incomplete_hands() {
        assert!(decide(&[]).is_none());
        assert!(decide(&hand("QH 6S")).is_none());
        assert!(decide(&hand("QH 6S 4D 2C")).is_none());
    }

    #[test]
    fn same_hand_same_decision() {
        let deck = Deck::default().into_iter().step_by(7).collect::<Vec<_>>();
        for cards in deck.windows(HAND_SIZE) {
            assert_eq!(decide(cards), decide(cards));
        }
    }
}
