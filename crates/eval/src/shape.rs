// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand shape classification.
use serde::{Deserialize, Serialize};
use std::fmt;

use dealwise_cards::{Card, Suit};

/// The poker value of a jack, the lowest high card in Jacks or Better.
pub const JACK_VALUE: u8 = 11;

/// The poker value of an ace.
pub const ACE_VALUE: u8 = 14;

/// A hand category.
///
/// Categories are ordered from the weakest to the strongest, pairs are split
/// into low pairs (tens or lower) and high pairs (jacks or better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pairs, straights or flushes.
    HighCard,
    /// A pair of tens or lower.
    LowPair,
    /// A pair of jacks or better.
    HighPair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Consecutive ranks including the ace-low wheel.
    Straight,
    /// All cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight with all cards of the same suit.
    StraightFlush,
    /// Ten to ace straight flush.
    RoyalFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::LowPair => "Low Pair",
            HandRank::HighPair => "High Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        f.write_str(s)
    }
}

/// The rank and suit multiplicities of a hand.
///
/// The shape keeps a reference to the cards so that positional queries report
/// cards in the order given by the caller:
///
/// ```
/// # use dealwise_eval::*;
/// let cards = ["JH", "JS", "3D", "7C", "9H"]
///     .iter()
///     .map(|c| c.parse::<Card>().unwrap())
///     .collect::<Vec<_>>();
///
/// let shape = HandShape::new(&cards);
/// assert_eq!(shape.rank(), HandRank::HighPair);
/// assert_eq!(shape.positions_of_value(11), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct HandShape<'a> {
    cards: &'a [Card],
    /// Number of cards for each poker value, indexed by value.
    value_counts: [u8; 15],
    /// Number of cards for each suit.
    suit_counts: [u8; 4],
    /// Rank multiplicities in descending order.
    profile: Vec<u8>,
    /// Poker values in ascending order.
    sorted_values: Vec<u8>,
    flush: bool,
    straight: bool,
}

impl<'a> HandShape<'a> {
    /// Computes the shape of a hand.
    ///
    /// Flushes and straights need at least three cards, the ace plays low in
    /// the wheel (A-2-3 for three cards, A-2-3-4-5 for five).
    pub fn new(cards: &'a [Card]) -> Self {
        let mut value_counts = [0u8; 15];
        let mut suit_counts = [0u8; 4];

        for card in cards {
            value_counts[card.poker_value() as usize] += 1;
            suit_counts[suit_index(card.suit())] += 1;
        }

        let mut profile = value_counts
            .iter()
            .copied()
            .filter(|&n| n > 0)
            .collect::<Vec<_>>();
        profile.sort_unstable_by(|a, b| b.cmp(a));

        let mut sorted_values = cards.iter().map(Card::poker_value).collect::<Vec<_>>();
        sorted_values.sort_unstable();

        let n = cards.len();
        let flush = n >= 3 && suit_counts.iter().any(|&c| c as usize == n);
        let straight = n >= 3 && (is_consecutive(&sorted_values) || is_wheel(&sorted_values));

        Self {
            cards,
            value_counts,
            suit_counts,
            profile,
            sorted_values,
            flush,
            straight,
        }
    }

    /// The cards in this hand.
    pub fn cards(&self) -> &'a [Card] {
        self.cards
    }

    /// The poker values in ascending order.
    pub fn sorted_values(&self) -> &[u8] {
        &self.sorted_values
    }

    /// The rank multiplicities sorted in descending order.
    pub fn profile(&self) -> &[u8] {
        &self.profile
    }

    /// The number of cards with the given poker value.
    pub fn count_of(&self, value: u8) -> u8 {
        self.value_counts.get(value as usize).copied().unwrap_or(0)
    }

    /// The number of cards with the given suit.
    pub fn suit_count(&self, suit: Suit) -> u8 {
        self.suit_counts[suit_index(suit)]
    }

    /// Poker values that appear exactly `n` times, in ascending order.
    pub fn values_with_count(&self, n: u8) -> impl Iterator<Item = u8> + '_ {
        (2..=ACE_VALUE).filter(move |&v| self.value_counts[v as usize] == n)
    }

    /// Checks if two or more cards share a rank.
    pub fn has_pair(&self) -> bool {
        self.profile.first().is_some_and(|&n| n >= 2)
    }

    /// Checks if all cards have the same suit.
    pub fn is_flush(&self) -> bool {
        self.flush
    }

    /// Checks if the values are consecutive, including the ace-low wheel.
    pub fn is_straight(&self) -> bool {
        self.straight
    }

    /// Checks for a straight flush, royal flushes included.
    pub fn is_straight_flush(&self) -> bool {
        self.flush && self.straight
    }

    /// Checks for a ten to ace straight flush.
    pub fn is_royal_flush(&self) -> bool {
        self.flush && self.sorted_values == [10, 11, 12, 13, ACE_VALUE]
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        let first = self.profile.first().copied().unwrap_or(0);
        let second = self.profile.get(1).copied().unwrap_or(0);

        if self.is_royal_flush() {
            HandRank::RoyalFlush
        } else if self.is_straight_flush() {
            HandRank::StraightFlush
        } else if first == 4 {
            HandRank::FourOfAKind
        } else if first == 3 && second == 2 {
            HandRank::FullHouse
        } else if self.flush {
            HandRank::Flush
        } else if self.straight {
            HandRank::Straight
        } else if first == 3 {
            HandRank::ThreeOfAKind
        } else if first == 2 && second == 2 {
            HandRank::TwoPair
        } else if first == 2 {
            match self.values_with_count(2).next() {
                Some(v) if v >= JACK_VALUE => HandRank::HighPair,
                _ => HandRank::LowPair,
            }
        } else {
            HandRank::HighCard
        }
    }

    /// The 1-based positions of the cards matching a predicate.
    pub fn positions<F>(&self, mut f: F) -> Vec<usize>
    where
        F: FnMut(&Card) -> bool,
    {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| f(c))
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    /// The 1-based positions of the cards with the given poker value.
    pub fn positions_of_value(&self, value: u8) -> Vec<usize> {
        self.positions(|c| c.poker_value() == value)
    }
}

fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}

/// Checks if sorted values increase by one.
pub fn is_consecutive(sorted: &[u8]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Checks for an ace-low sequence 2, 3, ..., n-1, A.
fn is_wheel(sorted: &[u8]) -> bool {
    match sorted.split_last() {
        Some((&ACE_VALUE, rest)) => rest.iter().zip(2u8..).all(|(&v, w)| v == w),
        _ => false,
    }
}
