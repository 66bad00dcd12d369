// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Blackjack basic strategy.
//!
//! The strategy uses three tables selected by the hand context: pairs, soft
//! totals and hard totals, with the dealer upcard as the table column. A pair or
//! soft hand that has no row in its table is played as a hard total.
use serde::{Deserialize, Serialize};
use std::fmt;

use dealwise_eval::Rank;

use crate::decision::{Decision, Fallback, Play};

/// The player hand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTotal {
    /// The sum of the cards values.
    Points(u8),
    /// A natural blackjack.
    Blackjack,
}

impl PlayerTotal {
    /// The lowest total a player can enter.
    pub const MIN: u8 = 4;
    /// The highest total a player can enter.
    pub const MAX: u8 = 21;
    /// The total of a pair of aces, only entered as a pair.
    pub const PAIR_OF_ACES: u8 = 22;

    /// Creates a total checking it is in the `MIN..=MAX` range.
    pub fn points(total: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&total)
            .then_some(PlayerTotal::Points(total))
    }

    /// The next total in entry order, 21 is followed by blackjack.
    pub fn next(&self) -> Self {
        match self {
            PlayerTotal::Points(n) if *n < Self::MAX => PlayerTotal::Points((n + 1).max(Self::MIN)),
            PlayerTotal::Points(_) => PlayerTotal::Blackjack,
            PlayerTotal::Blackjack => PlayerTotal::Blackjack,
        }
    }

    /// The next total for a hand context, a pair goes past 21 to a pair of aces.
    pub fn next_for(&self, context: HandContext) -> Self {
        match (self, context) {
            (PlayerTotal::Points(n), HandContext::Pair) if *n >= Self::MAX => {
                PlayerTotal::Points(Self::PAIR_OF_ACES)
            }
            (PlayerTotal::Blackjack, HandContext::Pair) => PlayerTotal::Points(Self::PAIR_OF_ACES),
            _ => self.next(),
        }
    }

    /// The previous total in entry order.
    pub fn prev(&self) -> Self {
        match self {
            PlayerTotal::Points(n) if *n > Self::MIN => PlayerTotal::Points((n - 1).min(Self::MAX)),
            PlayerTotal::Points(_) => PlayerTotal::Points(Self::MIN),
            PlayerTotal::Blackjack => PlayerTotal::Points(Self::MAX),
        }
    }
}

impl fmt::Display for PlayerTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerTotal::Points(n) => write!(f, "{n}"),
            PlayerTotal::Blackjack => f.write_str("BJ"),
        }
    }
}

/// How the player total is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandContext {
    /// No ace counted as 11 and no pair.
    #[default]
    Hard,
    /// An ace counts as 11.
    Soft,
    /// Two cards of the same rank.
    Pair,
}

impl HandContext {
    /// Toggles the soft context, a soft hand is not a pair.
    pub fn toggle_soft(self) -> Self {
        match self {
            HandContext::Soft => HandContext::Hard,
            _ => HandContext::Soft,
        }
    }

    /// Toggles the pair context, a pair is not a soft hand.
    pub fn toggle_pair(self) -> Self {
        match self {
            HandContext::Pair => HandContext::Hard,
            _ => HandContext::Pair,
        }
    }
}

/// A blackjack hand with the dealer upcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlackjackHand {
    /// The player total.
    pub total: PlayerTotal,
    /// The dealer upcard rank.
    pub dealer: Rank,
    /// The hand context.
    pub context: HandContext,
}

impl BlackjackHand {
    const NATURAL: u8 = 21;

    /// Creates a new hand.
    pub fn new(total: PlayerTotal, dealer: Rank, context: HandContext) -> Self {
        Self {
            total,
            dealer,
            context,
        }
    }

    /// Creates a pair hand from the pair rank, a pair of aces totals 22.
    pub fn pair(rank: Rank, dealer: Rank) -> Self {
        let total = PlayerTotal::Points(rank.blackjack_value() * 2);
        Self::new(total, dealer, HandContext::Pair)
    }

    /// Checks if the hand is a pair of aces.
    pub fn is_pair_of_aces(&self) -> bool {
        self.context == HandContext::Pair
            && self.total == PlayerTotal::Points(PlayerTotal::PAIR_OF_ACES)
    }

    /// Creates a hand from the player two cards and the dealer upcard.
    pub fn from_cards(first: Rank, second: Rank, dealer: Rank) -> Self {
        if first == second {
            return Self::pair(first, dealer);
        }

        let total = first.blackjack_value() + second.blackjack_value();
        match (first, second) {
            _ if total == Self::NATURAL => {
                Self::new(PlayerTotal::Blackjack, dealer, HandContext::Hard)
            }
            (Rank::Ace, _) | (_, Rank::Ace) => {
                Self::new(PlayerTotal::Points(total), dealer, HandContext::Soft)
            }
            _ => Self::new(PlayerTotal::Points(total), dealer, HandContext::Hard),
        }
    }
}

impl fmt::Display for BlackjackHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pair_of_aces() {
            f.write_str("A,A")?;
        } else {
            write!(f, "{}", self.total)?;
        }

        write!(f, " vs Dealer {}", self.dealer)?;
        match self.context {
            HandContext::Hard => Ok(()),
            HandContext::Soft => f.write_str(" (Soft)"),
            HandContext::Pair => f.write_str(" (Pair)"),
        }
    }
}

/// A blackjack hand being entered, it has a decision once complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackjackInput {
    /// The player total if entered.
    pub total: Option<PlayerTotal>,
    /// The dealer upcard if selected.
    pub dealer: Option<Rank>,
    /// The hand context.
    pub context: HandContext,
}

impl BlackjackInput {
    /// Returns the hand if both the total and the dealer card are set.
    pub fn hand(&self) -> Option<BlackjackHand> {
        Some(BlackjackHand::new(self.total?, self.dealer?, self.context))
    }

    /// Steps the total up, an empty total starts from the lowest.
    pub fn total_up(&mut self) {
        let total = self
            .total
            .map_or(PlayerTotal::Points(PlayerTotal::MIN), |t| t.next_for(self.context));
        self.total = Some(total);
    }

    /// Steps the total down, an empty total starts from 21.
    pub fn total_down(&mut self) {
        let total = self
            .total
            .map_or(PlayerTotal::Points(PlayerTotal::MAX), |t| t.prev());
        self.total = Some(total);
    }

    /// Toggles the soft context.
    pub fn toggle_soft(&mut self) {
        self.set_context(self.context.toggle_soft());
    }

    /// Toggles the pair context.
    pub fn toggle_pair(&mut self) {
        self.set_context(self.context.toggle_pair());
    }

    /// Sets the context, a pair of aces that is no longer a pair is a soft 12.
    fn set_context(&mut self, context: HandContext) {
        self.context = context;

        let aces = Some(PlayerTotal::Points(PlayerTotal::PAIR_OF_ACES));
        if context != HandContext::Pair && self.total == aces {
            self.total = Some(PlayerTotal::Points(12));
            self.context = HandContext::Soft;
        }
    }
}

impl From<BlackjackHand> for BlackjackInput {
    fn from(hand: BlackjackHand) -> Self {
        Self {
            total: Some(hand.total),
            dealer: Some(hand.dealer),
            context: hand.context,
        }
    }
}

/// Returns the basic strategy play for a hand.
///
/// A natural blackjack is already settled and has no decision.
pub fn decide(hand: &BlackjackHand) -> Option<Decision> {
    let PlayerTotal::Points(total) = hand.total else {
        return None;
    };

    let dealer = hand.dealer.blackjack_value();

    let decision = match hand.context {
        HandContext::Pair if total % 2 == 0 => pair(total / 2, dealer),
        HandContext::Soft => soft(total, dealer),
        _ => None,
    };

    Some(decision.unwrap_or_else(|| hard(total, dealer)))
}

fn pair(value: u8, dealer: u8) -> Option<Decision> {
    let d = match value {
        11 => Decision::new(Play::Split, "Always split Aces"),
        8 => Decision::new(Play::Split, "Always split 8s"),
        10 => Decision::new(Play::NoSplit, "Never split 10s (you have 20!)"),
        5 => Decision::new(Play::NoSplit, "Pair of 5s: Double on 10"),
        9 if dealer == 7 || dealer >= 10 => {
            Decision::new(Play::Stand, "Stand with 18 vs dealer 7, 10, or A")
        }
        9 => Decision::new(Play::Split, "Split 9s vs 2-6, 8-9"),
        7 if dealer <= 7 => Decision::new(Play::Split, "Split 7s vs dealer 2-7"),
        7 => Decision::new(Play::Hit, "Hit 7s vs dealer 8+"),
        6 if (2..=6).contains(&dealer) => Decision::new(Play::Split, "Split 6s vs dealer 2-6"),
        6 => Decision::new(Play::Hit, "Hit 6s vs dealer 7+"),
        4 if dealer == 5 || dealer == 6 => {
            Decision::new(Play::Split, "Split 4s vs dealer 5-6 only")
        }
        4 => Decision::new(Play::Hit, "Hit 4s otherwise"),
        2 | 3 if (2..=7).contains(&dealer) => {
            Decision::new(Play::Split, "Split 2s/3s vs dealer 2-7")
        }
        2 | 3 => Decision::new(Play::Hit, "Hit 2s/3s vs dealer 8+"),
        _ => return None,
    };

    Some(d)
}

fn soft(total: u8, dealer: u8) -> Option<Decision> {
    let d = match total {
        19.. => Decision::new(Play::Stand, "Soft 19+ always stands"),
        18 if (3..=6).contains(&dealer) => {
            Decision::new(Play::Double(Fallback::Stand), "Soft 18: Double vs 3-6")
        }
        18 if matches!(dealer, 2 | 7 | 8) => Decision::new(Play::Stand, "Soft 18 vs 2, 7, 8"),
        18 => Decision::new(Play::Hit, "Soft 18: Hit vs 9, 10, A"),
        17 if (3..=6).contains(&dealer) => {
            Decision::new(Play::Double(Fallback::Hit), "Soft 17: Double vs 3-6")
        }
        17 => Decision::new(Play::Hit, "Soft 17: Hit otherwise"),
        15 | 16 if (4..=6).contains(&dealer) => Decision::new(
            Play::Double(Fallback::Hit),
            format!("Soft {total}: Double vs 4-6"),
        ),
        13 | 14 if dealer == 5 || dealer == 6 => Decision::new(
            Play::Double(Fallback::Hit),
            format!("Soft {total}: Double vs 5-6"),
        ),
        13..=16 => Decision::new(Play::Hit, format!("Soft {total}: Hit otherwise")),
        _ => return None,
    };

    Some(d)
}

fn hard(total: u8, dealer: u8) -> Decision {
    match total {
        17.. => Decision::new(Play::Stand, "Always stand on hard 17+"),
        16 if dealer >= 9 => Decision::new(Play::Surrender, "Hard 16: Surrender vs 9, 10, A"),
        16 if dealer >= 7 => Decision::new(Play::Hit, "Hard 16: Hit vs 7-8"),
        16 => Decision::new(Play::Stand, "Hard 16: Stand vs 2-6"),
        15 if dealer == 10 => Decision::new(Play::Surrender, "Hard 15: Surrender vs 10"),
        15 if dealer >= 7 => Decision::new(Play::Hit, "Hard 15: Hit vs 7+"),
        15 => Decision::new(Play::Stand, "Hard 15: Stand vs 2-6"),
        13 | 14 if dealer >= 7 => Decision::new(Play::Hit, format!("Hard {total}: Hit vs 7+")),
        13 | 14 => Decision::new(Play::Stand, format!("Hard {total}: Stand vs 2-6")),
        12 if (4..=6).contains(&dealer) => Decision::new(Play::Stand, "Hard 12: Stand vs 4-6"),
        12 => Decision::new(Play::Hit, "Hard 12: Hit vs 2-3, 7+"),
        11 if dealer == 11 => Decision::new(Play::Hit, "Hard 11: Hit vs Ace"),
        11 => Decision::new(Play::Double(Fallback::Hit), "Hard 11: Double vs 2-10"),
        10 if dealer >= 10 => Decision::new(Play::Hit, "Hard 10: Hit vs 10, A"),
        10 => Decision::new(Play::Double(Fallback::Hit), "Hard 10: Double vs 2-9"),
        9 if (3..=6).contains(&dealer) => {
            Decision::new(Play::Double(Fallback::Hit), "Hard 9: Double vs 3-6")
        }
        9 => Decision::new(Play::Hit, "Hard 9: Hit otherwise"),
        _ => Decision::new(Play::Hit, "Always hit hard 8 or less"),
    }
}
