// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types shared by the games decision rules.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The games supported by the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    /// Three card poker ante/raise-or-fold.
    ThreeCard,
    /// Blackjack basic strategy.
    Blackjack,
    /// Jacks or Better video poker.
    VideoPoker,
}

impl Game {
    /// Returns all games.
    pub fn games() -> impl DoubleEndedIterator<Item = Game> {
        [Game::ThreeCard, Game::Blackjack, Game::VideoPoker].into_iter()
    }

    /// The number of cards a hand needs, blackjack doesn't use cards.
    pub fn hand_size(&self) -> Option<usize> {
        match self {
            Game::ThreeCard => Some(crate::three_card::HAND_SIZE),
            Game::Blackjack => None,
            Game::VideoPoker => Some(crate::video_poker::HAND_SIZE),
        }
    }

    /// The game name used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Game::ThreeCard => "3-Card Poker",
            Game::Blackjack => "Blackjack",
            Game::VideoPoker => "Video Poker",
        }
    }

    /// The next game in tab order.
    pub fn next(&self) -> Game {
        match self {
            Game::ThreeCard => Game::Blackjack,
            Game::Blackjack => Game::VideoPoker,
            Game::VideoPoker => Game::ThreeCard,
        }
    }

    /// The previous game in tab order.
    pub fn prev(&self) -> Game {
        match self {
            Game::ThreeCard => Game::VideoPoker,
            Game::Blackjack => Game::ThreeCard,
            Game::VideoPoker => Game::Blackjack,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The action to take when doubling is not allowed by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fallback {
    /// Hit instead.
    Hit,
    /// Stand instead.
    Stand,
}

/// A recommended play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Play {
    /// Three card poker raise.
    Raise,
    /// Three card poker fold.
    Fold,
    /// Blackjack hit.
    Hit,
    /// Blackjack stand.
    Stand,
    /// Split the pair.
    Split,
    /// Don't split the pair and play it as a total.
    NoSplit,
    /// Double down, or the fallback play if doubling is not allowed.
    Double(Fallback),
    /// Surrender, or hit if surrender is not offered.
    Surrender,
    /// Video poker hold, the 1-based positions of the cards to keep.
    Hold(Vec<usize>),
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Play::Raise => f.write_str("RAISE"),
            Play::Fold => f.write_str("FOLD"),
            Play::Hit => f.write_str("HIT"),
            Play::Stand => f.write_str("STAND"),
            Play::Split => f.write_str("SPLIT"),
            Play::NoSplit => f.write_str("NO SPLIT"),
            Play::Double(Fallback::Hit) => f.write_str("DOUBLE (or Hit)"),
            Play::Double(Fallback::Stand) => f.write_str("DOUBLE (or Stand)"),
            Play::Surrender => f.write_str("SURRENDER (or Hit)"),
            Play::Hold(indices) => match indices.as_slice() {
                [] => f.write_str("DISCARD ALL"),
                [idx] => write!(f, "HOLD card {idx}"),
                indices if indices.len() == crate::video_poker::HAND_SIZE => {
                    f.write_str("HOLD ALL")
                }
                indices => {
                    let indices = indices
                        .iter()
                        .map(|idx| idx.to_string())
                        .collect::<Vec<_>>();
                    write!(f, "HOLD cards {}", indices.join(", "))
                }
            },
        }
    }
}

/// A decision for a hand with its justification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    /// The recommended play.
    pub play: Play,
    /// Human readable reason for the play.
    pub reason: String,
}

impl Decision {
    /// Creates a new decision.
    pub fn new(play: Play, reason: impl Into<String>) -> Self {
        Self {
            play,
            reason: reason.into(),
        }
    }

    /// The decision label.
    pub fn label(&self) -> String {
        self.play.to_string()
    }

    /// The 1-based positions to hold for video poker decisions.
    pub fn hold_indices(&self) -> Option<&[usize]> {
        match &self.play {
            Play::Hold(indices) => Some(indices),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.play, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_labels() {
        assert_eq!(Play::Raise.to_string(), "RAISE");
        assert_eq!(Play::NoSplit.to_string(), "NO SPLIT");
        assert_eq!(Play::Double(Fallback::Stand).to_string(), "DOUBLE (or Stand)");
        assert_eq!(Play::Surrender.to_string(), "SURRENDER (or Hit)");
        assert_eq!(Play::Hold(vec![]).to_string(), "DISCARD ALL");
        assert_eq!(Play::Hold(vec![4]).to_string(), "HOLD card 4");
        assert_eq!(Play::Hold(vec![1, 3]).to_string(), "HOLD cards 1, 3");
        assert_eq!(Play::Hold(vec![1, 2, 3, 4, 5]).to_string(), "HOLD ALL");
    }

    #[test]
    fn hold_indices() {
        let d = Decision::new(Play::Hold(vec![2, 5]), "Low Pair");
        assert_eq!(d.hold_indices(), Some(&[2, 5][..]));
        assert_eq!(d.to_string(), "HOLD cards 2, 5 (Low Pair)");

        let d = Decision::new(Play::Fold, "Below Q-6-4 threshold");
        assert_eq!(d.hold_indices(), None);
        assert_eq!(d.label(), "FOLD");
    }

    #[test]
    fn games_cycle() {
        for game in Game::games() {
            assert_eq!(game.next().prev(), game);
        }
        assert_eq!(Game::ThreeCard.hand_size(), Some(3));
        assert_eq!(Game::VideoPoker.hand_size(), Some(5));
        assert_eq!(Game::Blackjack.hand_size(), None);
    }
}
