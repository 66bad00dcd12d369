// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Capabilities provided by the host application.
use ahash::AHashMap;
use anyhow::Result;

use crate::{decision::Decision, decision::Game, history::HandSnapshot};

/// A key value store for small byte values.
pub trait Storage {
    /// Gets the value for a key, `None` if the key has never been set.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets the value for a key.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Copies text to the system clipboard.
///
/// Copy is fire and forget, implementations must not report failures.
pub trait Clipboard {
    /// Copies the given text.
    fn copy_text(&mut self, text: &str);
}

/// An in memory [Storage].
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: AHashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Formats a one line summary of a decision for the clipboard.
pub fn summary(game: Game, hand: &HandSnapshot, decision: &Decision) -> String {
    format!(
        "{}: {} → {} ({})",
        game.label(),
        hand,
        decision.play,
        decision.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::{self, BlackjackHand, HandContext, PlayerTotal};
    use crate::{three_card, video_poker};
    use dealwise_eval::{Card, Rank};

    fn hand(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn card_game_summaries() {
        let cards = hand("QH 6S 4D");
        let decision = three_card::decide(&cards).unwrap();
        assert_eq!(
            summary(Game::ThreeCard, &HandSnapshot::Cards(cards), &decision),
            "3-Card Poker: Q♥ 6♠ 4♦ → RAISE (Q-6-4 or better (exactly Q-6-4 threshold))"
        );

        let cards = hand("JH JS 3D 7C 10H");
        let decision = video_poker::decide(&cards).unwrap();
        assert_eq!(
            summary(Game::VideoPoker, &HandSnapshot::Cards(cards), &decision),
            "Video Poker: J♥ J♠ 3♦ 7♣ 10♥ → HOLD cards 1, 2 (High Pair (Jacks or Better))"
        );
    }

    #[test]
    fn blackjack_summary() {
        let hand = BlackjackHand::new(PlayerTotal::Points(18), Rank::Nine, HandContext::Soft);
        let decision = blackjack::decide(&hand).unwrap();
        let text = summary(Game::Blackjack, &HandSnapshot::Blackjack(hand), &decision);
        assert!(text.starts_with("Blackjack: 18 vs Dealer 9 (Soft) → HIT ("));
    }

    #[test]
    fn memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("key").unwrap(), None);

        storage.set("key", b"value").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some(&b"value"[..]));

        storage.set("key", b"other").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some(&b"other"[..]));
    }
}
