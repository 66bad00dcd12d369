// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Recent hands cache.
use bincode::Options;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    fmt,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use dealwise_eval::Card;

use crate::{
    blackjack::BlackjackHand,
    decision::{Decision, Game},
    host::Storage,
};

/// The storage key for the recent hands.
pub const RECENT_HANDS_KEY: &str = "dealwise-recent-hands";

/// The maximum number of recent hands.
pub const MAX_RECENT_HANDS: usize = 3;

/// Upper bound for the encoded cache size.
const MAX_ENCODED_SIZE: u64 = 16 * 1024;

/// The hand a decision was made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSnapshot {
    /// The cards of a poker hand in selection order.
    Cards(Vec<Card>),
    /// A blackjack total against a dealer card.
    Blackjack(BlackjackHand),
}

impl fmt::Display for HandSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandSnapshot::Cards(cards) => {
                for (idx, card) in cards.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{card}")?;
                }
                Ok(())
            }
            HandSnapshot::Blackjack(hand) => write!(f, "{hand}"),
        }
    }
}

/// A decision made for a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHand<H = HandSnapshot> {
    /// The hand game.
    pub game: Game,
    /// The hand.
    pub hand: H,
    /// The decision for the hand.
    pub decision: Decision,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// The last decided hands, newest first.
///
/// Holds at most one entry for each game and hand pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHands<H = HandSnapshot> {
    hands: Vec<RecentHand<H>>,
}

impl<H> Default for RecentHands<H> {
    fn default() -> Self {
        Self {
            hands: Vec::with_capacity(MAX_RECENT_HANDS + 1),
        }
    }
}

impl<H: PartialEq> RecentHands<H> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a decision with the current time.
    pub fn insert(&mut self, game: Game, hand: H, decision: Decision) {
        self.insert_at(game, hand, decision, now_millis());
    }

    /// Records a decision with the given timestamp.
    pub fn insert_at(&mut self, game: Game, hand: H, decision: Decision, timestamp: u64) {
        self.hands.retain(|h| h.game != game || h.hand != hand);
        self.hands.insert(
            0,
            RecentHand {
                game,
                hand,
                decision,
                timestamp,
            },
        );
        self.hands.truncate(MAX_RECENT_HANDS);
    }

    /// Returns the entries newest first.
    pub fn all(&self) -> impl Iterator<Item = &RecentHand<H>> {
        self.hands.iter()
    }

    /// Returns the entry at the given position, 0 is the newest.
    pub fn get(&self, idx: usize) -> Option<&RecentHand<H>> {
        self.hands.get(idx)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    /// Checks if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

impl<H> RecentHands<H>
where
    H: PartialEq + Serialize + DeserializeOwned,
{
    /// Loads the cache from storage.
    ///
    /// Missing or unreadable data loads an empty cache.
    pub fn load(storage: &dyn Storage) -> Self {
        let bytes = match storage.get(RECENT_HANDS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Self::new(),
            Err(e) => {
                log::warn!("Cannot read recent hands: {e}");
                return Self::new();
            }
        };

        match codec().deserialize::<Vec<RecentHand<H>>>(&bytes) {
            Ok(hands) => {
                // Replay oldest first so the newest entry of a pair is kept.
                let mut recent = Self::new();
                for h in hands.into_iter().rev() {
                    recent.insert_at(h.game, h.hand, h.decision, h.timestamp);
                }
                recent
            }
            Err(e) => {
                log::warn!("Discarding invalid recent hands: {e}");
                Self::new()
            }
        }
    }

    /// Saves the cache to storage.
    pub fn save(&self, storage: &mut dyn Storage) -> anyhow::Result<()> {
        let bytes = codec().serialize(&self.hands)?;
        storage.set(RECENT_HANDS_KEY, &bytes)
    }
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_ENCODED_SIZE)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// A recent hands cache that can be shared between threads.
#[derive(Debug)]
pub struct SharedRecentHands<H = HandSnapshot> {
    hands: Arc<Mutex<RecentHands<H>>>,
}

impl<H> Clone for SharedRecentHands<H> {
    fn clone(&self) -> Self {
        Self {
            hands: self.hands.clone(),
        }
    }
}

impl<H: PartialEq + Clone> SharedRecentHands<H> {
    /// Wraps a cache.
    pub fn new(hands: RecentHands<H>) -> Self {
        Self {
            hands: Arc::new(Mutex::new(hands)),
        }
    }

    /// Records a decision with the current time.
    pub fn insert(&self, game: Game, hand: H, decision: Decision) {
        self.hands.lock().insert(game, hand, decision);
    }

    /// Returns a copy of the entries newest first.
    pub fn snapshot(&self) -> Vec<RecentHand<H>> {
        self.hands.lock().all().cloned().collect()
    }

    /// Runs a function with the locked cache.
    pub fn with<R>(&self, f: impl FnOnce(&RecentHands<H>) -> R) -> R {
        f(&self.hands.lock())
    }
}
