// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Dealwise strategy rules for three card poker, blackjack and video poker.
//!
//! Each game has a `decide` function that returns the recommended play for a
//! complete hand, or `None` while the hand is still being entered.
//!
//! ```
//! use dealwise_core::{Card, three_card};
//!
//! let hand = ["QH", "6S", "4D"]
//!     .iter()
//!     .map(|c| c.parse::<Card>())
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let decision = three_card::decide(&hand).unwrap();
//! assert_eq!(decision.label(), "RAISE");
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod blackjack;
pub mod decision;
pub mod history;
pub mod host;
pub mod input;
pub mod presets;
pub mod three_card;
pub mod video_poker;

pub use decision::{Decision, Fallback, Game, Play};
pub use dealwise_eval::{Card, Deck, ParseCardError, Rank, Suit};
