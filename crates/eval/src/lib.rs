// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Dealwise hand evaluator.
//!
//! Classifies three and five cards hands from their rank and suit multiplicities.
//! To use the evaluator create a hand and use [HandShape] to get its category:
//!
//! ```
//! # use dealwise_eval::*;
//! let cards = ["AH", "KH", "QH", "JH", "10H"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//!
//! let shape = HandShape::new(&cards);
//! assert_eq!(shape.rank(), HandRank::RoyalFlush);
//! assert!(shape.is_straight_flush());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod shape;
pub use shape::{ACE_VALUE, HandRank, HandShape, JACK_VALUE, is_consecutive};

// Reexport cards types.
pub use dealwise_cards::{Card, Deck, ParseCardError, Rank, Suit};
