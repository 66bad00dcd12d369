// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Dealwise playing cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use dealwise_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.poker_value(), 14);
//! assert_eq!(ah.blackjack_value(), 11);
//!
//! let kd: Card = "KD".parse().unwrap();
//! assert_eq!(kd, Card::new(Rank::King, Suit::Diamonds));
//! assert_eq!(kd.to_string(), "K♦");
//! ```
//!
//! and a [Deck] type for enumerating and shuffling the 52 cards:
//!
//! ```
//! # use dealwise_cards::Deck;
//! let hand = Deck::new_and_shuffled(&mut rand::rng())
//!     .into_iter()
//!     .take(5)
//!     .collect::<Vec<_>>();
//! assert_eq!(hand.len(), 5);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
