// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sample hands for quick entry.
use dealwise_eval::{
    Card,
    Rank::{self, *},
    Suit::{self, *},
};

use crate::decision::Game;

/// A named sample hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// The preset name.
    pub name: &'static str,
    /// The preset cards.
    pub cards: &'static [Card],
}

const fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

const THREE_CARD: &[Preset] = &[
    Preset {
        name: "Q-6-4",
        cards: &[c(Queen, Hearts), c(Six, Spades), c(Four, Diamonds)],
    },
    Preset {
        name: "Q-5-3",
        cards: &[c(Queen, Hearts), c(Five, Spades), c(Trey, Diamonds)],
    },
    Preset {
        name: "Pair 8s",
        cards: &[c(Eight, Hearts), c(Eight, Spades), c(King, Diamonds)],
    },
    Preset {
        name: "K-high",
        cards: &[c(King, Hearts), c(Seven, Spades), c(Deuce, Diamonds)],
    },
    Preset {
        name: "Flush",
        cards: &[c(Ace, Hearts), c(King, Hearts), c(Queen, Hearts)],
    },
];

const VIDEO_POKER: &[Preset] = &[
    Preset {
        name: "Royal",
        cards: &[
            c(Ace, Hearts),
            c(King, Hearts),
            c(Queen, Hearts),
            c(Jack, Hearts),
            c(Ten, Hearts),
        ],
    },
    Preset {
        name: "Pair Js",
        cards: &[
            c(Jack, Hearts),
            c(Jack, Spades),
            c(Trey, Diamonds),
            c(Seven, Clubs),
            c(Nine, Hearts),
        ],
    },
    Preset {
        name: "4 Flush",
        cards: &[
            c(Ace, Hearts),
            c(King, Hearts),
            c(Queen, Hearts),
            c(Jack, Hearts),
            c(Trey, Spades),
        ],
    },
    Preset {
        name: "Nothing",
        cards: &[
            c(Deuce, Hearts),
            c(Five, Spades),
            c(Eight, Diamonds),
            c(Jack, Clubs),
            c(King, Spades),
        ],
    },
];

/// Returns the sample hands for a game, blackjack has none.
pub fn presets(game: Game) -> &'static [Preset] {
    match game {
        Game::ThreeCard => THREE_CARD,
        Game::Blackjack => &[],
        Game::VideoPoker => VIDEO_POKER,
    }
}
