// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Advisor state driven by the terminal commands.
use std::time::Instant;

use dealwise_core::{
    Card, Deck, Decision, Game, Rank,
    blackjack::{self, BlackjackHand, BlackjackInput},
    history::{HandSnapshot, RecentHand, RecentHands},
    host::{Clipboard, Storage, summary},
    input::{CardInput, Key, KeyOutcome, SelectedCards, Selection, Toggle},
    presets::presets,
    three_card, video_poker,
};

use crate::Config;

/// Dealer upcards in entry order, faces are entered as 10.
const DEALER_CARDS: [Rank; 10] = [
    Rank::Deuce,
    Rank::Trey,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Ace,
];

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A card entry key.
    Input(Key),
    /// Switch to the next game.
    NextGame,
    /// Switch to the previous game.
    PrevGame,
    /// Load a sample hand.
    Preset(usize),
    /// Deal a random hand.
    Deal,
    /// Copy the decision summary to the clipboard.
    Copy,
    /// Load a recent hand, 0 is the newest.
    Recent(usize),
    /// Increase the blackjack total.
    TotalUp,
    /// Decrease the blackjack total.
    TotalDown,
    /// Select the next dealer upcard.
    DealerNext,
    /// Select the previous dealer upcard.
    DealerPrev,
    /// Toggle the soft hand context.
    ToggleSoft,
    /// Toggle the pair context.
    TogglePair,
    /// Clear the blackjack hand.
    NewHand,
    /// Exit the application.
    Quit,
}

/// Whether the event loop should continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Exit.
    Quit,
}

/// The advisor state.
pub struct App {
    game: Game,
    three_card: SelectedCards,
    video_poker: SelectedCards,
    blackjack: BlackjackInput,
    input: CardInput,
    recent: RecentHands,
    storage: Box<dyn Storage>,
    last_recorded: Option<(Game, HandSnapshot)>,
    status: Option<String>,
}

impl App {
    /// Creates the application state loading the recent hands from storage.
    pub fn new(config: &Config, storage: Box<dyn Storage>) -> Self {
        let recent: RecentHands = RecentHands::load(storage.as_ref());
        log::info!("Loaded {} recent hands", recent.len());

        Self {
            game: config.game,
            three_card: SelectedCards::new(three_card::HAND_SIZE),
            video_poker: SelectedCards::new(video_poker::HAND_SIZE),
            blackjack: BlackjackInput::default(),
            input: CardInput::new(config.idle_timeout),
            recent,
            storage,
            last_recorded: None,
            status: None,
        }
    }

    /// The current game.
    pub fn game(&self) -> Game {
        self.game
    }

    /// The selected cards for card games.
    pub fn cards(&self) -> Option<&[Card]> {
        match self.game {
            Game::ThreeCard => Some(self.three_card.cards()),
            Game::VideoPoker => Some(self.video_poker.cards()),
            Game::Blackjack => None,
        }
    }

    /// The blackjack hand being entered.
    pub fn blackjack(&self) -> &BlackjackInput {
        &self.blackjack
    }

    /// The card input state.
    pub fn input(&self) -> &CardInput {
        &self.input
    }

    /// The recent hands newest first.
    pub fn recent(&self) -> impl Iterator<Item = &RecentHand> {
        self.recent.all()
    }

    /// The last status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// When the buffered card should be committed.
    pub fn deadline(&self) -> Option<Instant> {
        self.input.deadline()
    }

    /// The decision for the current hand if complete.
    pub fn current(&self) -> Option<(HandSnapshot, Decision)> {
        match self.game {
            Game::ThreeCard => {
                let cards = self.three_card.cards();
                three_card::decide(cards).map(|d| (HandSnapshot::Cards(cards.to_vec()), d))
            }
            Game::VideoPoker => {
                let cards = self.video_poker.cards();
                video_poker::decide(cards).map(|d| (HandSnapshot::Cards(cards.to_vec()), d))
            }
            Game::Blackjack => {
                let hand = self.blackjack.hand()?;
                blackjack::decide(&hand).map(|d| (HandSnapshot::Blackjack(hand), d))
            }
        }
    }

    /// Handles a command.
    pub fn handle(&mut self, cmd: Command, now: Instant, clipboard: &mut dyn Clipboard) -> Flow {
        self.status = None;

        match cmd {
            Command::Input(key) => self.on_key(key, now),
            Command::NextGame => self.switch_game(self.game.next()),
            Command::PrevGame => self.switch_game(self.game.prev()),
            Command::Preset(idx) => self.load_preset(idx),
            Command::Deal => self.deal(),
            Command::Copy => self.copy(clipboard),
            Command::Recent(idx) => self.load_recent(idx),
            Command::TotalUp => self.blackjack.total_up(),
            Command::TotalDown => self.blackjack.total_down(),
            Command::DealerNext => self.step_dealer(1),
            Command::DealerPrev => self.step_dealer(DEALER_CARDS.len() - 1),
            Command::ToggleSoft => self.blackjack.toggle_soft(),
            Command::TogglePair => self.blackjack.toggle_pair(),
            Command::NewHand => self.blackjack = BlackjackInput::default(),
            Command::Quit => {
                self.input.cancel();
                return Flow::Quit;
            }
        }

        self.record();
        Flow::Continue
    }

    /// Commits the buffered card if its deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        let selection = match self.game {
            Game::ThreeCard => &mut self.three_card,
            Game::VideoPoker => &mut self.video_poker,
            Game::Blackjack => return,
        };

        if let Some(outcome) = self.input.expire(now, selection) {
            self.show_outcome(outcome);
            self.record();
        }
    }

    fn on_key(&mut self, key: Key, now: Instant) {
        let selection = match self.game {
            Game::ThreeCard => &mut self.three_card,
            Game::VideoPoker => &mut self.video_poker,
            Game::Blackjack => return,
        };

        let outcome = self.input.on_key(key, now, selection);
        self.show_outcome(outcome);
    }

    fn show_outcome(&mut self, outcome: KeyOutcome) {
        self.status = match outcome {
            KeyOutcome::Committed(Toggle::Full(card)) => {
                Some(format!("Hand is full, {card} not added"))
            }
            KeyOutcome::Discarded => Some("Unknown card".to_string()),
            _ => None,
        };
    }

    fn switch_game(&mut self, game: Game) {
        self.input.cancel();
        self.game = game;
    }

    fn selection_mut(&mut self) -> Option<&mut SelectedCards> {
        match self.game {
            Game::ThreeCard => Some(&mut self.three_card),
            Game::VideoPoker => Some(&mut self.video_poker),
            Game::Blackjack => None,
        }
    }

    fn load_preset(&mut self, idx: usize) {
        match presets(self.game).get(idx) {
            Some(preset) => {
                self.input.cancel();
                if let Some(selection) = self.selection_mut() {
                    selection.set_cards(preset.cards.to_vec());
                }
                self.status = Some(format!("Loaded {}", preset.name));
            }
            None => self.status = Some(format!("No preset F{}", idx + 1)),
        }
    }

    fn deal(&mut self) {
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());
        self.input.cancel();

        match self.game.hand_size() {
            Some(size) => {
                let cards = (0..size).filter_map(|_| deck.deal()).collect();
                if let Some(selection) = self.selection_mut() {
                    selection.set_cards(cards);
                }
            }
            None => {
                let cards = (0..3).filter_map(|_| deck.deal()).collect::<Vec<_>>();
                if let &[first, dealer, second] = cards.as_slice() {
                    // Faces show as 10 in the dealer selector.
                    let upcard = match dealer.rank() {
                        Rank::Jack | Rank::Queen | Rank::King => Rank::Ten,
                        rank => rank,
                    };
                    let hand = BlackjackHand::from_cards(first.rank(), second.rank(), upcard);
                    self.blackjack = BlackjackInput::from(hand);
                }
            }
        }
    }

    fn copy(&mut self, clipboard: &mut dyn Clipboard) {
        match self.current() {
            Some((hand, decision)) => {
                clipboard.copy_text(&summary(self.game, &hand, &decision));
                self.status = Some("Copied to clipboard".to_string());
            }
            None => self.status = Some("Nothing to copy".to_string()),
        }
    }

    fn load_recent(&mut self, idx: usize) {
        let Some(entry) = self.recent.get(idx).cloned() else {
            self.status = Some(format!("No recent hand {}", idx + 1));
            return;
        };

        self.switch_game(entry.game);
        match &entry.hand {
            HandSnapshot::Cards(cards) => {
                if let Some(selection) = self.selection_mut() {
                    selection.set_cards(cards.clone());
                }
            }
            HandSnapshot::Blackjack(hand) => self.blackjack = BlackjackInput::from(*hand),
        }

        // Keep the recent list order.
        self.last_recorded = Some((entry.game, entry.hand));
    }

    fn step_dealer(&mut self, step: usize) {
        let next = match self.blackjack.dealer {
            Some(rank) => {
                let idx = DEALER_CARDS.iter().position(|r| *r == rank).unwrap_or_default();
                DEALER_CARDS[(idx + step) % DEALER_CARDS.len()]
            }
            None if step == 1 => DEALER_CARDS[0],
            None => DEALER_CARDS[DEALER_CARDS.len() - 1],
        };
        self.blackjack.dealer = Some(next);
    }

    /// Adds the current hand to the recent hands when it has a new decision.
    fn record(&mut self) {
        let Some((hand, decision)) = self.current() else {
            return;
        };

        let key = (self.game, hand);
        if self.last_recorded.as_ref() == Some(&key) {
            return;
        }

        self.recent.insert(key.0, key.1.clone(), decision);
        self.last_recorded = Some(key);

        if let Err(e) = self.recent.save(self.storage.as_mut()) {
            log::warn!("Cannot save recent hands: {e}");
        }
    }
}
