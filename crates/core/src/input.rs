// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Keyboard card entry.
//!
//! Cards are typed as a rank token followed by a suit letter, `KH` for the king
//! of hearts or `10S` for the ten of spades. Keys accumulate in a short buffer
//! that is committed by a confirm key or when the idle deadline expires. The
//! deadline is owned by the host, that should call [CardInput::expire] once
//! [CardInput::deadline] is reached.
use std::time::{Duration, Instant};

use dealwise_eval::{Card, Rank, Suit};

/// The default idle time before a buffered token is committed.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(500);

/// Maximum number of characters in the input buffer.
const MAX_BUFFER_LEN: usize = 3;

/// The player hand owned by the host.
pub trait Selection {
    /// The selected cards in selection order.
    fn cards(&self) -> &[Card];

    /// The maximum number of cards in the hand.
    fn max_cards(&self) -> usize;

    /// Replaces the selected cards.
    fn set_cards(&mut self, cards: Vec<Card>);
}

/// A hand stored in a vector with a maximum size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedCards {
    cards: Vec<Card>,
    max_cards: usize,
}

impl SelectedCards {
    /// Creates an empty hand with the given size.
    pub fn new(max_cards: usize) -> Self {
        Self {
            cards: Vec::with_capacity(max_cards),
            max_cards,
        }
    }

    /// Checks if the hand has all its cards.
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.max_cards
    }
}

impl Selection for SelectedCards {
    fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn max_cards(&self) -> usize {
        self.max_cards
    }

    fn set_cards(&mut self, mut cards: Vec<Card>) {
        cards.truncate(self.max_cards);
        self.cards = cards;
    }
}

/// Result of toggling a card in a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The card was added to the hand.
    Selected(Card),
    /// The card was in the hand and has been removed.
    Deselected(Card),
    /// The hand is full and the card was not added.
    Full(Card),
}

/// Deselects a card if selected, otherwise selects it if there is room.
pub fn toggle<S: Selection + ?Sized>(selection: &mut S, card: Card) -> Toggle {
    let cards = selection.cards();

    if cards.contains(&card) {
        let cards = cards.iter().copied().filter(|c| c != &card).collect();
        selection.set_cards(cards);
        Toggle::Deselected(card)
    } else if cards.len() < selection.max_cards() {
        let mut cards = cards.to_vec();
        cards.push(card);
        selection.set_cards(cards);
        Toggle::Selected(card)
    } else {
        Toggle::Full(card)
    }
}

/// A key event for card entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A character key.
    Char(char),
    /// Commits the buffered token.
    Confirm,
    /// Clears the hand and the buffer.
    Escape,
    /// Removes the last selected card.
    Backspace,
}

/// The input buffer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Nothing typed.
    Empty,
    /// The first character of the `10` rank.
    PendingRank,
    /// A rank token without a suit.
    PendingSuit,
    /// Rank and suit typed, waiting for commit.
    Ready,
}

/// The effect of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key has no effect.
    Ignored,
    /// The key was added to the buffer.
    Buffered(BufferState),
    /// A token was committed and toggled in the hand.
    Committed(Toggle),
    /// A token was committed but it is not a card.
    Discarded,
    /// The hand and the buffer were cleared.
    Cleared,
    /// The last selected card was removed.
    Removed(Card),
}

/// Card entry state machine.
#[derive(Debug, Clone)]
pub struct CardInput {
    buffer: String,
    deadline: Option<Instant>,
    idle_timeout: Duration,
}

impl Default for CardInput {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl CardInput {
    /// Creates a new input with the given idle commit timeout.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            buffer: String::with_capacity(MAX_BUFFER_LEN),
            deadline: None,
            idle_timeout,
        }
    }

    /// The buffered characters.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The time when the buffered token will be committed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The buffer state.
    pub fn state(&self) -> BufferState {
        match self.buffer.as_str() {
            "" => BufferState::Empty,
            "1" => BufferState::PendingRank,
            "10" => BufferState::PendingSuit,
            s if s.len() == 1 => BufferState::PendingSuit,
            _ => BufferState::Ready,
        }
    }

    /// Handles a key event at the given time.
    pub fn on_key<S>(&mut self, key: Key, now: Instant, selection: &mut S) -> KeyOutcome
    where
        S: Selection + ?Sized,
    {
        match key {
            Key::Char(c) if c.is_ascii_alphanumeric() => {
                if self.buffer.len() >= MAX_BUFFER_LEN {
                    return KeyOutcome::Ignored;
                }

                self.buffer.push(c.to_ascii_uppercase());

                // Re-arm the commit deadline once there may be a rank and a suit.
                if self.buffer.len() >= 2 {
                    self.deadline = Some(now + self.idle_timeout);
                }

                KeyOutcome::Buffered(self.state())
            }
            Key::Char(_) => KeyOutcome::Ignored,
            Key::Confirm if self.buffer.len() >= 2 => self.commit(selection),
            Key::Confirm => KeyOutcome::Ignored,
            Key::Escape => {
                selection.set_cards(Vec::new());
                self.cancel();
                KeyOutcome::Cleared
            }
            Key::Backspace => {
                let mut cards = selection.cards().to_vec();
                match cards.pop() {
                    Some(card) => {
                        selection.set_cards(cards);
                        self.cancel();
                        KeyOutcome::Removed(card)
                    }
                    None => KeyOutcome::Ignored,
                }
            }
        }
    }

    /// Commits the buffer if the deadline has been reached.
    pub fn expire<S>(&mut self, now: Instant, selection: &mut S) -> Option<KeyOutcome>
    where
        S: Selection + ?Sized,
    {
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.commit(selection)),
            _ => None,
        }
    }

    /// Drops the buffer and any pending deadline.
    pub fn cancel(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }

    fn commit<S>(&mut self, selection: &mut S) -> KeyOutcome
    where
        S: Selection + ?Sized,
    {
        let card = decode(&self.buffer);
        self.cancel();

        match card {
            Some(card) => KeyOutcome::Committed(toggle(selection, card)),
            None => {
                log::debug!("Discarding card input");
                KeyOutcome::Discarded
            }
        }
    }
}

/// Decodes a `<rank><suit>` token, the ten rank is typed as `10`.
fn decode(token: &str) -> Option<Card> {
    let chars = token.chars().collect::<Vec<_>>();

    let (rank, suit) = match chars.as_slice() {
        ['1', '0', suit, ..] => (Rank::Ten, *suit),
        [rank, suit, ..] => (Rank::from_char(*rank)?, *suit),
        _ => return None,
    };

    let suit = Suit::from_char(suit)?;
    Some(Card::new(rank, suit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Duration = Duration::from_millis(500);

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn type_keys(input: &mut CardInput, keys: &str, now: Instant, sel: &mut SelectedCards) {
        for c in keys.chars() {
            input.on_key(Key::Char(c), now, sel);
        }
    }

    #[test]
    fn king_of_hearts_on_timeout() {
        let mut sel = SelectedCards::new(3);
        let mut input = CardInput::new(IDLE);
        let t0 = Instant::now();

        assert_eq!(
            input.on_key(Key::Char('k'), t0, &mut sel),
            KeyOutcome::Buffered(BufferState::PendingSuit)
        );
        assert_eq!(input.deadline(), None);

        assert_eq!(
            input.on_key(Key::Char('h'), t0, &mut sel),
            KeyOutcome::Buffered(BufferState::Ready)
        );
        assert_eq!(input.deadline(), Some(t0 + IDLE));

        // Not yet due.
        assert_eq!(input.expire(t0 + IDLE / 2, &mut sel), None);
        assert_eq!(input.buffer(), "KH");

        let outcome = input.expire(t0 + IDLE, &mut sel);
        assert_eq!(
            outcome,
            Some(KeyOutcome::Committed(Toggle::Selected(card("KH"))))
        );
        assert_eq!(sel.cards(), &[card("KH")]);
        assert_eq!(input.state(), BufferState::Empty);
        assert_eq!(input.deadline(), None);
    }

    #[test]
    fn ten_of_spades() {
        let mut sel = SelectedCards::new(5);
        let mut input = CardInput::new(IDLE);
        let t0 = Instant::now();

        assert_eq!(
            input.on_key(Key::Char('1'), t0, &mut sel),
            KeyOutcome::Buffered(BufferState::PendingRank)
        );
        assert_eq!(
            input.on_key(Key::Char('0'), t0, &mut sel),
            KeyOutcome::Buffered(BufferState::PendingSuit)
        );

        let t1 = t0 + IDLE / 2;
        input.on_key(Key::Char('S'), t1, &mut sel);

        // The deadline is re-armed by the last key.
        assert_eq!(input.deadline(), Some(t1 + IDLE));
        assert_eq!(input.expire(t0 + IDLE, &mut sel), None);

        input.expire(t1 + IDLE, &mut sel);
        assert_eq!(sel.cards(), &[card("10S")]);
    }

    #[test]
    fn confirm_commits() {
        let mut sel = SelectedCards::new(5);
        let mut input = CardInput::new(IDLE);
        let now = Instant::now();

        input.on_key(Key::Char('A'), now, &mut sel);
        assert_eq!(input.on_key(Key::Confirm, now, &mut sel), KeyOutcome::Ignored);

        input.on_key(Key::Char('D'), now, &mut sel);
        assert_eq!(
            input.on_key(Key::Confirm, now, &mut sel),
            KeyOutcome::Committed(Toggle::Selected(card("AD")))
        );
        assert_eq!(input.deadline(), None);
        assert_eq!(input.expire(now + IDLE, &mut sel), None);
    }

    #[test]
    fn invalid_tokens_are_discarded() {
        let mut sel = SelectedCards::new(5);
        let mut input = CardInput::new(IDLE);
        let now = Instant::now();

        type_keys(&mut input, "10X", now, &mut sel);
        assert_eq!(input.expire(now + IDLE, &mut sel), Some(KeyOutcome::Discarded));

        type_keys(&mut input, "KX", now, &mut sel);
        assert_eq!(input.on_key(Key::Confirm, now, &mut sel), KeyOutcome::Discarded);

        type_keys(&mut input, "1S", now, &mut sel);
        assert_eq!(input.on_key(Key::Confirm, now, &mut sel), KeyOutcome::Discarded);

        // A lone "10" is not a card.
        type_keys(&mut input, "10", now, &mut sel);
        assert_eq!(input.expire(now + IDLE, &mut sel), Some(KeyOutcome::Discarded));

        assert!(sel.cards().is_empty());
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn buffer_is_bounded() {
        let mut sel = SelectedCards::new(5);
        let mut input = CardInput::new(IDLE);
        let now = Instant::now();

        type_keys(&mut input, "QHJ", now, &mut sel);
        assert_eq!(input.on_key(Key::Char('S'), now, &mut sel), KeyOutcome::Ignored);
        assert_eq!(input.buffer(), "QHJ");
        assert_eq!(input.on_key(Key::Char('-'), now, &mut sel), KeyOutcome::Ignored);

        input.on_key(Key::Confirm, now, &mut sel);
        assert_eq!(sel.cards(), &[card("QH")]);
    }

    #[test]
    fn toggle_selection() {
        let mut sel = SelectedCards::new(2);
        let mut input = CardInput::new(IDLE);
        let now = Instant::now();

        for token in ["KH", "2C"] {
            type_keys(&mut input, token, now, &mut sel);
            input.on_key(Key::Confirm, now, &mut sel);
        }
        assert!(sel.is_full());

        // Full hand.
        type_keys(&mut input, "3C", now, &mut sel);
        assert_eq!(
            input.on_key(Key::Confirm, now, &mut sel),
            KeyOutcome::Committed(Toggle::Full(card("3C")))
        );

        // Deselect works on a full hand.
        type_keys(&mut input, "KH", now, &mut sel);
        assert_eq!(
            input.on_key(Key::Confirm, now, &mut sel),
            KeyOutcome::Committed(Toggle::Deselected(card("KH")))
        );
        assert_eq!(sel.cards(), &[card("2C")]);
    }

    #[test]
    fn escape_and_backspace() {
        let mut sel = SelectedCards::new(5);
        let mut input = CardInput::new(IDLE);
        let now = Instant::now();

        sel.set_cards(vec![card("AH"), card("KH"), card("QH")]);

        input.on_key(Key::Char('J'), now, &mut sel);
        input.on_key(Key::Char('H'), now, &mut sel);
        assert_eq!(
            input.on_key(Key::Backspace, now, &mut sel),
            KeyOutcome::Removed(card("QH"))
        );
        assert_eq!(sel.cards(), &[card("AH"), card("KH")]);
        assert_eq!(input.buffer(), "");
        assert_eq!(input.deadline(), None);

        input.on_key(Key::Char('J'), now, &mut sel);
        input.on_key(Key::Char('H'), now, &mut sel);
        assert_eq!(input.on_key(Key::Escape, now, &mut sel), KeyOutcome::Cleared);
        assert!(sel.cards().is_empty());
        assert_eq!(input.deadline(), None);
        assert_eq!(input.expire(now + IDLE, &mut sel), None);

        assert_eq!(input.on_key(Key::Backspace, now, &mut sel), KeyOutcome::Ignored);
    }

    #[test]
    fn cancel_drops_pending_commit() {
        let mut sel = SelectedCards::new(5);
        let mut input = CardInput::new(IDLE);
        let now = Instant::now();

        type_keys(&mut input, "AS", now, &mut sel);
        input.cancel();
        assert_eq!(input.expire(now + IDLE, &mut sel), None);
        assert!(sel.cards().is_empty());
    }
}
