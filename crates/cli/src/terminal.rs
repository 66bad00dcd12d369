// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::Result;
use crossterm::{
    clipboard::CopyToClipboard,
    cursor,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Stylize},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use futures_util::StreamExt;
use std::{io, time::Instant};

use dealwise_core::{
    Card, Game, Play, Suit,
    blackjack::{HandContext, PlayerTotal},
    host::{Clipboard, summary},
    input::{BufferState, Key},
};

use crate::app::{App, Command, Flow};

/// Copies text using the OSC 52 terminal escape sequence.
#[derive(Debug, Default)]
pub struct Osc52;

impl Clipboard for Osc52 {
    fn copy_text(&mut self, text: &str) {
        if let Err(e) = execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text)) {
            log::warn!("Clipboard copy failed: {e}");
        }
    }
}

/// Runs the terminal loop.
pub async fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let res = event_loop(&mut app, &mut stdout).await;

    execute!(stdout, LeaveAlternateScreen, cursor::Show)?;
    disable_raw_mode()?;

    res
}

async fn event_loop(app: &mut App, stdout: &mut io::Stdout) -> Result<()> {
    let mut reader = EventStream::new();
    let mut clipboard = Osc52;

    draw(stdout, app)?;

    loop {
        let deadline = app.deadline();

        tokio::select! {
            // We have received an event from the terminal.
            res = reader.next() => {
                match res {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        let Some(cmd) = command(app.game(), key) else {
                            continue;
                        };

                        if app.handle(cmd, Instant::now(), &mut clipboard) == Flow::Quit {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            },
            // The typed card is due.
            _ = wait_for(deadline) => {
                app.expire(Instant::now());
            },
        };

        draw(stdout, app)?;
    }

    Ok(())
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

/// Maps a key press to a command for the given game.
pub fn command(game: Game, key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let cmd = match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('r') if ctrl => Command::Deal,
        KeyCode::Char('y') if ctrl => Command::Copy,
        KeyCode::Char(c @ '1'..='3') if alt => Command::Recent(c as usize - '1' as usize),
        _ if ctrl || alt => return None,
        KeyCode::Tab => Command::NextGame,
        KeyCode::BackTab => Command::PrevGame,
        KeyCode::F(n @ 1..=5) => Command::Preset(n as usize - 1),
        code if game == Game::Blackjack => match code {
            KeyCode::Up => Command::TotalUp,
            KeyCode::Down => Command::TotalDown,
            KeyCode::Right => Command::DealerNext,
            KeyCode::Left => Command::DealerPrev,
            KeyCode::Char('s' | 'S') => Command::ToggleSoft,
            KeyCode::Char('p' | 'P') => Command::TogglePair,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Command::NewHand,
            _ => return None,
        },
        KeyCode::Char(' ') | KeyCode::Enter => Command::Input(Key::Confirm),
        KeyCode::Char(c) => Command::Input(Key::Char(c)),
        KeyCode::Esc => Command::Input(Key::Escape),
        KeyCode::Backspace => Command::Input(Key::Backspace),
        _ => return None,
    };

    Some(cmd)
}

fn draw(w: &mut impl io::Write, app: &App) -> Result<()> {
    queue!(w, Clear(ClearType::All), cursor::MoveTo(1, 1))?;

    for game in Game::games() {
        let label = format!(" {game} ");
        if game == app.game() {
            queue!(w, style::PrintStyledContent(label.as_str().black().on_green()))?;
        } else {
            queue!(w, style::PrintStyledContent(label.as_str().dark_grey()))?;
        }
        queue!(w, style::Print(" "))?;
    }

    match app.cards() {
        Some(cards) => print_cards(w, app, cards)?,
        None => print_blackjack(w, app)?,
    }

    let decision = app.current();
    queue!(w, cursor::MoveTo(1, 7))?;
    match &decision {
        Some((_, decision)) => {
            let label = decision.play.to_string();
            let styled = match decision.play {
                Play::Raise | Play::Split | Play::Stand => label.as_str().green().bold(),
                Play::Fold | Play::Surrender => label.as_str().red().bold(),
                _ => label.as_str().yellow().bold(),
            };
            queue!(
                w,
                style::PrintStyledContent(styled),
                cursor::MoveTo(1, 8),
                style::Print(&decision.reason)
            )?;
        }
        None => queue!(w, style::PrintStyledContent("Enter a hand".dark_grey()))?,
    }

    queue!(w, cursor::MoveTo(1, 10), style::Print("Recent hands"))?;
    for (idx, recent) in app.recent().enumerate() {
        let text = summary(recent.game, &recent.hand, &recent.decision);
        queue!(
            w,
            cursor::MoveTo(1, 11 + idx as u16),
            style::PrintStyledContent(format!("Alt-{} ", idx + 1).dark_grey()),
            style::Print(text)
        )?;
    }

    let help = match app.game() {
        Game::Blackjack => {
            "Up/Down total  Left/Right dealer  s soft  p pair  n new hand  Ctrl-R deal"
        }
        _ => "Type cards (KH, 10S)  Space commit  Bksp undo  Esc clear  F1-F5 presets  Ctrl-R deal",
    };

    queue!(
        w,
        cursor::MoveTo(1, 15),
        style::PrintStyledContent(help.dark_grey()),
        cursor::MoveTo(1, 16),
        style::PrintStyledContent("Tab game  Ctrl-Y copy  Ctrl-C quit".dark_grey()),
    )?;

    if let Some(status) = app.status() {
        queue!(
            w,
            cursor::MoveTo(1, 18),
            style::PrintStyledContent(status.yellow())
        )?;
    }

    w.flush()?;

    Ok(())
}

fn print_cards(w: &mut impl io::Write, app: &App, cards: &[Card]) -> Result<()> {
    let size = app.game().hand_size().unwrap_or_default();

    queue!(w, cursor::MoveTo(1, 3), style::Print("Hand   "))?;
    for idx in 0..size {
        match cards.get(idx) {
            Some(card) => {
                let text = format!("{card:>3} ");
                let styled = match card.suit() {
                    Suit::Hearts | Suit::Diamonds => text.as_str().red(),
                    Suit::Spades | Suit::Clubs => text.as_str().white(),
                };
                queue!(w, style::PrintStyledContent(styled))?;
            }
            None => queue!(w, style::PrintStyledContent(" __ ".dark_grey()))?,
        }
    }

    let input = app.input();
    let hint = match input.state() {
        BufferState::Empty => "",
        BufferState::PendingRank => "rank",
        BufferState::PendingSuit => "suit",
        BufferState::Ready => "commit",
    };

    queue!(
        w,
        cursor::MoveTo(1, 5),
        style::Print(format!("Input  {:<4}", input.buffer())),
        style::PrintStyledContent(hint.dark_grey())
    )?;

    Ok(())
}

fn print_blackjack(w: &mut impl io::Write, app: &App) -> Result<()> {
    let input = app.blackjack();

    let total = match input.total {
        Some(PlayerTotal::Points(PlayerTotal::PAIR_OF_ACES))
            if input.context == HandContext::Pair =>
        {
            "A,A".to_string()
        }
        Some(total) => total.to_string(),
        None => "--".to_string(),
    };
    let dealer = input
        .dealer
        .map_or_else(|| "--".to_string(), |r| r.to_string());

    queue!(
        w,
        cursor::MoveTo(1, 3),
        style::Print(format!("Total  {total:>3}    Dealer  {dealer:>2}    ")),
        style::PrintStyledContent(format!("{:?}", input.context).cyan())
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn global_keys() {
        for game in Game::games() {
            assert_eq!(command(game, ctrl('c')), Some(Command::Quit));
            assert_eq!(command(game, ctrl('r')), Some(Command::Deal));
            assert_eq!(command(game, ctrl('y')), Some(Command::Copy));
            assert_eq!(command(game, ctrl('x')), None);
            assert_eq!(command(game, key(KeyCode::Tab)), Some(Command::NextGame));
            assert_eq!(command(game, key(KeyCode::BackTab)), Some(Command::PrevGame));
            assert_eq!(command(game, key(KeyCode::F(1))), Some(Command::Preset(0)));
            assert_eq!(command(game, key(KeyCode::F(6))), None);

            let alt = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT);
            assert_eq!(command(game, alt), Some(Command::Recent(2)));
        }
    }

    #[test]
    fn card_entry_keys() {
        let game = Game::VideoPoker;
        assert_eq!(
            command(game, key(KeyCode::Char('k'))),
            Some(Command::Input(Key::Char('k')))
        );

        let shifted = KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(command(game, shifted), Some(Command::Input(Key::Char('H'))));

        assert_eq!(
            command(game, key(KeyCode::Char(' '))),
            Some(Command::Input(Key::Confirm))
        );
        assert_eq!(
            command(game, key(KeyCode::Esc)),
            Some(Command::Input(Key::Escape))
        );
        assert_eq!(
            command(game, key(KeyCode::Backspace)),
            Some(Command::Input(Key::Backspace))
        );
        assert_eq!(command(game, key(KeyCode::Up)), None);
    }

    #[test]
    fn blackjack_keys() {
        let game = Game::Blackjack;
        assert_eq!(command(game, key(KeyCode::Up)), Some(Command::TotalUp));
        assert_eq!(command(game, key(KeyCode::Left)), Some(Command::DealerPrev));
        assert_eq!(command(game, key(KeyCode::Char('s'))), Some(Command::ToggleSoft));
        assert_eq!(command(game, key(KeyCode::Char('p'))), Some(Command::TogglePair));
        assert_eq!(command(game, key(KeyCode::Esc)), Some(Command::NewHand));
        assert_eq!(command(game, key(KeyCode::Char('k'))), None);
    }
}
