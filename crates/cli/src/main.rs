// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Dealwise terminal strategy advisor.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::error;
use std::{fs, path::PathBuf, process::ExitCode, time::Duration};

use dealwise_core::{
    Card, Game, Rank,
    blackjack::{self, BlackjackHand, HandContext, PlayerTotal},
    history::HandSnapshot,
    host::summary,
    three_card, video_poker,
};

pub mod app;
pub mod storage;
pub mod terminal;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    ThreeCard,
    Blackjack,
    VideoPoker,
}

impl From<GameArg> for Game {
    fn from(game: GameArg) -> Self {
        match game {
            GameArg::ThreeCard => Game::ThreeCard,
            GameArg::Blackjack => Game::Blackjack,
            GameArg::VideoPoker => Game::VideoPoker,
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// The game to play.
    #[clap(long, short, value_enum, default_value_t = GameArg::ThreeCard)]
    game: GameArg,
    /// Prints the decision for the given cards and exits, e.g. "QH 6S 4D".
    #[clap(long, conflicts_with = "total")]
    hand: Option<String>,
    /// Prints the blackjack decision for the player total and exits.
    #[clap(long, requires = "dealer", value_parser = clap::value_parser!(u8).range(4..=21))]
    total: Option<u8>,
    /// Prints the blackjack decision for a pair of the given rank and exits.
    #[clap(long, requires = "dealer", conflicts_with_all = ["hand", "total"])]
    pair_rank: Option<Rank>,
    /// The blackjack dealer upcard rank.
    #[clap(long)]
    dealer: Option<Rank>,
    /// The blackjack hand is soft.
    #[clap(long, requires = "total", conflicts_with = "pair")]
    soft: bool,
    /// The blackjack hand is a pair.
    #[clap(long, requires = "total")]
    pair: bool,
    /// Milliseconds before a typed card is committed.
    #[clap(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(100..=5000))]
    idle_ms: u64,
    /// The directory for the recent hands and the log file.
    #[clap(long)]
    storage: Option<PathBuf>,
}

/// The advisor configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Idle time before a typed card is committed.
    pub idle_timeout: Duration,
    /// The storage directory, `None` for the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// The initial game.
    pub game: Game,
}

impl Config {
    fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => directories::ProjectDirs::from("", "", "dealwise")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .context("Cannot find the data directory, use --storage"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config {
        idle_timeout: Duration::from_millis(cli.idle_ms),
        storage_dir: cli.storage.clone(),
        game: cli.game.into(),
    };

    let one_shot_mode = cli.hand.is_some()
        || cli.total.is_some()
        || cli.pair_rank.is_some()
        || cli.dealer.is_some();

    let res = if one_shot_mode {
        init_logger(None);
        one_shot(&cli, &config).map(|line| println!("{line}"))
    } else {
        match open_log(&config) {
            Ok((dir, log_file)) => {
                init_logger(Some(log_file));
                interactive(config, dir).await
            }
            Err(e) => {
                // No log file, report to stderr.
                init_logger(None);
                Err(e)
            }
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(log_file: Option<fs::File>) {
    let mut builder = env_logger::builder();
    builder
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis();

    // The screen is in raw mode, log to a file.
    if let Some(file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
}

/// Creates the storage directory and opens the log file in it.
fn open_log(config: &Config) -> Result<(PathBuf, fs::File)> {
    let dir = config.data_dir()?;
    fs::create_dir_all(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;

    let log_path = dir.join("dealwise.log");
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Cannot open {}", log_path.display()))?;

    Ok((dir, log_file))
}

async fn interactive(config: Config, dir: PathBuf) -> Result<()> {
    let store = storage::FileStorage::new(dir);
    log::info!("Starting with storage in {}", store.dir().display());

    let app = app::App::new(&config, Box::new(store));
    terminal::run(app).await
}

/// Returns the summary for the hand given on the command line.
fn one_shot(cli: &Cli, config: &Config) -> Result<String> {
    let (hand, decision) = match (&cli.hand, cli.total, cli.pair_rank, cli.dealer) {
        (Some(hand), _, _, _) => {
            let cards = hand
                .split_whitespace()
                .map(|s| s.parse::<Card>())
                .collect::<Result<Vec<_>, _>>()?;

            let decision = match config.game {
                Game::ThreeCard => three_card::decide(&cards),
                Game::VideoPoker => video_poker::decide(&cards),
                Game::Blackjack => bail!("Blackjack hands use --total and --dealer"),
            };

            let Some(decision) = decision else {
                let size = config.game.hand_size().unwrap_or_default();
                bail!("A {} hand needs {size} cards", config.game);
            };

            (HandSnapshot::Cards(cards), decision)
        }
        (None, None, Some(rank), Some(dealer)) => {
            let hand = BlackjackHand::pair(rank, dealer);
            let decision = blackjack::decide(&hand).context("The hand has no decision")?;
            (HandSnapshot::Blackjack(hand), decision)
        }
        (None, Some(total), None, Some(dealer)) => {
            let context = if cli.soft {
                HandContext::Soft
            } else if cli.pair {
                HandContext::Pair
            } else {
                HandContext::Hard
            };

            let hand = BlackjackHand::new(PlayerTotal::Points(total), dealer, context);
            let decision = blackjack::decide(&hand).context("The hand has no decision")?;
            (HandSnapshot::Blackjack(hand), decision)
        }
        _ => bail!("Use --hand, or --total or --pair-rank with --dealer"),
    };

    let game = if matches!(hand, HandSnapshot::Blackjack(_)) {
        Game::Blackjack
    } else {
        config.game
    };

    Ok(summary(game, &hand, &decision))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_one_shot(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(["dealwise"].iter().chain(args))?;
        let config = Config {
            idle_timeout: Duration::from_millis(cli.idle_ms),
            storage_dir: None,
            game: cli.game.into(),
        };
        one_shot(&cli, &config)
    }

    #[test]
    fn one_shot_card_hands() {
        let line = run_one_shot(&["--hand", "QH 6S 4D"]).unwrap();
        assert!(line.starts_with("3-Card Poker: Q♥ 6♠ 4♦ → RAISE"));

        let line = run_one_shot(&["-g", "video-poker", "--hand", "2H 5S 8D 9C 3S"]).unwrap();
        assert_eq!(line, "Video Poker: 2♥ 5♠ 8♦ 9♣ 3♠ → DISCARD ALL (Draw 5 new cards)");

        assert!(run_one_shot(&["--hand", "QH 6S"]).is_err());
        assert!(run_one_shot(&["--hand", "QH 6X 4D"]).is_err());
        assert!(run_one_shot(&["-g", "blackjack", "--hand", "QH 6S 4D"]).is_err());
    }

    #[test]
    fn one_shot_blackjack() {
        let line = run_one_shot(&["--total", "16", "--dealer", "10"]).unwrap();
        assert_eq!(
            line,
            "Blackjack: 16 vs Dealer 10 → SURRENDER (or Hit) (Hard 16: Surrender vs 9, 10, A)"
        );

        let line = run_one_shot(&["--total", "18", "--dealer", "9", "--soft"]).unwrap();
        assert!(line.contains("(Soft) → HIT"));

        assert!(run_one_shot(&["--total", "22", "--dealer", "6"]).is_err());
        assert!(run_one_shot(&["--dealer", "6"]).is_err());
    }

    #[test]
    fn one_shot_pair_of_aces() {
        let line = run_one_shot(&["--pair-rank", "A", "--dealer", "6"]).unwrap();
        assert_eq!(line, "Blackjack: A,A vs Dealer 6 (Pair) → SPLIT (Always split Aces)");

        let line = run_one_shot(&["--pair-rank", "9", "--dealer", "7"]).unwrap();
        assert!(line.ends_with("STAND (Stand with 18 vs dealer 7, 10, or A)"));

        assert!(run_one_shot(&["--pair-rank", "A"]).is_err());
        assert!(run_one_shot(&["--pair-rank", "A", "--total", "12", "--dealer", "6"]).is_err());
    }

    #[test]
    fn log_setup_errors() {
        let base = std::env::temp_dir().join(format!("dealwise-log-{}", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(&base).unwrap();

        // A file where the storage directory should be.
        let file = base.join("file");
        fs::write(&file, b"").unwrap();

        let config = Config {
            idle_timeout: Duration::from_millis(500),
            storage_dir: Some(file.join("dir")),
            game: Game::ThreeCard,
        };
        let err = open_log(&config).unwrap_err();
        assert!(format!("{err:#}").contains("Cannot create"));

        let config = Config {
            storage_dir: Some(base.join("ok")),
            ..config
        };
        let (dir, _) = open_log(&config).unwrap();
        assert!(dir.join("dealwise.log").exists());

        fs::remove_dir_all(&base).unwrap();
    }
}
