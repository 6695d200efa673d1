// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lowdraw 2-7 single draw odds engine.
//!
//! Given the cards each player keeps before the draw, this crate computes the
//! distribution of the final hand categories after drawing the missing cards,
//! and the head to head win rates of two players drawing from the same deck.
//!
//! To evaluate a hand use [HandValue::eval] and compare two hands with
//! [HandValue::compare]:
//!
//! ```
//! # use lowdraw_eval::*;
//! let cards = |s: &str| s.split(' ').map(|t| t.parse().unwrap()).collect::<Vec<Card>>();
//! let seven = HandValue::eval(&cards("7H 5D 4S 3C 2H")).unwrap();
//! let straight = HandValue::eval(&cards("6D 5H 4C 3S 2D")).unwrap();
//! assert_eq!(seven.compare(&straight), Showdown::FirstWins);
//! ```
//!
//! To compute the final hand probabilities for a player that keeps some cards
//! use [odds::probabilities], if the number of possible draws is small all
//! draws are enumerated otherwise a random sample of distinct draws is used:
//!
//! ```
//! # use lowdraw_eval::*;
//! let kept = ["7H", "5D", "3C", "2H"].map(|t| t.parse::<Card>().unwrap());
//! let deck = Deck::default().without(&kept);
//! let probs = odds::probabilities(&kept, &deck, &Config::default()).unwrap();
//! assert_eq!(probs.mode, DrawMode::Exhaustive);
//! assert!((probs.distribution.total() - 1.0).abs() < 1e-9);
//! ```
//!
//! and [sim::win_rates] to simulate the draws for two players.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod config;
pub use config::Config;

pub mod draw;
pub use draw::{DrawMode, Draws};

pub mod error;
pub use error::{EvalError, HandError, Result};

pub mod eval;
pub use eval::{Category, DisplayCategory, HandValue, Showdown};

pub mod matchup;
pub use matchup::{Matchup, MatchupError, MatchupReport, PlayerReport};

pub mod odds;
pub use odds::{Distribution, Probabilities};

pub mod sim;
pub use sim::WinRates;

// Reexport cards types.
pub use lowdraw_cards::{Card, Deck, ParseCardError, Rank, Suit};

/// The number of cards in a hand.
pub const HAND_SIZE: usize = 5;
