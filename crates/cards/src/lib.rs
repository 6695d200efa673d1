// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lowdraw cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use lowdraw_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td: Card = "10D".parse().unwrap();
//! assert_eq!(td.rank(), Rank::Ten);
//! ```
//!
//! and a [Deck] type for removing, dealing, sampling, and iterating cards in
//! the deck.
//!
//! For example to iterate through all the 3 cards draws left after removing a
//! two cards hand:
//!
//! ```
//! # use lowdraw_cards::{Card, Deck};
//! let kept = ["2H", "7D"].map(|t| t.parse::<Card>().unwrap());
//! let deck = Deck::default().without(&kept);
//!
//! let mut counter = 0;
//! deck.for_each(3, |draw| {
//!     assert_eq!(draw.len(), 3);
//!     counter += 1;
//! });
//! assert_eq!(counter, 19_600);
//! ```
//!
//! to sample 10 distinct random 5-cards hands:
//!
//! ```
//! # use lowdraw_cards::Deck;
//! let mut counter = 0;
//! Deck::default().sample(&mut rand::rng(), 10, 5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number of
//! tasks, each task folds the hands it visits into its own accumulator and the
//! accumulators are returned to the caller for reduction:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use lowdraw_cards::Deck;
//! let counts = Deck::default().par_for_each(4, 2, || 0u64, |count, hand| {
//!     assert_eq!(hand.len(), 2);
//!     *count += 1;
//! });
//! assert_eq!(counts.iter().sum::<u64>(), 1_326);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Dealer, Deck, ParseCardError, Rank, Suit, nck};
