// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! 2-7 single draw hand evaluator.
//!
//! In 2-7 lowball the best hand is a five cards hand with no pairs, no
//! straight, and no flush, with the lowest cards. The aces are always high so
//! the best possible hand is 7-5-4-3-2.
//!
//! [HandValue::eval] classifies a five cards hand in a [Category] and keeps its
//! ranks sorted from the highest to break ties, [HandValue::compare] decides a
//! showdown between two hands, and [DisplayCategory] refines no pair hands by
//! their highest card for reporting.
//!
//! The categories are ordered from the best to the worst:
//!
//! ```text
//! No Pair < One Pair < Two Pair < Three of a Kind < Bad Hand < Full House < Four of a Kind
//! ```
//!
//! where a bad hand is any straight or flush. Between two no pair hands the
//! hand with the lower cards wins, for all other categories the hand with the
//! higher cards wins like in ordinary poker.

mod display;
pub use display::DisplayCategory;

mod value;
pub use value::{Category, HandValue, Showdown};
