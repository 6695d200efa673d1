// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation errors.
use thiserror::Error;

use crate::Card;

/// Why a set of cards is not a valid hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    /// A hand must have exactly 5 cards.
    #[error("expected 5 cards, got {0}")]
    Size(usize),
    /// The same card appears twice.
    #[error("duplicate card {0}")]
    Duplicate(Card),
    /// A player cannot keep more than 5 cards.
    #[error("at most 5 cards can be kept, got {0}")]
    TooManyKept(usize),
}

/// Errors returned by a probability or win rate computation.
///
/// An error terminates only the computation that returned it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The cards don't form a valid hand.
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    /// There are no ways to draw `need` cards out of `available`.
    #[error("cannot draw {need} cards from {available} cards")]
    DrawImpossible {
        /// The cards to draw.
        need: usize,
        /// The cards left in the deck.
        available: usize,
    },
    /// The deck doesn't have enough cards for the players draws.
    #[error("not enough cards in deck to draw {need}, {available} left")]
    InsufficientDeck {
        /// The total cards to draw.
        need: usize,
        /// The cards left in the deck.
        available: usize,
    },
    /// Every simulated trial failed, distinct from a 0% win rate.
    #[error("all {trials} trials resulted in invalid draws")]
    AllTrialsInvalid {
        /// The number of trials that ran.
        trials: u64,
    },
}

/// Evaluation result type.
pub type Result<T> = std::result::Result<T, EvalError>;
