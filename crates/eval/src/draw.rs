// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draws enumeration.
//!
//! The draws of `need` cards from a deck are the k-subsets of the deck, each
//! draw is identified by its index in the order used by [Deck::for_each] so
//! that both exhaustive enumeration and sampling can be split across tasks.
use log::debug;
use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::{Card, Deck, EvalError, HAND_SIZE, Rank, Result, Suit};
use lowdraw_cards::nck;

/// The number of draws above which draws are sampled, relative to the budget.
pub const SAMPLING_FACTOR: f64 = 1.5;

/// How the draws are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Every possible draw.
    Exhaustive,
    /// A uniform sample of distinct draws.
    Sampled,
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawMode::Exhaustive => f.write_str("exhaustive"),
            DrawMode::Sampled => f.write_str("sampled"),
        }
    }
}

/// The draws of a given number of cards from a deck.
#[derive(Debug)]
pub struct Draws<'a> {
    deck: &'a Deck,
    need: usize,
    total: usize,
    sampled: Option<Vec<usize>>,
}

impl<'a> Draws<'a> {
    /// Creates the draws of `need` cards from the deck.
    ///
    /// If the number of possible draws is larger than `budget` times
    /// [SAMPLING_FACTOR] `budget` distinct draws are sampled, otherwise all
    /// draws are enumerated. Drawing zero cards has a single empty draw.
    ///
    /// Returns [EvalError::DrawImpossible] if the deck has less than `need`
    /// cards, panics if need > 5.
    pub fn new<R: Rng + ?Sized>(
        deck: &'a Deck,
        need: usize,
        budget: usize,
        rng: &mut R,
    ) -> Result<Self> {
        assert!(need <= HAND_SIZE, "need={need} must be 0 <= need <= 5");

        let total = nck(deck.count(), need);
        if total == 0 {
            return Err(EvalError::DrawImpossible {
                need,
                available: deck.count(),
            });
        }

        // A zero budget still samples one draw.
        let budget = budget.max(1);
        let sampled = if total as f64 > budget as f64 * SAMPLING_FACTOR {
            debug!("Sampling {budget} of {total} draws of {need} cards");
            Some(deck.sample_indices(rng, budget, need))
        } else {
            debug!("Enumerating {total} draws of {need} cards");
            None
        };

        Ok(Self {
            deck,
            need,
            total,
            sampled,
        })
    }

    /// The draw mode.
    pub fn mode(&self) -> DrawMode {
        if self.sampled.is_some() {
            DrawMode::Sampled
        } else {
            DrawMode::Exhaustive
        }
    }

    /// The number of cards in each draw.
    pub fn need(&self) -> usize {
        self.need
    }

    /// The number of possible draws from the deck.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of draws visited, the denominator for probabilities.
    pub fn len(&self) -> usize {
        self.sampled.as_ref().map_or(self.total, Vec::len)
    }

    /// Checks if there are no draws, never true for a successfully created draws.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls the `f` closure for each draw.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        match &self.sampled {
            Some(indices) => {
                let mut h = [Card::new(Rank::Ace, Suit::Spades); HAND_SIZE];
                for &nth in indices {
                    self.deck.nth_hand(nth, &mut h[..self.need]);
                    f(&h[..self.need]);
                }
            }
            None => self.deck.for_each(self.need, f),
        }
    }

    /// Folds the draws in parallel with `num_tasks` tasks.
    ///
    /// Each task creates an accumulator with `init` and folds its share of draws
    /// into it with `f`, returns the tasks accumulators.
    pub fn par_fold<T, I, F>(&self, num_tasks: usize, init: I, f: F) -> Vec<T>
    where
        T: Send,
        I: Fn() -> T + Sync,
        F: Fn(&mut T, &[Card]) + Sync,
    {
        match &self.sampled {
            Some(indices) => self
                .deck
                .par_for_each_nth(num_tasks, self.need, indices, init, f),
            None => self.deck.par_for_each(num_tasks, self.need, init, f),
        }
    }

    /// Collects all draws.
    pub fn outcomes(&self) -> Vec<Vec<Card>> {
        let mut outcomes = Vec::with_capacity(self.len());
        self.for_each(|draw| outcomes.push(draw.to_vec()));
        outcomes
    }
}

/// Builds a hand from the kept cards followed by the drawn cards.
///
/// Panics if there are more than 5 cards.
pub(crate) fn complete_hand(kept: &[Card], drawn: &[Card]) -> [Card; HAND_SIZE] {
    let mut hand = [Card::new(Rank::Ace, Suit::Spades); HAND_SIZE];
    hand[..kept.len()].copy_from_slice(kept);
    hand[kept.len()..kept.len() + drawn.len()].copy_from_slice(drawn);
    hand
}
