// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand values and showdown comparison.
use serde::Serialize;
use std::{cmp::Ordering, fmt};

use super::DisplayCategory;
use crate::{Card, HAND_SIZE, HandError, Rank, Result};

/// The category of a 2-7 single draw hand.
///
/// Categories are ordered from the strongest to the weakest, so a smaller
/// category beats a larger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// Five distinct ranks, no straight, no flush.
    NoPair = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// A straight or a flush, including straight flushes.
    BadHand,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Not a valid hand, loses to every other category.
    Invalid,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::NoPair => "No Pair",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::BadHand => "Bad Hand",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::Invalid => "Invalid",
        };

        f.write_str(name)
    }
}

/// The outcome of a showdown between two hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Showdown {
    /// The first hand wins.
    FirstWins,
    /// The second hand wins.
    SecondWins,
    /// Split pot.
    Tie,
}

impl Showdown {
    /// The outcome seen from the other hand.
    pub fn reverse(self) -> Showdown {
        match self {
            Showdown::FirstWins => Showdown::SecondWins,
            Showdown::SecondWins => Showdown::FirstWins,
            Showdown::Tie => Showdown::Tie,
        }
    }
}

impl From<Ordering> for Showdown {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => Showdown::FirstWins,
            Ordering::Less => Showdown::SecondWins,
            Ordering::Equal => Showdown::Tie,
        }
    }
}

/// The value of a five cards hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandValue {
    category: Category,
    ranks: [Rank; HAND_SIZE],
}

impl HandValue {
    /// The value of a hand that could not be evaluated.
    pub const INVALID: HandValue = HandValue {
        category: Category::Invalid,
        ranks: [Rank::Deuce; HAND_SIZE],
    };

    /// Evaluates a five cards hand.
    ///
    /// Returns [HandError::Size] if there are not 5 cards and
    /// [HandError::Duplicate] if a card appears twice.
    pub fn eval(cards: &[Card]) -> Result<HandValue> {
        if cards.len() != HAND_SIZE {
            return Err(HandError::Size(cards.len()).into());
        }

        let mut seen = 0u64;
        let mut counts = [0u8; Rank::COUNT];
        let mut ranks = [Rank::Deuce; HAND_SIZE];
        for (idx, card) in cards.iter().enumerate() {
            let bit = 1u64 << card.id();
            if seen & bit != 0 {
                return Err(HandError::Duplicate(*card).into());
            }

            seen |= bit;
            counts[card.rank() as usize] += 1;
            ranks[idx] = card.rank();
        }

        ranks.sort_unstable_by(|a, b| b.cmp(a));

        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());

        // The ace is only high so A-2-3-4-5 is not a straight.
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        let is_straight = distinct == HAND_SIZE && ranks[0] as u8 - ranks[4] as u8 == 4;

        let category = if is_flush || is_straight {
            Category::BadHand
        } else {
            // Rank counts from the largest group, e.g. [3, 2, 0, 0, 0] for a full house.
            let mut groups = [0u8; HAND_SIZE];
            for (group, &count) in groups.iter_mut().zip(counts.iter().filter(|&&c| c > 0)) {
                *group = count;
            }

            groups.sort_unstable_by(|a, b| b.cmp(a));

            match groups {
                [4, ..] => Category::FourOfAKind,
                [3, 2, ..] => Category::FullHouse,
                [3, ..] => Category::ThreeOfAKind,
                [2, 2, ..] => Category::TwoPair,
                [2, ..] => Category::OnePair,
                _ => Category::NoPair,
            }
        };

        Ok(HandValue { category, ranks })
    }

    /// The hand category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The hand ranks sorted from the highest, empty for an invalid hand.
    pub fn ranks(&self) -> &[Rank] {
        if self.is_invalid() {
            &[]
        } else {
            &self.ranks
        }
    }

    /// Checks if this is the value of an invalid hand.
    pub fn is_invalid(&self) -> bool {
        self.category == Category::Invalid
    }

    /// The reporting category, None for an invalid hand.
    pub fn display_category(&self) -> Option<DisplayCategory> {
        DisplayCategory::from_value(self)
    }

    /// Compares this hand with another hand at showdown.
    ///
    /// Returns a tie if any of the two hands is invalid.
    pub fn compare(&self, other: &HandValue) -> Showdown {
        if self.is_invalid() || other.is_invalid() {
            return Showdown::Tie;
        }

        let ord = other.category.cmp(&self.category).then_with(|| {
            if self.category == Category::NoPair {
                // Lowball, the lower cards win.
                other.ranks.cmp(&self.ranks)
            } else {
                self.ranks.cmp(&other.ranks)
            }
        });

        Showdown::from(ord)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_category() {
            Some(category) => write!(f, "{category}")?,
            None => return f.write_str("N/A"),
        }

        for (idx, rank) in self.ranks.iter().enumerate() {
            let sep = if idx == 0 { " " } else { "-" };
            write!(f, "{sep}{rank}")?;
        }

        Ok(())
    }
}
