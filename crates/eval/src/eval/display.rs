// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Reporting categories.
use serde::{Serialize, Serializer};
use std::fmt;

use super::{Category, HandValue};
use crate::Rank;

/// A hand category for reporting, no pair hands are split by their highest card.
///
/// A no pair hand is at least seven high as 6-5-4-3-2 is a straight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayCategory {
    /// No pair, seven high.
    SevenHigh = 0,
    /// No pair, eight high.
    EightHigh,
    /// No pair, nine high.
    NineHigh,
    /// No pair, ten high.
    TenHigh,
    /// No pair, jack high.
    JackHigh,
    /// No pair, queen high.
    QueenHigh,
    /// No pair, king high.
    KingHigh,
    /// No pair, ace high.
    AceHigh,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight or flush.
    BadHand,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
}

impl DisplayCategory {
    /// The number of reporting categories.
    pub const COUNT: usize = 14;

    /// Returns all categories in display order.
    pub fn categories() -> impl DoubleEndedIterator<Item = DisplayCategory> + Clone {
        use DisplayCategory::*;
        [
            SevenHigh,
            EightHigh,
            NineHigh,
            TenHigh,
            JackHigh,
            QueenHigh,
            KingHigh,
            AceHigh,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            BadHand,
            FullHouse,
            FourOfAKind,
        ]
        .into_iter()
    }

    /// The reporting category for a hand value, None for an invalid hand.
    pub fn from_value(value: &HandValue) -> Option<DisplayCategory> {
        let category = match value.category() {
            Category::NoPair => match value.ranks()[0] {
                Rank::Ace => DisplayCategory::AceHigh,
                Rank::King => DisplayCategory::KingHigh,
                Rank::Queen => DisplayCategory::QueenHigh,
                Rank::Jack => DisplayCategory::JackHigh,
                Rank::Ten => DisplayCategory::TenHigh,
                Rank::Nine => DisplayCategory::NineHigh,
                Rank::Eight => DisplayCategory::EightHigh,
                _ => DisplayCategory::SevenHigh,
            },
            Category::OnePair => DisplayCategory::OnePair,
            Category::TwoPair => DisplayCategory::TwoPair,
            Category::ThreeOfAKind => DisplayCategory::ThreeOfAKind,
            Category::BadHand => DisplayCategory::BadHand,
            Category::FullHouse => DisplayCategory::FullHouse,
            Category::FourOfAKind => DisplayCategory::FourOfAKind,
            Category::Invalid => return None,
        };

        Some(category)
    }

    /// The position of this category in display order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The category label, e.g. `7-High` or `Full House`.
    pub fn label(&self) -> &'static str {
        match self {
            DisplayCategory::SevenHigh => "7-High",
            DisplayCategory::EightHigh => "8-High",
            DisplayCategory::NineHigh => "9-High",
            DisplayCategory::TenHigh => "10-High",
            DisplayCategory::JackHigh => "J-High",
            DisplayCategory::QueenHigh => "Q-High",
            DisplayCategory::KingHigh => "K-High",
            DisplayCategory::AceHigh => "A-High",
            DisplayCategory::OnePair => "One Pair",
            DisplayCategory::TwoPair => "Two Pair",
            DisplayCategory::ThreeOfAKind => "Three of a Kind",
            DisplayCategory::BadHand => "Bad Hand",
            DisplayCategory::FullHouse => "Full House",
            DisplayCategory::FourOfAKind => "Four of a Kind",
        }
    }
}

impl fmt::Display for DisplayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DisplayCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Deck};

    fn value(tokens: &str) -> HandValue {
        let cards = tokens
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect::<Vec<Card>>();
        HandValue::eval(&cards).unwrap()
    }

    #[test]
    fn display_categories() {
        let cases = [
            ("2H 3D 4S 5C 7H", "7-High"),
            ("2H 3D 4S 5C 8H", "8-High"),
            ("2H 3D 4S 6C 10H", "10-High"),
            ("2H 3D 4S 6C JH", "J-High"),
            ("2H 3D 4S 6C AH", "A-High"),
            ("2H 2D 4S 5C 7H", "One Pair"),
            ("2H 3D 4S 5C 6H", "Bad Hand"),
            ("9H 9D 9S 5C 5H", "Full House"),
        ];

        for (tokens, label) in cases {
            let category = value(tokens).display_category().unwrap();
            assert_eq!(category.to_string(), label, "{tokens}");
        }
    }

    #[test]
    fn categories_in_display_order() {
        let categories = DisplayCategory::categories().collect::<Vec<_>>();
        assert_eq!(categories.len(), DisplayCategory::COUNT);

        for (idx, category) in categories.iter().enumerate() {
            assert_eq!(category.index(), idx);
        }

        assert!(categories.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn no_pair_is_at_least_seven_high() {
        let mut counts = [0u64; DisplayCategory::COUNT];
        Deck::default().for_each(5, |cards| {
            let v = HandValue::eval(cards).unwrap();
            if v.category() == Category::NoPair {
                assert!(v.ranks()[0] >= Rank::Seven);
            }

            counts[v.display_category().unwrap().index()] += 1;
        });

        // 4 no pair ranks sets 7-5-4-3-2, 7-6-4-3-2, 7-6-5-3-2, 7-6-5-4-2, without flushes.
        assert_eq!(counts[DisplayCategory::SevenHigh.index()], 4 * 1020);
        assert_eq!(counts.iter().sum::<u64>(), 2_598_960);
    }

    #[test]
    fn serialize_label() {
        let json = serde_json::to_string(&DisplayCategory::TenHigh).unwrap();
        assert_eq!(json, r#""10-High""#);
    }
}
