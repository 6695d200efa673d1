// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Final hand probabilities after the draw.
use log::{debug, warn};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::ops;

use crate::{
    Card, Config, Deck, DisplayCategory, DrawMode, Draws, EvalError, HAND_SIZE, HandError,
    HandValue, Result, draw::complete_hand,
};

/// Per category counters folded by each task.
#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    categories: [u64; DisplayCategory::COUNT],
    invalid: u64,
}

impl Counts {
    fn add_hand(&mut self, hand: &[Card]) {
        match HandValue::eval(hand).map(|v| v.display_category()) {
            Ok(Some(category)) => self.categories[category.index()] += 1,
            _ => self.invalid += 1,
        }
    }
}

impl ops::Add for Counts {
    type Output = Counts;

    fn add(mut self, rhs: Counts) -> Counts {
        for (l, r) in self.categories.iter_mut().zip(rhs.categories) {
            *l += r;
        }

        self.invalid += rhs.invalid;
        self
    }
}

/// A probability for each [DisplayCategory].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Distribution([f64; DisplayCategory::COUNT]);

impl Distribution {
    /// A distribution where the given category is certain.
    pub fn certain(category: DisplayCategory) -> Self {
        let mut probs = [0.0; DisplayCategory::COUNT];
        probs[category.index()] = 1.0;
        Self(probs)
    }

    fn from_counts(counts: &[u64; DisplayCategory::COUNT], denominator: usize) -> Self {
        let mut probs = [0.0; DisplayCategory::COUNT];
        for (p, &count) in probs.iter_mut().zip(counts) {
            *p = count as f64 / denominator as f64;
        }

        Self(probs)
    }

    /// The probability of a category.
    pub fn get(&self, category: DisplayCategory) -> f64 {
        self.0[category.index()]
    }

    /// Iterates the categories probabilities in display order.
    pub fn iter(&self) -> impl Iterator<Item = (DisplayCategory, f64)> + '_ {
        DisplayCategory::categories().zip(self.0.iter().copied())
    }

    /// The sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DisplayCategory::COUNT))?;
        for (category, prob) in self.iter() {
            map.serialize_entry(&category, &prob)?;
        }
        map.end()
    }
}

/// The final hand probabilities for a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Probabilities {
    /// The probability of each category.
    pub distribution: Distribution,
    /// How the draws were generated.
    pub mode: DrawMode,
    /// The number of draws evaluated.
    pub outcomes: usize,
}

/// Computes the final hand categories probabilities for a player that keeps
/// `kept` cards and draws the others from `deck`.
///
/// The deck must not contain the kept cards. A complete hand has a certain
/// category, otherwise the draws are enumerated or sampled using the config
/// budget (see [Draws]) and evaluated in parallel.
pub fn probabilities(kept: &[Card], deck: &Deck, config: &Config) -> Result<Probabilities> {
    if kept.len() > HAND_SIZE {
        return Err(HandError::TooManyKept(kept.len()).into());
    }

    if kept.len() == HAND_SIZE {
        let category = HandValue::eval(kept)?
            .display_category()
            .ok_or(HandError::Size(kept.len()))?;

        return Ok(Probabilities {
            distribution: Distribution::certain(category),
            mode: DrawMode::Exhaustive,
            outcomes: 1,
        });
    }

    check_distinct(kept)?;

    let need = HAND_SIZE - kept.len();
    let mut rng = config.rng(0);
    let draws = Draws::new(deck, need, config.budget, &mut rng).map_err(|e| match e {
        EvalError::DrawImpossible { need, available } => {
            EvalError::InsufficientDeck { need, available }
        }
        e => e,
    })?;

    let counts = draws
        .par_fold(config.num_tasks(), Counts::default, |counts, drawn| {
            counts.add_hand(&complete_hand(kept, drawn));
        })
        .into_iter()
        .fold(Counts::default(), |acc, c| acc + c);

    if counts.invalid > 0 {
        warn!(
            "Skipped {} invalid hands out of {} draws, the deck contains kept cards",
            counts.invalid,
            draws.len()
        );
    }

    debug!("Evaluated {} draws in {:?} mode", draws.len(), draws.mode());

    Ok(Probabilities {
        distribution: Distribution::from_counts(&counts.categories, draws.len()),
        mode: draws.mode(),
        outcomes: draws.len(),
    })
}

/// Checks the kept cards have no duplicates.
fn check_distinct(kept: &[Card]) -> Result<()> {
    let mut seen = 0u64;
    for card in kept {
        let bit = 1u64 << card.id();
        if seen & bit != 0 {
            return Err(HandError::Duplicate(*card).into());
        }
        seen |= bit;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(tokens: &str) -> Vec<Card> {
        tokens.split_whitespace().map(|t| t.parse().unwrap()).collect()
    }

    fn config() -> Config {
        Config {
            tasks: 4,
            seed: Some(7),
            ..Config::default()
        }
    }

    #[test]
    fn complete_hand_is_certain() {
        let kept = cards("2H 3D 4S 5C 7H");
        let deck = Deck::default().without(&kept);
        let probs = probabilities(&kept, &deck, &config()).unwrap();

        assert_eq!(probs.outcomes, 1);
        for (category, p) in probs.distribution.iter() {
            if category == DisplayCategory::SevenHigh {
                assert_eq!(p, 1.0);
            } else {
                assert_eq!(p, 0.0, "{category}");
            }
        }
    }

    #[test]
    fn one_card_draw_exact() {
        // Drawing to 7-5-4-3 only a deuce makes 7-High, a six makes a straight.
        let kept = cards("7H 5D 4S 3C");
        let deck = Deck::default().without(&kept);
        let probs = probabilities(&kept, &deck, &config()).unwrap();

        assert_eq!(probs.mode, DrawMode::Exhaustive);
        assert_eq!(probs.outcomes, 48);

        let d = &probs.distribution;
        assert!((d.total() - 1.0).abs() < 1e-9);

        assert!((d.get(DisplayCategory::SevenHigh) - 4.0 / 48.0).abs() < 1e-12);
        assert!((d.get(DisplayCategory::BadHand) - 4.0 / 48.0).abs() < 1e-12);
        // Eight through king and ace, 4 each.
        assert!((d.get(DisplayCategory::EightHigh) - 4.0 / 48.0).abs() < 1e-12);
        assert!((d.get(DisplayCategory::AceHigh) - 4.0 / 48.0).abs() < 1e-12);
        // Pairing one of the 4 kept ranks, 3 cards each.
        assert!((d.get(DisplayCategory::OnePair) - 12.0 / 48.0).abs() < 1e-12);
    }

    #[test]
    fn exhaustive_sums_to_one() {
        let kept = cards("2H 3D 8S");
        let deck = Deck::default().without(&kept);
        let probs = probabilities(&kept, &deck, &config()).unwrap();

        assert_eq!(probs.mode, DrawMode::Exhaustive);
        assert_eq!(probs.outcomes, 1_176);
        assert!((probs.distribution.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sampled_sums_to_one() {
        let kept = cards("2H");
        let deck = Deck::default().without(&kept);
        let probs = probabilities(&kept, &deck, &config()).unwrap();

        assert_eq!(probs.mode, DrawMode::Sampled);
        assert_eq!(probs.outcomes, Config::DEFAULT_BUDGET);
        assert!((probs.distribution.total() - 1.0).abs() < 1e-6);

        // One pair is the most likely outcome drawing 4 cards.
        let one_pair = probs.distribution.get(DisplayCategory::OnePair);
        assert!(one_pair > 0.35 && one_pair < 0.5, "{one_pair}");
    }

    #[test]
    fn no_kept_cards() {
        let probs = probabilities(&[], &Deck::default(), &config()).unwrap();
        assert_eq!(probs.mode, DrawMode::Sampled);
        assert!((probs.distribution.total() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn seeded_runs_repeat() {
        let kept = cards("2H 5C");
        let deck = Deck::default().without(&kept);
        let a = probabilities(&kept, &deck, &config()).unwrap();
        let b = probabilities(&kept, &deck, &config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn errors() {
        let kept = cards("2H 3D 4S 5C 7H 8H");
        let err = probabilities(&kept, &Deck::default(), &config()).unwrap_err();
        assert_eq!(err, EvalError::InvalidHand(HandError::TooManyKept(6)));

        let kept = cards("2H 3D 4S 3D");
        let err = probabilities(&kept, &Deck::default(), &config()).unwrap_err();
        assert!(matches!(err, EvalError::InvalidHand(HandError::Duplicate(_))));

        let kept = cards("2H 3D 4S 3D 7C");
        let err = probabilities(&kept, &Deck::default(), &config()).unwrap_err();
        assert!(matches!(err, EvalError::InvalidHand(HandError::Duplicate(_))));

        let kept = cards("2H 3D");
        let deck = cards("4S 5C").into_iter().collect::<Deck>();
        let err = probabilities(&kept, &deck, &config()).unwrap_err();
        assert_eq!(
            err,
            EvalError::InsufficientDeck {
                need: 3,
                available: 2
            }
        );
    }

    #[test]
    fn serialize_in_display_order() {
        let json = serde_json::to_value(Distribution::certain(DisplayCategory::OnePair)).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), DisplayCategory::COUNT);
        assert_eq!(map["One Pair"], 1.0);
        assert_eq!(map["7-High"], 0.0);

        let json = serde_json::to_string(&Distribution::default()).unwrap();
        assert!(json.starts_with(r#"{"7-High":0.0,"8-High":0.0"#));
        assert!(json.ends_with(r#""Four of a Kind":0.0}"#));
    }
}
