// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Two players matchup analysis.
use ahash::HashSet;
use log::{debug, error};
use thiserror::Error;

use crate::{
    Card, Config, Deck, DisplayCategory, EvalError, HAND_SIZE, HandValue, Probabilities,
    WinRates, odds, sim,
};

/// Random stream used to deal the example hands.
const EXAMPLE_STREAM: u64 = u64::MAX;

/// An invalid matchup request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchupError {
    /// A player keeps more than 5 cards.
    #[error("player {player} has {count} cards, at most 5 cards can be kept")]
    TooManyCards {
        /// The player number, 1 or 2.
        player: usize,
        /// The number of kept cards.
        count: usize,
    },
    /// A card has been selected more than once.
    #[error("card {0} selected more than once")]
    DuplicateCard(Card),
}

/// The cards kept by two players before the draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    p1: Vec<Card>,
    p2: Vec<Card>,
}

impl Matchup {
    /// Creates a matchup checking each player keeps at most 5 cards and that
    /// no card is used twice.
    pub fn new(p1: Vec<Card>, p2: Vec<Card>) -> Result<Self, MatchupError> {
        for (player, kept) in [(1, &p1), (2, &p2)] {
            if kept.len() > HAND_SIZE {
                return Err(MatchupError::TooManyCards {
                    player,
                    count: kept.len(),
                });
            }
        }

        let mut seen = HashSet::default();
        for &card in p1.iter().chain(&p2) {
            if !seen.insert(card) {
                return Err(MatchupError::DuplicateCard(card));
            }
        }

        Ok(Self { p1, p2 })
    }

    /// The first player kept cards.
    pub fn player1(&self) -> &[Card] {
        &self.p1
    }

    /// The second player kept cards.
    pub fn player2(&self) -> &[Card] {
        &self.p2
    }

    /// The deck without the players kept cards.
    pub fn deck(&self) -> Deck {
        Deck::default().without(&self.p1).without(&self.p2)
    }

    /// Computes the players probabilities, the win rates and an example of
    /// final hands.
    ///
    /// A failed computation doesn't affect the others, each result carries its
    /// own error.
    pub fn analyze(&self, config: &Config) -> MatchupReport {
        let deck = self.deck();

        let probs1 = odds::probabilities(&self.p1, &deck, config);
        let probs2 = odds::probabilities(&self.p2, &deck, config);
        let win_rates = sim::win_rates(&self.p1, &self.p2, &deck, config);

        for (name, err) in [
            ("Player 1 probabilities", probs1.as_ref().err()),
            ("Player 2 probabilities", probs2.as_ref().err()),
            ("Win rates", win_rates.as_ref().err()),
        ] {
            if let Some(err) = err {
                error!("{name} failed: {err}");
            }
        }

        // The second player draws from the cards left by the first player.
        let mut rng = config.rng(EXAMPLE_STREAM);
        let mut deck = deck;
        let mut dealer = deck.dealer(&mut rng);
        let hand1 = example_hand(&self.p1, dealer.deal(HAND_SIZE - self.p1.len()));
        let hand2 = example_hand(&self.p2, dealer.deal(HAND_SIZE - self.p2.len()));

        MatchupReport {
            player1: PlayerReport::new(&self.p1, hand1, probs1),
            player2: PlayerReport::new(&self.p2, hand2, probs2),
            win_rates,
        }
    }
}

/// The kept cards followed by the drawn cards, only the kept cards if the
/// draw failed.
fn example_hand(kept: &[Card], drawn: Option<&[Card]>) -> Vec<Card> {
    let mut hand = kept.to_vec();
    match drawn {
        Some(drawn) => hand.extend_from_slice(drawn),
        None => debug!("Not enough cards to draw {}", HAND_SIZE - kept.len()),
    }
    hand
}

/// A player results.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReport {
    /// The cards kept before the draw.
    pub kept: Vec<Card>,
    /// An example final hand sorted by rank.
    pub final_hand: Vec<Card>,
    /// The final hand value, invalid if the example draw failed.
    pub hand: HandValue,
    /// The final hand categories probabilities.
    pub probabilities: Result<Probabilities, EvalError>,
}

impl PlayerReport {
    fn new(
        kept: &[Card],
        mut final_hand: Vec<Card>,
        probabilities: Result<Probabilities, EvalError>,
    ) -> Self {
        let hand = HandValue::eval(&final_hand).unwrap_or(HandValue::INVALID);
        final_hand.sort_by_key(|c| c.rank());

        Self {
            kept: kept.to_vec(),
            final_hand,
            hand,
            probabilities,
        }
    }

    /// The example final hand name, None if invalid.
    pub fn hand_name(&self) -> Option<DisplayCategory> {
        self.hand.display_category()
    }
}

/// The results for both players.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupReport {
    /// First player results.
    pub player1: PlayerReport,
    /// Second player results.
    pub player2: PlayerReport,
    /// Head to head win rates.
    pub win_rates: Result<WinRates, EvalError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DrawMode;

    fn cards(tokens: &str) -> Vec<Card> {
        tokens.split_whitespace().map(|t| t.parse().unwrap()).collect()
    }

    fn config() -> Config {
        Config {
            trials: 2000,
            tasks: 2,
            seed: Some(3),
            ..Config::default()
        }
    }

    #[test]
    fn invalid_requests() {
        let err = Matchup::new(cards("2H 3D 4S 5C 7H 8H"), vec![]).unwrap_err();
        assert_eq!(
            err,
            MatchupError::TooManyCards {
                player: 1,
                count: 6
            }
        );

        let err = Matchup::new(cards("2H 3D"), cards("4S 5C 7H 8H 9H 10H")).unwrap_err();
        assert_eq!(
            err,
            MatchupError::TooManyCards {
                player: 2,
                count: 6
            }
        );

        let err = Matchup::new(cards("2H 3D 4S"), cards("5C 3D")).unwrap_err();
        assert_eq!(err, MatchupError::DuplicateCard(cards("3D")[0]));

        let err = Matchup::new(cards("2H 2H"), vec![]).unwrap_err();
        assert_eq!(err, MatchupError::DuplicateCard(cards("2H")[0]));
    }

    #[test]
    fn deck_without_kept_cards() {
        let m = Matchup::new(cards("2H 3D 4S"), cards("5C 7H")).unwrap();
        let deck = m.deck();
        assert_eq!(deck.count(), 47);
        assert!(m.player1().iter().chain(m.player2()).all(|c| !deck.contains(*c)));
    }

    #[test]
    fn complete_hands() {
        let m = Matchup::new(cards("7H 5C 4S 3D 2H"), cards("KS KH KD KC AS")).unwrap();
        let report = m.analyze(&config());

        assert_eq!(report.player1.final_hand, cards("2H 3D 4S 5C 7H"));
        assert_eq!(report.player1.hand_name(), Some(DisplayCategory::SevenHigh));
        assert_eq!(report.player2.hand_name(), Some(DisplayCategory::FourOfAKind));

        let probs = report.player1.probabilities.as_ref().unwrap();
        assert_eq!(probs.distribution.get(DisplayCategory::SevenHigh), 1.0);

        let rates = report.win_rates.unwrap();
        assert_eq!(rates.p1_win_rate, 1.0);
        assert_eq!(rates.valid_trials, 2000);
    }

    #[test]
    fn drawing_players() {
        let m = Matchup::new(cards("7H 5C 3D"), cards("8D")).unwrap();
        let report = m.analyze(&config());

        for (player, kept) in [(&report.player1, m.player1()), (&report.player2, m.player2())] {
            assert_eq!(player.final_hand.len(), 5);
            assert!(kept.iter().all(|c| player.final_hand.contains(c)));
            assert!(player.final_hand.windows(2).all(|w| w[0].rank() <= w[1].rank()));
            assert!(player.hand_name().is_some());

            let probs = player.probabilities.as_ref().unwrap();
            assert!((probs.distribution.total() - 1.0).abs() < 1e-6);
        }

        // The example hands don't share cards.
        let p1 = &report.player1.final_hand;
        assert!(report.player2.final_hand.iter().all(|c| !p1.contains(c)));

        assert_eq!(report.player1.probabilities.as_ref().unwrap().mode, DrawMode::Exhaustive);
        assert_eq!(report.player2.probabilities.as_ref().unwrap().mode, DrawMode::Sampled);
        assert!(report.win_rates.is_ok());
    }

    #[test]
    fn empty_request() {
        let m = Matchup::new(vec![], vec![]).unwrap();
        let report = m.analyze(&config());
        assert!(report.player1.probabilities.is_ok());
        assert!(report.player2.probabilities.is_ok());

        let rates = report.win_rates.unwrap();
        let total = rates.p1_win_rate + rates.p2_win_rate + rates.tie_rate;
        assert!((total - 1.0).abs() < 1e-9);
    }
}
