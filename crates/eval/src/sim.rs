// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Head to head win rates simulation.
//!
//! Each trial deals the missing cards to both players from the same deck and
//! compares the final hands. Trials are split across tasks, each task deals
//! from its own copy of the deck with its own random generator and counts the
//! outcomes in a [Tally], the tasks tallies are summed at the end.
use log::{info, warn};
use rand::rngs::SmallRng;
use serde::Serialize;
use std::{iter, ops, thread};

use crate::{
    Card, Config, Deck, EvalError, HAND_SIZE, HandError, HandValue, Result, Showdown,
    draw::complete_hand,
};
use lowdraw_cards::Dealer;

/// Trials outcomes counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Trials won by the first player.
    pub p1_wins: u64,
    /// Trials won by the second player.
    pub p2_wins: u64,
    /// Tied trials.
    pub ties: u64,
    /// Trials with a failed draw or an invalid hand.
    pub invalid: u64,
}

impl Tally {
    /// Records a trial, None for an invalid trial.
    pub fn record(&mut self, outcome: Option<Showdown>) {
        match outcome {
            Some(Showdown::FirstWins) => self.p1_wins += 1,
            Some(Showdown::SecondWins) => self.p2_wins += 1,
            Some(Showdown::Tie) => self.ties += 1,
            None => self.invalid += 1,
        }
    }

    /// The number of valid trials.
    pub fn valid(&self) -> u64 {
        self.p1_wins + self.p2_wins + self.ties
    }
}

impl ops::Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally {
            p1_wins: self.p1_wins + rhs.p1_wins,
            p2_wins: self.p2_wins + rhs.p2_wins,
            ties: self.ties + rhs.ties,
            invalid: self.invalid + rhs.invalid,
        }
    }
}

impl iter::Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), |acc, t| acc + t)
    }
}

/// Win and tie rates over the valid trials.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WinRates {
    /// First player win rate.
    pub p1_win_rate: f64,
    /// Second player win rate.
    pub p2_win_rate: f64,
    /// Tie rate.
    pub tie_rate: f64,
    /// The number of trials used for the rates.
    pub valid_trials: u64,
    /// The number of trials excluded from the rates.
    pub invalid_trials: u64,
}

impl TryFrom<Tally> for WinRates {
    type Error = EvalError;

    /// Returns [EvalError::AllTrialsInvalid] if trials ran but none was valid,
    /// a zero rates result if no trials ran.
    fn try_from(tally: Tally) -> Result<Self> {
        let valid = tally.valid();
        if valid == 0 {
            return if tally.invalid == 0 {
                Ok(WinRates::default())
            } else {
                Err(EvalError::AllTrialsInvalid {
                    trials: tally.invalid,
                })
            };
        }

        let rate = |count: u64| count as f64 / valid as f64;
        Ok(WinRates {
            p1_win_rate: rate(tally.p1_wins),
            p2_win_rate: rate(tally.p2_wins),
            tie_rate: rate(tally.ties),
            valid_trials: valid,
            invalid_trials: tally.invalid,
        })
    }
}

/// Simulates `config.trials` draws for two players that keep `p1` and `p2`
/// cards and draw the missing cards from `deck`.
///
/// Player one draws first and player two draws from the remaining cards. A
/// trial with an invalid hand is not counted in the rates, this happens when
/// the deck contains some of the kept cards or the kept cards have duplicates.
pub fn win_rates(p1: &[Card], p2: &[Card], deck: &Deck, config: &Config) -> Result<WinRates> {
    for kept in [p1, p2] {
        if kept.len() > HAND_SIZE {
            return Err(HandError::TooManyKept(kept.len()).into());
        }
    }

    let (need1, need2) = (HAND_SIZE - p1.len(), HAND_SIZE - p2.len());
    if deck.count() < need1 + need2 {
        return Err(EvalError::InsufficientDeck {
            need: need1 + need2,
            available: deck.count(),
        });
    }

    info!(
        "Simulating {} trials drawing {need1} and {need2} cards from {} cards",
        config.trials,
        deck.count()
    );

    let tally = par_trials(deck, config, |dealer| {
        let h1 = complete_hand(p1, dealer.deal(need1)?);
        let h2 = complete_hand(p2, dealer.deal(need2)?);
        let v1 = HandValue::eval(&h1).ok()?;
        let v2 = HandValue::eval(&h2).ok()?;
        Some(v1.compare(&v2))
    });

    finish(tally)
}

/// Simulates `config.trials` showdowns of a complete hand against a random
/// hand dealt from `deck`.
///
/// The deck should not contain the hand cards, the rates of the random hand
/// are reported as the second player rates.
pub fn win_rate_vs_random(hand: &[Card], deck: &Deck, config: &Config) -> Result<WinRates> {
    let value = HandValue::eval(hand)?;
    if deck.count() < HAND_SIZE {
        return Err(EvalError::InsufficientDeck {
            need: HAND_SIZE,
            available: deck.count(),
        });
    }

    info!("Simulating {} trials against random hands", config.trials);

    let tally = par_trials(deck, config, |dealer| {
        let other = HandValue::eval(dealer.deal(HAND_SIZE)?).ok()?;
        Some(value.compare(&other))
    });

    finish(tally)
}

fn finish(tally: Tally) -> Result<WinRates> {
    if tally.invalid > 0 {
        warn!(
            "{} of {} trials were invalid",
            tally.invalid,
            tally.invalid + tally.valid()
        );
    }

    let rates = WinRates::try_from(tally)?;
    info!(
        "Finished {} trials p1={:.4} p2={:.4} tie={:.4}",
        rates.valid_trials, rates.p1_win_rate, rates.p2_win_rate, rates.tie_rate
    );

    Ok(rates)
}

/// Runs the trials in parallel, the `trial` closure returns None for an
/// invalid trial.
fn par_trials<F>(deck: &Deck, config: &Config, trial: F) -> Tally
where
    F: Fn(&mut Dealer<'_, SmallRng>) -> Option<Showdown> + Sync,
{
    let num_tasks = config.num_tasks();
    let (base, extra) = (config.trials / num_tasks, config.trials % num_tasks);

    thread::scope(|s| {
        let handles = (0..num_tasks)
            .map(|task_id| (task_id, base + usize::from(task_id < extra)))
            .filter(|&(_, trials)| trials > 0)
            .map(|(task_id, trials)| {
                let trial = &trial;
                s.spawn(move || {
                    // Stream 0 is used to sample the draws.
                    let mut rng = config.rng(task_id as u64 + 1);
                    let mut deck = deck.clone();
                    let mut tally = Tally::default();

                    for _ in 0..trials {
                        let mut dealer = deck.dealer(&mut rng);
                        tally.record(trial(&mut dealer));
                    }

                    tally
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .sum()
    })
}
