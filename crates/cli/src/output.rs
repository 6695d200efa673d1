// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Text and JSON report rendering.
use serde::Serialize;

use lowdraw_eval::{Card, EvalError, MatchupReport, PlayerReport, Probabilities, WinRates};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Serialize)]
struct PlayerJson<'a> {
    kept: &'a [Card],
    final_hand: &'a [Card],
    hand_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    probabilities: Option<&'a Probabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a PlayerReport> for PlayerJson<'a> {
    fn from(player: &'a PlayerReport) -> Self {
        Self {
            kept: &player.kept,
            final_hand: &player.final_hand,
            hand_name: hand_name(player),
            probabilities: player.probabilities.as_ref().ok(),
            error: player.probabilities.as_ref().err().map(EvalError::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportJson<'a> {
    player1: PlayerJson<'a>,
    player2: PlayerJson<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    win_rates: Option<&'a WinRates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    win_rate_error: Option<String>,
}

/// Renders a matchup report as pretty printed JSON.
pub fn to_json(report: &MatchupReport) -> serde_json::Result<String> {
    let json = ReportJson {
        player1: PlayerJson::from(&report.player1),
        player2: PlayerJson::from(&report.player2),
        win_rates: report.win_rates.as_ref().ok(),
        win_rate_error: report.win_rates.as_ref().err().map(EvalError::to_string),
    };

    serde_json::to_string_pretty(&json)
}

/// Prints a matchup report to stdout.
pub fn print_report(report: &MatchupReport) {
    for (idx, player) in [&report.player1, &report.player2].into_iter().enumerate() {
        print_player(idx + 1, player);
        println!();
    }

    match &report.win_rates {
        Ok(rates) => print_rates(rates),
        Err(e) => println!("Win rates: error: {e}"),
    }
}

/// Prints the win rate of a hand against random hands.
pub fn print_vs_random(hand: &[Card], rates: &WinRates) {
    println!("Hand: {} vs random hands", cards_str(hand));
    println!(
        "Win {}  Lose {}  Tie {}  ({} trials)",
        percent(rates.p1_win_rate),
        percent(rates.p2_win_rate),
        percent(rates.tie_rate),
        rates.valid_trials
    );
}

fn print_player(idx: usize, player: &PlayerReport) {
    println!(
        "Player {idx}: kept [{}] final hand [{}] {}",
        cards_str(&player.kept),
        cards_str(&player.final_hand),
        hand_name(player)
    );

    match &player.probabilities {
        Ok(probs) => {
            for (category, p) in probs.distribution.iter() {
                println!("  {:<16}{:>8}", category.label(), percent(p));
            }
            println!("  ({} draws, {})", probs.outcomes, probs.mode);
        }
        Err(e) => println!("  error: {e}"),
    }
}

fn print_rates(rates: &WinRates) {
    print!(
        "Win rates: P1 {}  P2 {}  Tie {}  ({} trials",
        percent(rates.p1_win_rate),
        percent(rates.p2_win_rate),
        percent(rates.tie_rate),
        rates.valid_trials
    );

    if rates.invalid_trials > 0 {
        print!(", {} invalid", rates.invalid_trials);
    }

    println!(")");
}

fn hand_name(player: &PlayerReport) -> String {
    player
        .hand_name()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.to_string())
}

fn cards_str(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lowdraw_eval::{Config, Matchup};

    fn cards(tokens: &str) -> Vec<Card> {
        tokens.split_whitespace().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn json_report() {
        let config = Config {
            trials: 100,
            tasks: 2,
            seed: Some(1),
            ..Config::default()
        };

        let m = Matchup::new(cards("7H 5C 4S 3D 2H"), cards("2D 3H 4D 5S 6C")).unwrap();
        let json = to_json(&m.analyze(&config)).unwrap();
        let value = serde_json::from_str::<serde_json::Value>(&json).unwrap();

        let p1 = &value["player1"];
        assert_eq!(p1["hand_name"], "7-High");
        assert_eq!(p1["final_hand"][0], "2H");
        assert_eq!(p1["probabilities"]["distribution"]["7-High"], 1.0);
        assert_eq!(p1["probabilities"]["mode"], "exhaustive");
        assert!(p1.get("error").is_none());

        assert_eq!(value["player2"]["hand_name"], "Bad Hand");
        assert_eq!(value["win_rates"]["p1_win_rate"], 1.0);
        assert!(value.get("win_rate_error").is_none());
    }

    #[test]
    fn json_errors() {
        let config = Config {
            trials: 10,
            seed: Some(1),
            ..Config::default()
        };

        let mut m = Matchup::new(vec![], vec![]).unwrap().analyze(&config);
        m.player1.probabilities = Err(EvalError::InsufficientDeck {
            need: 5,
            available: 0,
        });
        m.win_rates = Err(EvalError::AllTrialsInvalid { trials: 10 });

        let value = serde_json::from_str::<serde_json::Value>(&to_json(&m).unwrap()).unwrap();
        assert!(value["player1"].get("probabilities").is_none());
        assert!(value["player1"]["error"].as_str().unwrap().contains("not enough cards"));
        assert!(value["player2"].get("error").is_none());
        assert!(value.get("win_rates").is_none());
        assert!(value["win_rate_error"].as_str().unwrap().contains("all 10 trials"));
    }

    #[test]
    fn formatting() {
        assert_eq!(percent(0.123456), "12.35%");
        assert_eq!(cards_str(&cards("2H 10D")), "2H 10D");
    }
}
