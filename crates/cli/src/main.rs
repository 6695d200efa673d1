// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lowdraw 2-7 single draw odds calculator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::error;
use std::str::FromStr;

use lowdraw_eval::{Card, Config, Matchup, ParseCardError, sim};

mod output;

/// A list of cards separated by commas or spaces.
#[derive(Debug, Clone, Default)]
struct Cards(Vec<Card>);

impl FromStr for Cards {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Cards)
    }
}

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Cli {
    /// Cards kept by player 1, e.g. "7h,5d,3c".
    #[clap(short = '1', long = "player1", default_value = "")]
    player1: Cards,
    /// Cards kept by player 2.
    #[clap(short = '2', long = "player2", default_value = "")]
    player2: Cards,
    /// Maximum number of draws evaluated for the probabilities.
    #[clap(long, default_value_t = Config::DEFAULT_BUDGET as u32,
        value_parser = clap::value_parser!(u32).range(1..=10_000_000))]
    budget: u32,
    /// Number of win rate simulation trials.
    #[clap(long, default_value_t = Config::DEFAULT_TRIALS as u32,
        value_parser = clap::value_parser!(u32).range(0..=100_000_000))]
    trials: u32,
    /// Number of parallel tasks, defaults to the available parallelism.
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..=1024))]
    tasks: Option<u16>,
    /// Seed for reproducible results.
    #[clap(long)]
    seed: Option<u64>,
    /// Print the results as JSON.
    #[clap(long)]
    json: bool,
    /// Compute the win rate of player 1 complete hand against random hands.
    #[clap(long)]
    vs_random: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let default = Config::default();
        Config {
            budget: self.budget as usize,
            trials: self.trials as usize,
            tasks: self.tasks.map_or(default.tasks, usize::from),
            seed: self.seed,
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let matchup = Matchup::new(cli.player1.0, cli.player2.0)?;

    if cli.vs_random {
        let rates = sim::win_rate_vs_random(matchup.player1(), &matchup.deck(), &config)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&rates)?);
        } else {
            output::print_vs_random(matchup.player1(), &rates);
        }
    } else {
        let report = matchup.analyze(&config);
        if cli.json {
            println!("{}", output::to_json(&report)?);
        } else {
            output::print_report(&report);
        }
    }

    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    if let Err(e) = run(Cli::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cards() {
        let cards = "7h,5d 3C, ts".parse::<Cards>().unwrap();
        let tokens = cards.0.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(tokens, ["7H", "5D", "3C", "10S"]);

        assert!("".parse::<Cards>().unwrap().0.is_empty());
        assert!("7h,1x".parse::<Cards>().is_err());
    }

    #[test]
    fn cli_config() {
        let cli = Cli::parse_from(["lowdraw", "-1", "7h,5d", "--trials", "100", "--seed", "3"]);
        assert_eq!(cli.player1.0.len(), 2);
        assert!(cli.player2.0.is_empty());

        let config = cli.config();
        assert_eq!(config.trials, 100);
        assert_eq!(config.budget, Config::DEFAULT_BUDGET);
        assert_eq!(config.seed, Some(3));
        assert!(config.tasks >= 1);

        assert!(Cli::try_parse_from(["lowdraw", "--budget", "0"]).is_err());
        assert!(Cli::try_parse_from(["lowdraw", "-2", "2h,zz"]).is_err());
    }
}
