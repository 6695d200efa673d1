// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

mod ksubset;
#[cfg(feature = "parallel")]
mod parallel;

pub use ksubset::nck;
use ksubset::{MAX_K, for_each_ksubset, nth_ksubset};

/// A Poker card.
///
/// A card is packed in a single byte with the following format:
///
/// ```text
///   +--------+
///   |xxrrrrss|
///   +--------+
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   s = suit of card (clubs=0,diamonds=1,hearts=2,spades=3)
/// ```
///
/// so that card ids are dense in `0..52` and cards order by rank first.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

/// A Poker card.
impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(((rank as u8) << 2) | suit as u8)
    }

    /// This card unique id in `0..52`.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.0 & 0x3 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_index(self.0 >> 2)
    }

    /// Returns the bit for this card in a 52 bits cards set.
    #[inline]
    pub(crate) fn mask(&self) -> u64 {
        1u64 << self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Card token parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The token doesn't have the rank and suit shape.
    #[error("invalid card '{0}', expected a rank followed by a suit (e.g. 10H)")]
    Token(String),
    /// The rank part is not one of 2..10, J, Q, K, A.
    #[error("invalid rank in card '{0}'")]
    Rank(String),
    /// The suit part is not one of H, D, S, C.
    #[error("invalid suit in card '{0}'")]
    Suit(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a case insensitive token like `2h`, `10D`, `TD`, or `As`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if !token.is_ascii() || !(2..=3).contains(&token.len()) {
            return Err(ParseCardError::Token(s.to_string()));
        }

        let (rank, suit) = token.split_at(token.len() - 1);
        let rank = match rank.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(ParseCardError::Rank(s.to_string())),
        };

        let suit = match suit.to_ascii_uppercase().as_str() {
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            "H" => Suit::Hearts,
            "S" => Suit::Spades,
            _ => return Err(ParseCardError::Suit(s.to_string())),
        };

        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Card rank, the ace is always high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: usize = 13;

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank pip value, 2 for a deuce up to 14 for an ace.
    pub fn value(&self) -> u8 {
        *self as u8 + 2
    }

    fn from_index(index: u8) -> Rank {
        match index {
            0 => Rank::Deuce,
            1 => Rank::Trey,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => panic!("Invalid rank index {index}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => "2",
            Rank::Trey => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };

        f.write_str(rank)
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }
}

/// A cards Deck.
///
/// The deck is a set of unique cards kept in a flat array, dealing reorders
/// the array in place without changing the set of cards it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The cards in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Checks if a card is in the deck.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Removes a card from the deck, returns false if the card was not in it.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| c == &card) {
            Some(pos) => {
                self.cards.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns a deck with the given cards removed.
    pub fn without(&self, cards: &[Card]) -> Deck {
        let removed = cards.iter().fold(0u64, |mask, c| mask | c.mask());
        let cards = self
            .cards
            .iter()
            .filter(|c| c.mask() & removed == 0)
            .copied()
            .collect();
        Deck { cards }
    }

    /// Creates a dealer that deals random cards out of this deck.
    ///
    /// Cards dealt by a dealer are never dealt again by the same dealer, when the
    /// dealer is dropped the deck still contains all its cards.
    pub fn dealer<'a, R: Rng>(&'a mut self, rng: &'a mut R) -> Dealer<'a, R> {
        Dealer {
            cards: &mut self.cards,
            pos: 0,
            rng,
        }
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Hands are visited in colexicographic order of the cards positions in the
    /// deck, the i-th hand visited is the same returned by [Deck::nth_hand].
    ///
    /// Panics if k > 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

        let n = self.cards.len();
        if k > n {
            return;
        }

        if k == 0 {
            f(&[]);
            return;
        }

        let mut h = [Card::new(Rank::Ace, Suit::Hearts); MAX_K];
        for_each_ksubset(n, k, 0, nck(n, k), |p| {
            for (idx, &pos) in p.iter().enumerate() {
                h[idx] = self.cards[pos];
            }

            f(&h[..k]);
        });
    }

    /// Copies the nth k-cards hand into `hand`, where k is the hand length.
    ///
    /// Panics if nth >= nck(self.count(), k).
    pub fn nth_hand(&self, nth: usize, hand: &mut [Card]) {
        let k = hand.len();
        assert!(
            nth < nck(self.cards.len(), k),
            "nth={nth} out of range for {k} cards hands"
        );

        let positions = nth_ksubset(nth, k);
        for (card, &pos) in hand.iter_mut().zip(&positions[..k]) {
            *card = self.cards[pos];
        }
    }

    /// Chooses `amount` distinct k-cards hands uniformly at random and returns
    /// their indices, see [Deck::nth_hand].
    ///
    /// If `amount` is larger than the number of k-cards hands all indices are
    /// returned in random order.
    pub fn sample_indices<R: Rng + ?Sized>(&self, rng: &mut R, amount: usize, k: usize) -> Vec<usize> {
        let total = nck(self.cards.len(), k);
        rand::seq::index::sample(rng, total, amount.min(total)).into_vec()
    }

    /// Calls the `f` closure for `amount` distinct k-cards hands chosen
    /// uniformly at random.
    pub fn sample<R, F>(&self, rng: &mut R, amount: usize, k: usize, mut f: F)
    where
        R: Rng + ?Sized,
        F: FnMut(&[Card]),
    {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

        let mut h = [Card::new(Rank::Ace, Suit::Hearts); MAX_K];
        for nth in self.sample_indices(rng, amount, k) {
            self.nth_hand(nth, &mut h[..k]);
            f(&h[..k]);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl FromIterator<Card> for Deck {
    /// Collects cards into a deck, repeated cards are added only once.
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut seen = 0u64;
        let cards = iter
            .into_iter()
            .filter(|c| {
                let fresh = seen & c.mask() == 0;
                seen |= c.mask();
                fresh
            })
            .collect();
        Deck { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

/// Deals random cards out of a deck without replacement.
///
/// Each deal moves the chosen cards to the front of the not yet dealt part of
/// the deck array with a partial Fisher-Yates shuffle.
#[derive(Debug)]
pub struct Dealer<'a, R> {
    cards: &'a mut [Card],
    pos: usize,
    rng: &'a mut R,
}

impl<R: Rng> Dealer<'_, R> {
    /// Deals k cards, returns None if there are less than k cards left.
    pub fn deal(&mut self, k: usize) -> Option<&[Card]> {
        let len = self.cards.len();
        if len - self.pos < k {
            return None;
        }

        let start = self.pos;
        for i in start..start + k {
            let j = self.rng.random_range(i..len);
            self.cards.swap(i, j);
        }

        self.pos += k;
        Some(&self.cards[start..self.pos])
    }

    /// The number of cards that can still be dealt.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.pos
    }
}
