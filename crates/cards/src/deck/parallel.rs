// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use std::thread;

use super::{Card, Deck, Rank, Suit, ksubset::*};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The hands are split in `num_tasks` contiguous ranges, each task creates
    /// its own accumulator with `init` and passes it to `f` together with each
    /// hand in its range. Returns the tasks accumulators.
    ///
    /// Panics if k > 7 or num_tasks is zero.
    pub fn par_for_each<T, I, F>(&self, num_tasks: usize, k: usize, init: I, f: F) -> Vec<T>
    where
        T: Send,
        I: Fn() -> T + Sync,
        F: Fn(&mut T, &[Card]) + Sync,
    {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        if k == 0 || k > n {
            // Nothing to split, the empty hand or no hands at all.
            let mut acc = init();
            self.for_each(k, |hand| f(&mut acc, hand));
            return vec![acc];
        }

        let num_hands = nck(n, k);
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            let handles = (0..num_tasks)
                .map(|task_id| task_id * hands_per_task)
                .filter(|&start| start < num_hands)
                .map(|start| {
                    let (init, f) = (&init, &f);
                    s.spawn(move || {
                        let mut acc = init();
                        let mut h = [Card::new(Rank::Ace, Suit::Diamonds); MAX_K];
                        for_each_ksubset(n, k, start, hands_per_task, |p| {
                            for (idx, &pos) in p.iter().enumerate() {
                                h[idx] = self.cards[pos];
                            }

                            f(&mut acc, &h[..k]);
                        });
                        acc
                    })
                })
                .collect::<Vec<_>>();

            join_all(handles)
        })
    }

    /// Parallel for each over the given hand indices, see [Deck::nth_hand].
    ///
    /// The indices are split in `num_tasks` chunks, each task folds the hands
    /// for its chunk in its own accumulator. Returns the tasks accumulators.
    ///
    /// Panics if k > 7, num_tasks is zero, or an index is out of range.
    pub fn par_for_each_nth<T, I, F>(
        &self,
        num_tasks: usize,
        k: usize,
        indices: &[usize],
        init: I,
        f: F,
    ) -> Vec<T>
    where
        T: Send,
        I: Fn() -> T + Sync,
        F: Fn(&mut T, &[Card]) + Sync,
    {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");
        assert!(num_tasks > 0);

        if indices.is_empty() {
            return vec![init()];
        }

        let chunk_size = indices.len().div_ceil(num_tasks);

        thread::scope(|s| {
            let handles = indices
                .chunks(chunk_size)
                .map(|chunk| {
                    let (init, f) = (&init, &f);
                    s.spawn(move || {
                        let mut acc = init();
                        let mut h = [Card::new(Rank::Ace, Suit::Diamonds); MAX_K];
                        for &nth in chunk {
                            self.nth_hand(nth, &mut h[..k]);
                            f(&mut acc, &h[..k]);
                        }
                        acc
                    })
                })
                .collect::<Vec<_>>();

            join_all(handles)
        })
    }
}

/// Waits for all tasks, a panic in a task is propagated to the caller.
fn join_all<T>(handles: Vec<thread::ScopedJoinHandle<'_, T>>) -> Vec<T> {
    handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
        .collect()
}
