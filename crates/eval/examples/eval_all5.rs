// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example eval_all5
// ```

use std::time::Instant;

use lowdraw_eval::{Deck, DisplayCategory, HandValue};

fn main() {
    // Evaluate all 2.6M hands with 4 parallel tasks.
    const NUM_TASKS: usize = 4;

    let now = Instant::now();

    // Each task counts in its own array, no contention.
    let task_counts = Deck::default().par_for_each(
        NUM_TASKS,
        5,
        || [0u64; DisplayCategory::COUNT],
        |counts, hand| {
            if let Some(category) = HandValue::eval(hand).ok().and_then(|v| v.display_category()) {
                counts[category.index()] += 1;
            }
        },
    );

    let elapsed = now.elapsed().as_secs_f64();

    let mut agg = [0u64; DisplayCategory::COUNT];
    for counts in task_counts {
        for (a, c) in agg.iter_mut().zip(counts) {
            *a += c;
        }
    }

    let total = agg.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in DisplayCategory::categories() {
        println!("{:<17}{}", format!("{category}:"), agg[category.index()]);
    }
}
