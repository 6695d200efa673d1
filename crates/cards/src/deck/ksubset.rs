// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! K-subsets enumeration and ranking.
use super::Deck;

/// The largest subset size supported.
pub(crate) const MAX_K: usize = 7;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u64; MAX_K + 1]; Deck::SIZE + 1] {
    let mut t = [[0u64; MAX_K + 1]; Deck::SIZE + 1];
    let mut n = 0;

    while n <= Deck::SIZE {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && n > 0 {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; MAX_K + 1]; Deck::SIZE + 1] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= Deck::SIZE, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= 7");

    NCKS[n][k] as usize
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
pub(crate) fn nth_ksubset(mut n: usize, k: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K);

    let mut out = [0; MAX_K];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c -= 1;
        out[k] = c;

        n -= nck(c, k + 1);
    }

    out
}

/// Calls the given closure for count k-subsets of 0..n starting from the nth
/// ksubset, stops early after the last k-subset.
pub(crate) fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    assert!(1 <= k && k <= MAX_K, "1 <= k <= {MAX_K}");
    if count == 0 {
        return;
    }

    // Algorithm L from TAOCP 4a, c[0] is unused and c[k+1], c[k+2] are sentinels.
    let mut c = [0usize; MAX_K + 3];
    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut counter = 1;
    loop {
        f(&c[1..=k]);

        if counter == count {
            break;
        }
        counter += 1;

        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nck() {
        // For n < k = 0
        assert_eq!(nck(2, 3), 0);
        assert_eq!(nck(0, 0), 1);

        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(52, k), v));

        [1, 47, 1081, 16215, 178365, 1533939]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(47, k), v));

        [1, 5, 10, 10, 5, 1, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(5, k), v));

        [1, 1, 0, 0, 0, 0, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(1, k), v));
    }

    #[test]
    fn test_nth_ksubset() {
        for k in 1..=5 {
            let mut counter = 0;
            let count = nck(20, k);
            for_each_ksubset(20, k, 0, count, |s| {
                let ks = nth_ksubset(counter, k);
                assert_eq!(s, &ks[..k]);
                assert!(s.windows(2).all(|w| w[0] < w[1]));
                counter += 1;
            });

            assert_eq!(count, counter);
        }

        // Start from half way.
        let mut counter = 0;
        let nth = nck(30, 4) / 2;
        for_each_ksubset(30, 4, nth, nth, |s| {
            let ks = nth_ksubset(nth + counter, 4);
            assert_eq!(s, &ks[..4]);
            counter += 1;
        });

        assert_eq!(nth, counter);
    }

    #[test]
    fn test_for_each_ksubset_stops_at_end() {
        // Asking for more than available stops at the last subset.
        let mut counter = 0;
        for_each_ksubset(6, 3, 15, 100, |_| counter += 1);
        assert_eq!(counter, nck(6, 3) - 15);

        counter = 0;
        for_each_ksubset(6, 3, 0, 0, |_| counter += 1);
        assert_eq!(counter, 0);
    }

    // This takes a while to run in debug mode as it goes through 133M subsets.
    #[test]
    #[ignore]
    fn test_nth_ksubset_all7() {
        let mut counter = 0;
        let count = nck(52, 7);
        for_each_ksubset(52, 7, 0, count, |s| {
            let ks = nth_ksubset(counter, 7);
            s.iter().zip(ks).for_each(|(&l, r)| assert_eq!(l, r));
            counter += 1;
        });

        assert_eq!(count, counter);
    }
}
