use itertools::{Combinations, Itertools};
use std::ops::Range;

/// The subsets of `k` indices taken among `0..n`.
///
/// Each call to [`Subsets::iter`] starts a new enumeration.
/// Subsets are sorted vectors, produced lazily in lexicographic order:
/// for `n = 4` and `k = 2`, the order is `[0, 1]`, `[0, 2]`, `[0, 3]`, `[1, 2]`, `[1, 3]`, `[2, 3]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Subsets {
    n: usize,
    k: usize,
}

impl Subsets {
    /// Builds the collection of the subsets of `k` indices among `0..n`.
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, k }
    }

    /// Iterates over the subsets.
    pub fn iter(&self) -> Combinations<Range<usize>> {
        (0..self.n).combinations(self.k)
    }

    /// Returns the number of subsets, saturating at `u128::MAX`.
    pub fn len(&self) -> u128 {
        binomial(self.n, self.k)
    }

    /// Returns `true` if there is no subset.
    pub fn is_empty(&self) -> bool {
        self.k > self.n
    }
}

/// Computes `n` choose `k`, saturating at `u128::MAX`.
pub(crate) fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = usize::min(k, n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1)
        match result.checked_mul((n - i) as u128) {
            Some(r) => result = r / (i + 1) as u128,
            None => return u128::MAX,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ],
            Subsets::new(4, 2).iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_restartable() {
        let subsets = Subsets::new(5, 3);
        assert_eq!(
            subsets.iter().collect::<Vec<_>>(),
            subsets.iter().collect::<Vec<_>>()
        );
        assert_eq!(10, subsets.iter().count());
    }

    #[test]
    fn test_len() {
        assert_eq!(6, Subsets::new(4, 2).len());
        assert_eq!(1, Subsets::new(4, 4).len());
        assert_eq!(0, Subsets::new(4, 5).len());
        assert!(Subsets::new(4, 5).is_empty());
        assert_eq!(0, Subsets::new(4, 5).iter().count());
        assert_eq!(4, Subsets::new(4, 1).len());
    }

    #[test]
    fn test_binomial() {
        assert_eq!(1, binomial(0, 0));
        assert_eq!(252, binomial(10, 5));
        assert_eq!(100_891_344_545_564_193_334_812_497_256, binomial(100, 50));
        assert_eq!(u128::MAX, binomial(1000, 500));
    }
}
