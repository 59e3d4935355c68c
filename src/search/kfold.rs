//! Seeded k-fold partitioning of training indices.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, SentiraError};

/// One fold: the indices trained on and the indices held out for scoring.
#[derive(Clone, Debug, PartialEq)]
pub struct Fold {
    /// Indices the pipeline fits on.
    pub train: Vec<usize>,
    /// Indices scored against.
    pub held_out: Vec<usize>,
}

/// Seeded k-fold splitter.
///
/// Indices are shuffled once with the seed, then chunked into k disjoint
/// near-equal held-out groups (the first `n % k` folds take one extra
/// index). The union of held-out groups is exactly the input index range.
#[derive(Clone, Copy, Debug)]
pub struct KFold {
    k: usize,
    seed: u64,
}

impl KFold {
    /// Create a splitter with `k >= 2` folds.
    pub fn new(k: usize, seed: u64) -> Result<Self> {
        if k < 2 {
            return Err(SentiraError::invalid_argument(format!(
                "cross-validation needs at least 2 folds, got {k}"
            )));
        }
        Ok(KFold { k, seed })
    }

    /// Number of folds.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Partition `0..n` into folds.
    pub fn split(&self, n: usize) -> Result<Vec<Fold>> {
        if n < self.k {
            return Err(SentiraError::invalid_argument(format!(
                "cannot make {} folds from {n} sample(s)",
                self.k
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let base = n / self.k;
        let extra = n % self.k;

        let mut folds = Vec::with_capacity(self.k);
        let mut start = 0;
        for fold in 0..self.k {
            let size = base + usize::from(fold < extra);
            let held_out: Vec<usize> = indices[start..start + size].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(&indices[start + size..])
                .copied()
                .collect();
            folds.push(Fold { train, held_out });
            start += size;
        }
        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_partition_the_input() {
        let folds = KFold::new(3, 9).unwrap().split(10).unwrap();
        assert_eq!(folds.len(), 3);

        let mut held_out: Vec<usize> = folds.iter().flat_map(|f| f.held_out.clone()).collect();
        held_out.sort();
        assert_eq!(held_out, (0..10).collect::<Vec<_>>());

        // Sizes are near-equal: 4, 3, 3.
        assert_eq!(folds[0].held_out.len(), 4);
        assert_eq!(folds[1].held_out.len(), 3);
        assert_eq!(folds[2].held_out.len(), 3);
    }

    #[test]
    fn test_train_and_held_out_are_disjoint() {
        for fold in KFold::new(4, 1).unwrap().split(23).unwrap() {
            for index in &fold.held_out {
                assert!(!fold.train.contains(index));
            }
            assert_eq!(fold.train.len() + fold.held_out.len(), 23);
        }
    }

    #[test]
    fn test_split_is_deterministic() {
        let splitter = KFold::new(5, 77).unwrap();
        assert_eq!(splitter.split(40).unwrap(), splitter.split(40).unwrap());
        assert_ne!(
            splitter.split(40).unwrap(),
            KFold::new(5, 78).unwrap().split(40).unwrap()
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(KFold::new(1, 0).is_err());
        assert!(KFold::new(3, 0).unwrap().split(2).is_err());
    }
}
