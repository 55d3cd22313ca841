//! Stratified train/holdout splitting.

use super::data::Label;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

/// Row indices of each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices so that each class keeps its proportion in both
/// partitions.
///
/// Each class is shuffled with a seeded RNG and `round(n_class * test_ratio)`
/// of its rows go to the holdout set. Both partitions are shuffled again so
/// classes are interleaved. The same labels and seed always give the same
/// split.
pub fn stratified_split(labels: &[Label], test_ratio: f64, seed: u64) -> Split {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();
    for class in Label::ALL {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        members.shuffle(&mut rng);

        let n_test = (members.len() as f64 * test_ratio).round() as usize;
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    info!(train = train.len(), test = test.len(), "stratified split");
    Split { train, test }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(fake: usize, real: usize) -> Vec<Label> {
        let mut v = vec![Label::Fake; fake];
        v.extend(vec![Label::Real; real]);
        v
    }

    fn real_ratio(all: &[Label], idx: &[usize]) -> f64 {
        idx.iter().filter(|&&i| all[i] == Label::Real).count() as f64 / idx.len() as f64
    }

    #[test]
    fn test_split_preserves_ratio() {
        let all = labels(700, 300);
        let split = stratified_split(&all, 0.2, 42);
        assert_eq!(split.train.len(), 800);
        assert_eq!(split.test.len(), 200);
        assert!((real_ratio(&all, &split.train) - 0.3).abs() <= 0.01);
        assert!((real_ratio(&all, &split.test) - 0.3).abs() <= 0.01);
    }

    #[test]
    fn test_split_ratio_for_other_ratios() {
        let all = labels(1337, 663);
        let overall = 663.0 / 2000.0;
        for ratio in [0.1, 0.25, 0.5] {
            let split = stratified_split(&all, ratio, 7);
            assert!((real_ratio(&all, &split.train) - overall).abs() <= 0.01);
            assert!((real_ratio(&all, &split.test) - overall).abs() <= 0.01);
        }
    }

    #[test]
    fn test_split_is_a_partition() {
        let all = labels(13, 9);
        let split = stratified_split(&all, 0.2, 1);
        let mut seen: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..22).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible() {
        let all = labels(50, 50);
        assert_eq!(stratified_split(&all, 0.2, 42), stratified_split(&all, 0.2, 42));
        assert_ne!(stratified_split(&all, 0.2, 42), stratified_split(&all, 0.2, 43));
    }
}
