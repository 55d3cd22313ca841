//! Holdout evaluation and the classification report.

use super::data::Label;
use std::fmt;

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of the class
    pub support: usize,
}

/// Metrics derived from a 2x2 confusion matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub accuracy: f64,
    /// Indexed by label value: `[fake, real]`
    pub per_class: [ClassMetrics; 2],
    pub macro_avg: ClassMetrics,
    /// `confusion[actual][predicted]`
    pub confusion: [[usize; 2]; 2],
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
}

impl ClassificationReport {
    /// Compute the report from predicted and true labels.
    ///
    /// An empty input gives a report of zeros.
    pub fn compute(predictions: &[Label], actual: &[Label]) -> Self {
        debug_assert_eq!(predictions.len(), actual.len());

        let mut confusion = [[0usize; 2]; 2];
        for (&pred, &truth) in predictions.iter().zip(actual) {
            confusion[truth.as_u8() as usize][pred.as_u8() as usize] += 1;
        }

        let total: usize = confusion.iter().flatten().sum();
        let correct = confusion[0][0] + confusion[1][1];

        let mut per_class = [ClassMetrics::default(); 2];
        for (k, metrics) in per_class.iter_mut().enumerate() {
            let tp = confusion[k][k];
            let predicted = confusion[0][k] + confusion[1][k];
            let support = confusion[k][0] + confusion[k][1];
            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            *metrics = ClassMetrics {
                precision,
                recall,
                f1,
                support,
            };
        }

        let macro_avg = ClassMetrics {
            precision: (per_class[0].precision + per_class[1].precision) / 2.0,
            recall: (per_class[0].recall + per_class[1].recall) / 2.0,
            f1: (per_class[0].f1 + per_class[1].f1) / 2.0,
            support: total,
        };

        ClassificationReport {
            accuracy: ratio(correct, total),
            per_class,
            macro_avg,
            confusion,
        }
    }

    pub fn class(&self, label: Label) -> &ClassMetrics {
        &self.per_class[label.as_u8() as usize]
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for label in Label::ALL {
            let m = self.class(label);
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                label.name(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write!(
            f,
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
            "macro avg",
            self.macro_avg.precision,
            self.macro_avg.recall,
            self.macro_avg.f1,
            self.macro_avg.support
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Fake, Real};

    #[test]
    fn test_perfect_predictions() {
        let labels = [Fake, Real, Real, Fake];
        let report = ClassificationReport::compute(&labels, &labels);
        assert!((report.accuracy - 1.0).abs() < 1e-9);
        for label in Label::ALL {
            assert!((report.class(label).f1 - 1.0).abs() < 1e-9);
            assert_eq!(report.class(label).support, 2);
        }
    }

    #[test]
    fn test_mixed() {
        // actual:    R R R R F F F F
        // predicted: R R R F R F F F
        let actual = [Real, Real, Real, Real, Fake, Fake, Fake, Fake];
        let predicted = [Real, Real, Real, Fake, Real, Fake, Fake, Fake];
        let report = ClassificationReport::compute(&predicted, &actual);
        assert!((report.accuracy - 0.75).abs() < 1e-9);
        assert!((report.class(Real).precision - 0.75).abs() < 1e-9);
        assert!((report.class(Real).recall - 0.75).abs() < 1e-9);
        assert_eq!(report.confusion, [[3, 1], [1, 3]]);
    }

    #[test]
    fn test_never_predicted_class() {
        let actual = [Real, Fake];
        let predicted = [Fake, Fake];
        let report = ClassificationReport::compute(&predicted, &actual);
        assert_eq!(report.class(Real).precision, 0.0);
        assert_eq!(report.class(Real).f1, 0.0);
        assert!((report.class(Fake).recall - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let report = ClassificationReport::compute(&[], &[]);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.macro_avg.support, 0);
    }

    #[test]
    fn test_display_lists_both_classes() {
        let report = ClassificationReport::compute(&[Fake, Real], &[Fake, Real]);
        let text = report.to_string();
        assert!(text.contains("Fake"));
        assert!(text.contains("Real"));
        assert!(text.contains("macro avg"));
    }
}
