//! Classification metrics: per-class precision/recall/F1 and the confusion
//! matrix over the fixed label set.

use std::fmt;

use ndarray::Array2;

use crate::pipeline::data::Label;

/// Per-class precision, recall, F1 and support.
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Full evaluation summary for one prediction run.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
}

/// Fraction of exact label matches.
pub fn accuracy(y_true: &[Label], y_pred: &[Label]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len());
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Confusion matrix with rows = actual, columns = predicted, both in
/// [`Label::REPORT_ORDER`].
pub fn confusion_matrix(y_true: &[Label], y_pred: &[Label]) -> Array2<usize> {
    assert_eq!(y_true.len(), y_pred.len());
    let k = Label::REPORT_ORDER.len();
    let mut matrix = Array2::zeros((k, k));
    for (t, p) in y_true.iter().zip(y_pred) {
        matrix[[t.index(), p.index()]] += 1;
    }
    matrix
}

/// Per-class metrics plus overall accuracy. Classes with no true and no
/// predicted examples report zeros rather than NaN.
pub fn classification_report(y_true: &[Label], y_pred: &[Label]) -> ClassificationReport {
    let cm = confusion_matrix(y_true, y_pred);
    let per_class = Label::REPORT_ORDER
        .iter()
        .map(|&label| {
            let i = label.index();
            let tp = cm[[i, i]] as f64;
            let actual: usize = cm.row(i).sum();
            let predicted: usize = cm.column(i).sum();

            let precision = if predicted > 0 { tp / predicted as f64 } else { 0.0 };
            let recall = if actual > 0 { tp / actual as f64 } else { 0.0 };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support: actual,
            }
        })
        .collect();

    ClassificationReport {
        per_class,
        accuracy: accuracy(y_true, y_pred),
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<18} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1", "support"
        )?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:<18} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:<18} {:>9.3}", "accuracy", self.accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confusion_matrix_counts_in_report_order() {
        let y_true = vec![Label::False, Label::False, Label::True, Label::Other];
        let y_pred = vec![Label::False, Label::True, Label::True, Label::Other];
        let cm = confusion_matrix(&y_true, &y_pred);
        assert_eq!(cm[[0, 0]], 1); // FALSE as FALSE
        assert_eq!(cm[[0, 1]], 1); // FALSE as TRUE
        assert_eq!(cm[[1, 1]], 1); // TRUE as TRUE
        assert_eq!(cm[[3, 3]], 1); // OTHER as OTHER
        assert_eq!(cm.sum(), 4);
    }

    #[test]
    fn perfect_predictions_score_one() {
        let y = vec![Label::False, Label::True, Label::PartiallyFalse, Label::Other];
        let report = classification_report(&y, &y);
        assert!((report.accuracy - 1.0).abs() < 1e-12);
        for m in &report.per_class {
            assert!((m.f1 - 1.0).abs() < 1e-12, "class {}", m.label);
        }
    }

    #[test]
    fn absent_classes_report_zero_not_nan() {
        let y_true = vec![Label::False, Label::False];
        let y_pred = vec![Label::False, Label::False];
        let report = classification_report(&y_true, &y_pred);
        let other = &report.per_class[Label::Other.index()];
        assert_eq!(other.support, 0);
        assert_eq!(other.f1, 0.0);
        assert!(other.f1.is_finite());
    }

    #[test]
    fn precision_and_recall_differ_on_asymmetric_errors() {
        // TRUE predicted twice but only right once; one FALSE missed.
        let y_true = vec![Label::True, Label::False, Label::True];
        let y_pred = vec![Label::True, Label::True, Label::True];
        let report = classification_report(&y_true, &y_pred);
        let t = &report.per_class[Label::True.index()];
        assert!((t.recall - 1.0).abs() < 1e-12);
        assert!((t.precision - 2.0 / 3.0).abs() < 1e-12);
    }
}
