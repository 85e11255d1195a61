//! Decision trees used by the ensemble back ends.
//!
//! Both trees grow greedily on dense column-gathered data: the
//! classification tree minimizes weighted Gini impurity and backs the
//! bagged forest, the regression tree minimizes squared error and fits the
//! boosting pseudo-residuals.

use serde::{Deserialize, Serialize};

use crate::pipeline::data::Label;

const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum ClassNode {
    Leaf {
        label: Label,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<ClassNode>,
        right: Box<ClassNode>,
    },
}

/// Gini classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    root: Option<ClassNode>,
}

impl DecisionTree {
    pub fn new(max_depth: Option<usize>, min_samples_split: usize, min_samples_leaf: usize) -> Self {
        DecisionTree {
            max_depth,
            min_samples_split: min_samples_split.max(2),
            min_samples_leaf: min_samples_leaf.max(1),
            root: None,
        }
    }

    pub fn fit(&mut self, x: &[Vec<f64>], y: &[Label]) {
        assert!(!x.is_empty() && x.len() == y.len());
        let rows: Vec<usize> = (0..x.len()).collect();
        self.root = Some(self.grow(x, y, rows, 0));
    }

    pub fn predict_row(&self, row: &[f64]) -> Label {
        let mut node = self.root.as_ref().expect("tree fitted before predict");
        loop {
            match node {
                ClassNode::Leaf { label } => return *label,
                ClassNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn grow(&self, x: &[Vec<f64>], y: &[Label], rows: Vec<usize>, depth: usize) -> ClassNode {
        let counts = label_counts(y, &rows);
        let majority = majority_label(&counts);

        let depth_reached = self.max_depth.is_some_and(|d| depth >= d);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure || depth_reached || rows.len() < self.min_samples_split {
            return ClassNode::Leaf { label: majority };
        }

        match self.best_split(x, y, &rows, &counts) {
            None => ClassNode::Leaf { label: majority },
            Some((feature, threshold)) => {
                let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
                    rows.into_iter().partition(|&r| x[r][feature] <= threshold);
                ClassNode::Split {
                    feature,
                    threshold,
                    left: Box::new(self.grow(x, y, left_rows, depth + 1)),
                    right: Box::new(self.grow(x, y, right_rows, depth + 1)),
                }
            }
        }
    }

    fn best_split(
        &self,
        x: &[Vec<f64>],
        y: &[Label],
        rows: &[usize],
        parent_counts: &[usize; 4],
    ) -> Option<(usize, f64)> {
        let n = rows.len() as f64;
        let parent = gini(parent_counts, n);
        let mut best: Option<(f64, usize, f64)> = None;

        for feature in 0..x[rows[0]].len() {
            let mut ordered: Vec<(f64, usize)> =
                rows.iter().map(|&r| (x[r][feature], r)).collect();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = [0usize; 4];
            let mut right = *parent_counts;
            for i in 0..ordered.len() - 1 {
                let class = y[ordered[i].1].index();
                left[class] += 1;
                right[class] -= 1;

                let n_left = i + 1;
                let n_right = ordered.len() - n_left;
                if n_left < self.min_samples_leaf || n_right < self.min_samples_leaf {
                    continue;
                }
                // Only split between distinct feature values.
                if ordered[i].0 == ordered[i + 1].0 {
                    continue;
                }

                let score = (n_left as f64 * gini(&left, n_left as f64)
                    + n_right as f64 * gini(&right, n_right as f64))
                    / n;
                if score + MIN_GAIN < parent
                    && best.map_or(true, |(s, _, _)| score < s)
                {
                    let threshold = (ordered[i].0 + ordered[i + 1].0) / 2.0;
                    best = Some((score, feature, threshold));
                }
            }
        }
        best.map(|(_, feature, threshold)| (feature, threshold))
    }
}

fn label_counts(y: &[Label], rows: &[usize]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for &r in rows {
        counts[y[r].index()] += 1;
    }
    counts
}

fn majority_label(counts: &[usize; 4]) -> Label {
    let mut best = 0;
    for c in 1..counts.len() {
        if counts[c] > counts[best] {
            best = c;
        }
    }
    Label::REPORT_ORDER[best]
}

fn gini(counts: &[usize; 4], total: f64) -> f64 {
    let mut acc = 1.0;
    for &c in counts {
        let p = c as f64 / total;
        acc -= p * p;
    }
    acc
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum RegNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<RegNode>,
        right: Box<RegNode>,
    },
}

/// Least-squares regression tree for boosting residuals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    max_depth: usize,
    min_samples_leaf: usize,
    root: Option<RegNode>,
}

impl RegressionTree {
    pub fn new(max_depth: usize, min_samples_leaf: usize) -> Self {
        RegressionTree {
            max_depth,
            min_samples_leaf: min_samples_leaf.max(1),
            root: None,
        }
    }

    pub fn fit(&mut self, x: &[Vec<f64>], targets: &[f64]) {
        assert!(!x.is_empty() && x.len() == targets.len());
        let rows: Vec<usize> = (0..x.len()).collect();
        self.root = Some(self.grow(x, targets, rows, 0));
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = self.root.as_ref().expect("tree fitted before predict");
        loop {
            match node {
                RegNode::Leaf { value } => return *value,
                RegNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn grow(&self, x: &[Vec<f64>], targets: &[f64], rows: Vec<usize>, depth: usize) -> RegNode {
        let mean = rows.iter().map(|&r| targets[r]).sum::<f64>() / rows.len() as f64;
        if depth >= self.max_depth || rows.len() < 2 * self.min_samples_leaf {
            return RegNode::Leaf { value: mean };
        }

        match self.best_split(x, targets, &rows) {
            None => RegNode::Leaf { value: mean },
            Some((feature, threshold)) => {
                let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
                    rows.into_iter().partition(|&r| x[r][feature] <= threshold);
                RegNode::Split {
                    feature,
                    threshold,
                    left: Box::new(self.grow(x, targets, left_rows, depth + 1)),
                    right: Box::new(self.grow(x, targets, right_rows, depth + 1)),
                }
            }
        }
    }

    fn best_split(&self, x: &[Vec<f64>], targets: &[f64], rows: &[usize]) -> Option<(usize, f64)> {
        let n = rows.len() as f64;
        let total: f64 = rows.iter().map(|&r| targets[r]).sum();
        let total_sq: f64 = rows.iter().map(|&r| targets[r] * targets[r]).sum();
        let parent_sse = total_sq - total * total / n;
        let mut best: Option<(f64, usize, f64)> = None;

        for feature in 0..x[rows[0]].len() {
            let mut ordered: Vec<(f64, f64)> =
                rows.iter().map(|&r| (x[r][feature], targets[r])).collect();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (mut left_sum, mut left_sq) = (0.0, 0.0);
            for i in 0..ordered.len() - 1 {
                left_sum += ordered[i].1;
                left_sq += ordered[i].1 * ordered[i].1;

                let n_left = (i + 1) as f64;
                let n_right = n - n_left;
                if (i + 1) < self.min_samples_leaf
                    || (ordered.len() - i - 1) < self.min_samples_leaf
                    || ordered[i].0 == ordered[i + 1].0
                {
                    continue;
                }

                let right_sum = total - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / n_left)
                    + (right_sq - right_sum * right_sum / n_right);
                if sse + MIN_GAIN < parent_sse && best.map_or(true, |(s, _, _)| sse < s) {
                    let threshold = (ordered[i].0 + ordered[i + 1].0) / 2.0;
                    best = Some((sse, feature, threshold));
                }
            }
        }
        best.map(|(_, feature, threshold)| (feature, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_tree_learns_a_threshold() {
        let x = vec![
            vec![0.1],
            vec![0.2],
            vec![0.3],
            vec![0.8],
            vec![0.9],
            vec![1.0],
        ];
        let y = vec![
            Label::False,
            Label::False,
            Label::False,
            Label::True,
            Label::True,
            Label::True,
        ];
        let mut tree = DecisionTree::new(Some(3), 2, 1);
        tree.fit(&x, &y);
        assert_eq!(tree.predict_row(&[0.15]), Label::False);
        assert_eq!(tree.predict_row(&[0.95]), Label::True);
    }

    #[test]
    fn min_samples_leaf_blocks_tiny_splits() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![Label::False, Label::False, Label::False, Label::True];
        let mut tree = DecisionTree::new(None, 2, 3);
        tree.fit(&x, &y);
        // A single split would strand the lone TRUE row in a 1-sample leaf.
        assert_eq!(tree.predict_row(&[3.0]), Label::False);
    }

    #[test]
    fn regression_tree_fits_a_step() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![10.0], vec![11.0], vec![12.0]];
        let t = vec![-1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let mut tree = RegressionTree::new(2, 1);
        tree.fit(&x, &t);
        assert!(tree.predict_row(&[0.5]) < 0.0);
        assert!(tree.predict_row(&[11.5]) > 0.0);
    }

    #[test]
    fn constant_targets_become_a_single_leaf() {
        let x = vec![vec![0.0], vec![1.0]];
        let t = vec![0.5, 0.5];
        let mut tree = RegressionTree::new(3, 1);
        tree.fit(&x, &t);
        assert!((tree.predict_row(&[0.0]) - 0.5).abs() < 1e-12);
    }
}
