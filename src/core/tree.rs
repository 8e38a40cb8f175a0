//! CART decision trees used as the base learners for the random forests

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Impurity measure used to score candidate splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitCriterion {
    /// Gini impurity over dense class indices (classification).
    Gini,
    /// Target variance (regression).
    Variance,
}

/// How many features each node considers when searching for a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSampling {
    /// Every feature is a candidate at every node.
    All,
    /// A fresh random subset of roughly sqrt(n_features) per node.
    Sqrt,
}

/// Growth parameters for a single tree.
///
/// `n_classes` describes the target space: classification targets are dense
/// class indices in `0..n_classes`, while `n_classes == 0` marks regression.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub criterion: SplitCriterion,
    pub feature_sampling: FeatureSampling,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub n_classes: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted CART tree over dense `f64` feature rows.
///
/// Classification trees predict the majority class index of the reached
/// leaf; regression trees predict the leaf mean.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: usize,
}

impl DecisionTree {
    /// Grow a tree on the rows selected by `indices` (typically a bootstrap
    /// sample). `x` and `y` are the full training set; `indices` may repeat.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        indices: &[usize],
        config: &TreeConfig,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
        };
        tree.root = tree.grow(x, y, indices, config, rng, 0);
        tree
    }

    /// Walk the tree for one feature row.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = self.root;
        loop {
            match &self.nodes[node] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn grow(
        &mut self,
        x: &[Vec<f64>],
        y: &[f64],
        indices: &[usize],
        config: &TreeConfig,
        rng: &mut StdRng,
        depth: usize,
    ) -> usize {
        if depth >= config.max_depth
            || indices.len() < config.min_samples_split
            || is_constant(y, indices)
        {
            let value = leaf_value(y, indices, config.n_classes);
            return self.push(Node::Leaf { value });
        }

        match best_split(x, y, indices, config, rng) {
            None => {
                let value = leaf_value(y, indices, config.n_classes);
                self.push(Node::Leaf { value })
            }
            Some((feature, threshold)) => {
                let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .copied()
                    .partition(|&i| x[i][feature] <= threshold);
                if left_rows.is_empty() || right_rows.is_empty() {
                    let value = leaf_value(y, indices, config.n_classes);
                    return self.push(Node::Leaf { value });
                }
                let left = self.grow(x, y, &left_rows, config, rng, depth + 1);
                let right = self.grow(x, y, &right_rows, config, rng, depth + 1);
                self.push(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                })
            }
        }
    }
}

fn is_constant(y: &[f64], indices: &[usize]) -> bool {
    let mut it = indices.iter();
    let first = match it.next() {
        Some(&i) => y[i],
        None => return true,
    };
    it.all(|&i| y[i] == first)
}

/// Majority class index for classification, mean target for regression.
fn leaf_value(y: &[f64], indices: &[usize], n_classes: usize) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    if n_classes == 0 {
        let sum: f64 = indices.iter().map(|&i| y[i]).sum();
        return sum / indices.len() as f64;
    }
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        let class = y[i] as usize;
        if class < n_classes {
            counts[class] += 1;
        }
    }
    let mut best = 0usize;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best as f64
}

/// Pick the feature/threshold pair with the lowest weighted impurity among
/// the sampled candidate features. Returns `None` when no candidate feature
/// has two distinct values over the rows.
fn best_split(
    x: &[Vec<f64>],
    y: &[f64],
    indices: &[usize],
    config: &TreeConfig,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let first = *indices.first()?;
    let n_features = x[first].len();
    if n_features == 0 {
        return None;
    }

    let mut candidates: Vec<usize> = (0..n_features).collect();
    if config.feature_sampling == FeatureSampling::Sqrt {
        let k = ((n_features as f64).sqrt().round() as usize).clamp(1, n_features);
        candidates.shuffle(rng);
        candidates.truncate(k);
    }

    let mut best: Option<(usize, f64, f64)> = None;
    for &feature in &candidates {
        if let Some((threshold, score)) = best_threshold(x, y, indices, feature, config) {
            if best.map_or(true, |(_, _, s)| score < s) {
                best = Some((feature, threshold, score));
            }
        }
    }
    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Scan the sorted values of one feature, scoring the boundary between each
/// pair of distinct consecutive values. Thresholds are midpoints.
fn best_threshold(
    x: &[Vec<f64>],
    y: &[f64],
    indices: &[usize],
    feature: usize,
    config: &TreeConfig,
) -> Option<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = indices.iter().map(|&i| (x[i][feature], y[i])).collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = pairs.len();
    let mut best: Option<(f64, f64)> = None;

    match config.criterion {
        SplitCriterion::Gini => {
            let mut left_counts = vec![0usize; config.n_classes];
            let mut right_counts = vec![0usize; config.n_classes];
            for &(_, target) in &pairs {
                let class = target as usize;
                if class < config.n_classes {
                    right_counts[class] += 1;
                }
            }
            for split in 1..n {
                let class = pairs[split - 1].1 as usize;
                if class < config.n_classes {
                    left_counts[class] += 1;
                    right_counts[class] -= 1;
                }
                if pairs[split].0 <= pairs[split - 1].0 {
                    continue;
                }
                let weighted = (split as f64 * gini(&left_counts, split)
                    + (n - split) as f64 * gini(&right_counts, n - split))
                    / n as f64;
                let threshold = (pairs[split - 1].0 + pairs[split].0) / 2.0;
                if best.map_or(true, |(_, s)| weighted < s) {
                    best = Some((threshold, weighted));
                }
            }
        }
        SplitCriterion::Variance => {
            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            let mut right_sum: f64 = pairs.iter().map(|&(_, t)| t).sum();
            let mut right_sq: f64 = pairs.iter().map(|&(_, t)| t * t).sum();
            for split in 1..n {
                let t = pairs[split - 1].1;
                left_sum += t;
                left_sq += t * t;
                right_sum -= t;
                right_sq -= t * t;
                if pairs[split].0 <= pairs[split - 1].0 {
                    continue;
                }
                let weighted = (split as f64 * variance(left_sum, left_sq, split)
                    + (n - split) as f64 * variance(right_sum, right_sq, n - split))
                    / n as f64;
                let threshold = (pairs[split - 1].0 + pairs[split].0) / 2.0;
                if best.map_or(true, |(_, s)| weighted < s) {
                    best = Some((threshold, weighted));
                }
            }
        }
    }
    best
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let mut sum_sq = 0.0;
    for &count in counts {
        let p = count as f64 / total as f64;
        sum_sq += p * p;
    }
    1.0 - sum_sq
}

fn variance(sum: f64, sum_sq: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    (sum_sq / count as f64 - mean * mean).max(0.0)
}
