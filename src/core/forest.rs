//! Bootstrap-aggregated decision forests

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tree::{DecisionTree, FeatureSampling, SplitCriterion, TreeConfig};

/// Shared fitting parameters for every forest in the trained bundle.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of trees grown per forest.
    pub n_trees: usize,
    /// Depth cap per tree.
    pub max_depth: usize,
    /// Nodes with fewer rows than this become leaves.
    pub min_samples_split: usize,
    /// Seed for the bootstrap and feature sampling draws.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 50,
            max_depth: 32,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

/// Random forest over integer class labels.
///
/// Labels may be arbitrary integers; the forest records the sorted set of
/// observed classes at fit time and always predicts one of them.
#[derive(Debug, Clone)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTree>,
    classes: Vec<i64>,
}

impl RandomForestClassifier {
    pub fn fit(
        x: &[Vec<f64>],
        y: &[i64],
        config: &ForestConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        check_training_set(x.len(), y.len(), config)?;

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        // Trees operate on dense class indices, not the raw labels.
        let targets: Vec<f64> = y
            .iter()
            .map(|label| classes.binary_search(label).map_or(0.0, |i| i as f64))
            .collect();

        let tree_config = TreeConfig {
            criterion: SplitCriterion::Gini,
            feature_sampling: FeatureSampling::Sqrt,
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            n_classes: classes.len(),
        };

        let trees = grow_trees(x, &targets, &tree_config, config);
        Ok(Self { trees, classes })
    }

    /// Majority vote across trees; ties resolve to the lowest class.
    pub fn predict(&self, row: &[f64]) -> i64 {
        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            let class = tree.predict_row(row) as usize;
            if let Some(count) = votes.get_mut(class) {
                *count += 1;
            }
        }
        let mut winner = 0usize;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[winner] {
                winner = class;
            }
        }
        self.classes[winner]
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Random forest regressor; predictions average the per-tree leaf means.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTree>,
}

impl RandomForestRegressor {
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        config: &ForestConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        check_training_set(x.len(), y.len(), config)?;

        let tree_config = TreeConfig {
            criterion: SplitCriterion::Variance,
            feature_sampling: FeatureSampling::All,
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            n_classes: 0,
        };

        let trees = grow_trees(x, y, &tree_config, config);
        Ok(Self { trees })
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

fn check_training_set(
    rows: usize,
    targets: usize,
    config: &ForestConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if rows == 0 {
        return Err("cannot fit a forest on an empty training set".into());
    }
    if rows != targets {
        return Err(format!("feature rows ({rows}) and targets ({targets}) differ in length").into());
    }
    if config.n_trees == 0 {
        return Err("forest needs at least one tree".into());
    }
    Ok(())
}

/// Grow `n_trees` trees from one seeded RNG. The RNG is threaded through
/// bootstrap and feature sampling sequentially, so a given seed always
/// produces the same forest.
fn grow_trees(
    x: &[Vec<f64>],
    targets: &[f64],
    tree_config: &TreeConfig,
    config: &ForestConfig,
) -> Vec<DecisionTree> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = x.len();
    let mut trees = Vec::with_capacity(config.n_trees);
    for _ in 0..config.n_trees {
        let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        trees.push(DecisionTree::fit(x, targets, &sample, tree_config, &mut rng));
    }
    trees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cluster_data() -> (Vec<Vec<f64>>, Vec<i64>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..20 {
            let offset = (i % 5) as f64 * 0.01;
            if i < 10 {
                x.push(vec![offset, 1.0]);
                y.push(1);
            } else {
                x.push(vec![5.0 + offset, 1.0]);
                y.push(2);
            }
        }
        (x, y)
    }

    #[test]
    fn test_classifier_separates_clusters() {
        let (x, y) = two_cluster_data();
        let forest = RandomForestClassifier::fit(&x, &y, &ForestConfig::default()).unwrap();

        assert_eq!(forest.predict(&[0.02, 1.0]), 1);
        assert_eq!(forest.predict(&[5.03, 1.0]), 2);
        assert_eq!(forest.classes(), &[1, 2]);
        assert_eq!(forest.n_trees(), 50);
    }

    #[test]
    fn test_classifier_with_single_class_always_predicts_it() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![7, 7, 7];
        let forest = RandomForestClassifier::fit(&x, &y, &ForestConfig::default()).unwrap();

        assert_eq!(forest.predict(&[10.0]), 7);
        assert_eq!(forest.classes(), &[7]);
    }

    #[test]
    fn test_classifier_rejects_empty_training_set() {
        let x: Vec<Vec<f64>> = Vec::new();
        let y: Vec<i64> = Vec::new();
        assert!(RandomForestClassifier::fit(&x, &y, &ForestConfig::default()).is_err());
    }

    #[test]
    fn test_classifier_rejects_length_mismatch() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1];
        assert!(RandomForestClassifier::fit(&x, &y, &ForestConfig::default()).is_err());
    }

    #[test]
    fn test_same_seed_trains_identical_forests() {
        let (x, y) = two_cluster_data();
        let a = RandomForestClassifier::fit(&x, &y, &ForestConfig::default()).unwrap();
        let b = RandomForestClassifier::fit(&x, &y, &ForestConfig::default()).unwrap();

        let probes = [[0.0, 1.0], [2.5, 1.0], [5.0, 1.0], [9.0, 1.0]];
        for probe in &probes {
            assert_eq!(a.predict(probe), b.predict(probe));
        }
    }

    #[test]
    fn test_regressor_recovers_cluster_means() {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..10 {
            x.push(vec![i as f64]);
            y.push(if i < 5 { 12.0 } else { 18.0 });
        }
        let forest = RandomForestRegressor::fit(&x, &y, &ForestConfig::default()).unwrap();

        let low = forest.predict(&[1.0]);
        let high = forest.predict(&[8.0]);
        assert!((10.0..=14.0).contains(&low), "low prediction {low}");
        assert!((16.0..=20.0).contains(&high), "high prediction {high}");
    }

    #[test]
    fn test_regressor_on_constant_targets_predicts_the_constant() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let y = vec![21.0; 4];
        let forest = RandomForestRegressor::fit(&x, &y, &ForestConfig::default()).unwrap();

        assert!((forest.predict(&[2.5]) - 21.0).abs() < 1e-9);
    }
}
