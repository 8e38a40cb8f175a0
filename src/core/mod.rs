//! Model-fitting primitives behind the trained bundle

pub mod encoder;
pub mod forest;
pub mod tree;

// Re-export commonly used types
pub use encoder::LabelEncoder;
pub use forest::{ForestConfig, RandomForestClassifier, RandomForestRegressor};
pub use tree::{DecisionTree, FeatureSampling, SplitCriterion, TreeConfig};
