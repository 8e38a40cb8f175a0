//! Data loading, label synthesis, and feature encoding

pub mod csv_loader;
pub mod features;
pub mod labels;

// Re-export commonly used types
pub use csv_loader::{load_race_entries, RaceEntry};
pub use features::FeatureSchema;
pub use labels::{
    stop_count_for_round, synthesize_labels, synthesize_labels_with, PitStopLabel,
};
