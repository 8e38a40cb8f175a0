//! Pit stop prediction service
//!
//! Predicts Formula 1 pit-stop behavior (stop count, pit lap, next tire)
//! from race, circuit, and driver attributes. The pipeline runs once at
//! startup:
//! - load and inner-join the driver-grid and circuit tables,
//! - simulate a pit-stop label per joined entry,
//! - fit three random forests against dummy-encoded features,
//! - serve predictions over HTTP from the immutable trained bundle.
//!
//! # Example
//!
//! ```no_run
//! use pitstop::data::csv_loader::load_race_entries;
//! use pitstop::models::RaceDescriptor;
//! use pitstop::predictor::PitStopModel;
//!
//! let entries = load_race_entries("data/driverGrid.csv", "data/circuits.csv").unwrap();
//! let model = PitStopModel::train(&entries).unwrap();
//! let prediction = model.predict(&RaceDescriptor {
//!     circuit_name: "Autodromo Nazionale di Monza".to_string(),
//!     circuit_country: "Italy".to_string(),
//!     year: 2023,
//!     driver_id: 44,
//! });
//! println!("{:?}", prediction);
//! ```

pub mod core;
pub mod data;
pub mod models;
pub mod predictor;

// Re-export commonly used types
pub use data::{load_race_entries, FeatureSchema, PitStopLabel, RaceEntry};
pub use models::{HealthResponse, PredictForm, Prediction, PredictionView, RaceDescriptor};
pub use predictor::PitStopModel;
