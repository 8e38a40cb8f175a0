//! The trained pit-stop model bundle

use tracing::info;

use crate::core::{ForestConfig, LabelEncoder, RandomForestClassifier, RandomForestRegressor};
use crate::data::csv_loader::RaceEntry;
use crate::data::features::FeatureSchema;
use crate::data::labels::{synthesize_labels, PitStopLabel};
use crate::models::{Prediction, RaceDescriptor};

/// Immutable bundle of fitted predictors plus the artifacts needed to encode
/// inputs and decode outputs: the feature-column schema and the tire label
/// encoder. Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct PitStopModel {
    schema: FeatureSchema,
    count_model: RandomForestClassifier,
    lap_model: RandomForestRegressor,
    tire_model: RandomForestClassifier,
    tire_encoder: LabelEncoder,
    training_rows: usize,
}

impl PitStopModel {
    /// Simulate labels for the entries and fit the three predictors.
    ///
    /// Label draws are unseeded, so the fitted bundle differs from run to
    /// run even though the fitting itself uses a fixed seed.
    pub fn train(entries: &[RaceEntry]) -> Result<Self, Box<dyn std::error::Error>> {
        if entries.is_empty() {
            return Err("cannot train on an empty set of race entries".into());
        }
        let labels = synthesize_labels(entries);
        Self::train_with_labels(entries, &labels)
    }

    /// Fit the three predictors against pre-synthesized labels. The same
    /// entries and labels always produce the same bundle.
    pub fn train_with_labels(
        entries: &[RaceEntry],
        labels: &[PitStopLabel],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if entries.is_empty() {
            return Err("cannot train on an empty set of race entries".into());
        }
        if entries.len() != labels.len() {
            return Err(format!(
                "entries ({}) and labels ({}) differ in length",
                entries.len(),
                labels.len()
            )
            .into());
        }

        let schema = FeatureSchema::fit(entries);
        let x: Vec<Vec<f64>> = entries.iter().map(|e| schema.encode_entry(e)).collect();

        let y_count: Vec<i64> = labels.iter().map(|l| l.stop_count as i64).collect();
        let y_lap: Vec<f64> = labels.iter().map(|l| l.pit_lap as f64).collect();

        let tire_encoder = LabelEncoder::fit(labels.iter().map(|l| l.next_tire));
        let mut y_tire = Vec::with_capacity(labels.len());
        for label in labels {
            let class = tire_encoder
                .transform(label.next_tire)
                .ok_or("tire label missing from the fitted encoder")?;
            y_tire.push(class as i64);
        }

        let config = ForestConfig::default();
        let count_model = RandomForestClassifier::fit(&x, &y_count, &config)?;
        let lap_model = RandomForestRegressor::fit(&x, &y_lap, &config)?;
        let tire_model = RandomForestClassifier::fit(&x, &y_tire, &config)?;

        info!(
            "Fitted pit stop models: {} rows, {} feature columns, {} tire classes",
            entries.len(),
            schema.n_features(),
            tire_encoder.len()
        );

        Ok(Self {
            schema,
            count_model,
            lap_model,
            tire_model,
            tire_encoder,
            training_rows: entries.len(),
        })
    }

    /// Run all three predictors for one request.
    ///
    /// Unknown circuit or country values encode as all-zero indicator
    /// blocks, so an unseen combination still yields a prediction. The lap
    /// output truncates the regressor mean to a whole lap.
    pub fn predict(&self, input: &RaceDescriptor) -> Result<Prediction, Box<dyn std::error::Error>> {
        let row = self.schema.encode(
            &input.circuit_name,
            &input.circuit_country,
            input.year,
            input.driver_id,
        );

        let pit_stop_count = self.count_model.predict(&row) as u32;
        let pit_stop_lap = self.lap_model.predict(&row) as u32;
        let tire_class = self.tire_model.predict(&row) as usize;
        let next_tire = self
            .tire_encoder
            .inverse_transform(tire_class)
            .ok_or("predicted tire class is outside the fitted vocabulary")?
            .to_string();

        Ok(Prediction {
            pit_stop_count,
            pit_stop_lap,
            next_tire,
        })
    }

    /// The feature schema fitted at training time.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Number of joined race entries the bundle was trained on.
    pub fn training_rows(&self) -> usize {
        self.training_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::labels::{synthesize_labels_with, ONE_STOP_TIRES, TWO_STOP_TIRES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(
        race_id: u32,
        driver_id: u32,
        circuit: &str,
        country: &str,
        year: i32,
        race_round: u32,
    ) -> RaceEntry {
        RaceEntry {
            race_id,
            driver_id,
            grid_position: 1,
            circuit_name: circuit.to_string(),
            circuit_country: country.to_string(),
            year,
            race_round,
        }
    }

    fn sample_entries() -> Vec<RaceEntry> {
        let circuits = [
            ("Monza", "Italy", 14u32),
            ("Silverstone", "UK", 9),
            ("Suzuka", "Japan", 17),
            ("Monaco", "Monaco", 6),
        ];
        let mut entries = Vec::new();
        for (i, (circuit, country, round)) in circuits.into_iter().enumerate() {
            for driver_id in [44, 16, 1, 81] {
                entries.push(entry(i as u32 + 1, driver_id, circuit, country, 2023, round));
            }
        }
        entries
    }

    #[test]
    fn test_single_row_training_predicts_its_own_label() {
        let entries = vec![entry(1, 44, "Monza", "Italy", 2023, 5)];
        let model = PitStopModel::train(&entries).unwrap();

        let prediction = model
            .predict(&RaceDescriptor {
                circuit_name: "Monza".to_string(),
                circuit_country: "Italy".to_string(),
                year: 2023,
                driver_id: 44,
            })
            .unwrap();

        assert_eq!(prediction.pit_stop_count, 1);
        assert!((15..26).contains(&prediction.pit_stop_lap));
        assert!(ONE_STOP_TIRES.contains(&prediction.next_tire.as_str()));
    }

    #[test]
    fn test_unseen_circuit_still_returns_a_valid_prediction() {
        let model = PitStopModel::train(&sample_entries()).unwrap();

        let prediction = model
            .predict(&RaceDescriptor {
                circuit_name: "Circuit of Nowhere".to_string(),
                circuit_country: "Atlantis".to_string(),
                year: 2031,
                driver_id: 999,
            })
            .unwrap();

        assert!(prediction.pit_stop_count == 1 || prediction.pit_stop_count == 2);
        assert!((10..26).contains(&prediction.pit_stop_lap));
        assert!(
            ONE_STOP_TIRES.contains(&prediction.next_tire.as_str())
                || TWO_STOP_TIRES.contains(&prediction.next_tire.as_str())
        );
    }

    #[test]
    fn test_identical_requests_get_identical_predictions() {
        let model = PitStopModel::train(&sample_entries()).unwrap();
        let input = RaceDescriptor {
            circuit_name: "Monza".to_string(),
            circuit_country: "Italy".to_string(),
            year: 2023,
            driver_id: 16,
        };

        let first = model.predict(&input).unwrap();
        let second = model.predict(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_training_is_reproducible_given_fixed_labels() {
        let entries = sample_entries();
        let mut rng = StdRng::seed_from_u64(4242);
        let labels = synthesize_labels_with(&entries, &mut rng);

        let a = PitStopModel::train_with_labels(&entries, &labels).unwrap();
        let b = PitStopModel::train_with_labels(&entries, &labels).unwrap();

        let input = RaceDescriptor {
            circuit_name: "Suzuka".to_string(),
            circuit_country: "Japan".to_string(),
            year: 2023,
            driver_id: 1,
        };
        assert_eq!(a.predict(&input).unwrap(), b.predict(&input).unwrap());
    }

    #[test]
    fn test_empty_training_set_is_rejected() {
        assert!(PitStopModel::train(&[]).is_err());
    }

    #[test]
    fn test_mismatched_labels_are_rejected() {
        let entries = sample_entries();
        let labels = synthesize_labels(&entries[..2]);
        assert!(PitStopModel::train_with_labels(&entries, &labels).is_err());
    }

    #[test]
    fn test_schema_travels_with_the_bundle() {
        let model = PitStopModel::train(&sample_entries()).unwrap();

        assert_eq!(model.schema().n_features(), 2 + 4 + 4);
        assert_eq!(model.training_rows(), 16);
    }
}
