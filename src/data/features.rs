//! Feature encoding against the training-time column schema

use crate::data::csv_loader::RaceEntry;

/// The feature-column schema fitted over the training set.
///
/// Column order is authoritative and fixed at fit time: the two numeric
/// descriptors first (`year`, `driverId`), then one indicator column per
/// observed circuit name, then one per observed circuit country, with
/// categories sorted inside each block. Every inference input is
/// re-expressed against exactly this layout; values never observed at fit
/// time contribute all-zero indicator blocks rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    circuit_names: Vec<String>,
    countries: Vec<String>,
}

impl FeatureSchema {
    /// Fit the schema on the training entries.
    pub fn fit(entries: &[RaceEntry]) -> Self {
        let mut circuit_names: Vec<String> =
            entries.iter().map(|e| e.circuit_name.clone()).collect();
        circuit_names.sort();
        circuit_names.dedup();

        let mut countries: Vec<String> =
            entries.iter().map(|e| e.circuit_country.clone()).collect();
        countries.sort();
        countries.dedup();

        Self {
            circuit_names,
            countries,
        }
    }

    /// Total number of feature columns.
    pub fn n_features(&self) -> usize {
        2 + self.circuit_names.len() + self.countries.len()
    }

    /// Column names in authoritative order.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.n_features());
        names.push("year".to_string());
        names.push("driverId".to_string());
        for name in &self.circuit_names {
            names.push(format!("circuit_name_{name}"));
        }
        for country in &self.countries {
            names.push(format!("circuit_country_{country}"));
        }
        names
    }

    /// Encode one input as a feature row aligned to the schema.
    pub fn encode(
        &self,
        circuit_name: &str,
        circuit_country: &str,
        year: i32,
        driver_id: u32,
    ) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.n_features());
        row.push(year as f64);
        row.push(driver_id as f64);
        for name in &self.circuit_names {
            row.push(if name.as_str() == circuit_name { 1.0 } else { 0.0 });
        }
        for country in &self.countries {
            row.push(if country.as_str() == circuit_country { 1.0 } else { 0.0 });
        }
        row
    }

    /// Encode a training entry.
    pub fn encode_entry(&self, entry: &RaceEntry) -> Vec<f64> {
        self.encode(
            &entry.circuit_name,
            &entry.circuit_country,
            entry.year,
            entry.driver_id,
        )
    }
}
