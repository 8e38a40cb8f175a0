//! HTTP request handlers

pub mod health;
pub mod predict;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::AppState;
    use pitstop::data::csv_loader::RaceEntry;
    use pitstop::predictor::PitStopModel;

    /// A small trained state for handler tests: three circuits spanning both
    /// stop-count strategies.
    pub fn test_state() -> Arc<AppState> {
        let circuits = [
            ("Monza", "Italy", 14u32),
            ("Silverstone", "UK", 9),
            ("Monaco", "Monaco", 6),
        ];
        let mut entries = Vec::new();
        for (i, (circuit, country, round)) in circuits.into_iter().enumerate() {
            for driver_id in [44u32, 16, 81] {
                entries.push(RaceEntry {
                    race_id: i as u32 + 1,
                    driver_id,
                    grid_position: 1,
                    circuit_name: circuit.to_string(),
                    circuit_country: country.to_string(),
                    year: 2023,
                    race_round: round,
                });
            }
        }

        let model = PitStopModel::train(&entries).expect("training on sample entries");
        Arc::new(AppState { model })
    }
}
