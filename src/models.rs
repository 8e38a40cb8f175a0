use serde::{Deserialize, Serialize};

/// Raw form submission for a prediction. Fields arrive as text and are
/// validated before use so a bad submission surfaces as a client error
/// rather than a failed extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub circuit: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default, rename = "driverId")]
    pub driver_id: Option<String>,
}

/// Validated race/driver description used for inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDescriptor {
    pub circuit_name: String,
    pub circuit_country: String,
    pub year: i32,
    pub driver_id: u32,
}

/// One pit-stop prediction, keyed the way the result view displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "Pit Stop Count")]
    pub pit_stop_count: u32,
    #[serde(rename = "Pit Stop Lap")]
    pub pit_stop_lap: u32,
    #[serde(rename = "Next Tire")]
    pub next_tire: String,
}

/// Index/result view model: `prediction` stays empty until a form has been
/// submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionView {
    pub prediction: Option<Prediction>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub training_rows: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
