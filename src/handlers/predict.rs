use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::debug;

use crate::error::{descriptor_from_form, AppError};
use crate::AppState;
use pitstop::models::{PredictForm, PredictionView};

/// Index view: nothing submitted yet, so no prediction is populated.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(PredictionView { prediction: None })
}

/// Predict pit-stop behavior for one submitted race/driver description.
pub async fn predict_pit_stops(
    state: web::Data<Arc<AppState>>,
    form: web::Form<PredictForm>,
) -> Result<HttpResponse, AppError> {
    let descriptor = descriptor_from_form(&form)?;
    debug!(
        "Predicting pit stops for {} ({}), year {}, driver {}",
        descriptor.circuit_name, descriptor.circuit_country, descriptor.year, descriptor.driver_id
    );

    let prediction = state
        .model
        .predict(&descriptor)
        .map_err(|e| AppError::PredictionError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(PredictionView {
        prediction: Some(prediction),
    }))
}
