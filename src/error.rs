use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use pitstop::models::{ErrorResponse, PredictForm, RaceDescriptor};

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Invalid request data
    ValidationError(String),
    /// Model inference failure
    PredictionError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::PredictionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::ValidationError(msg) => ("validation_error", msg.clone()),
            AppError::PredictionError(msg) => ("prediction_error", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error_code.to_string(),
            message,
        })
    }
}

/// Validation functions
pub fn require_field<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::ValidationError(format!(
            "Missing field '{}'",
            name
        ))),
    }
}

pub fn parse_year(raw: &str) -> Result<i32, AppError> {
    raw.parse().map_err(|_| {
        AppError::ValidationError(format!("Field 'year' must be an integer, got '{}'", raw))
    })
}

pub fn parse_driver_id(raw: &str) -> Result<u32, AppError> {
    raw.parse().map_err(|_| {
        AppError::ValidationError(format!(
            "Field 'driverId' must be a non-negative integer, got '{}'",
            raw
        ))
    })
}

/// Validate a raw form submission into an inference descriptor.
pub fn descriptor_from_form(form: &PredictForm) -> Result<RaceDescriptor, AppError> {
    let circuit = require_field("circuit", &form.circuit)?;
    let country = require_field("country", &form.country)?;
    let year = parse_year(require_field("year", &form.year)?)?;
    let driver_id = parse_driver_id(require_field("driverId", &form.driver_id)?)?;

    Ok(RaceDescriptor {
        circuit_name: circuit.to_string(),
        circuit_country: country.to_string(),
        year,
        driver_id,
    })
}
