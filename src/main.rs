use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod handlers;

use handlers::{health, predict};
use pitstop::data::csv_loader::load_race_entries;
use pitstop::predictor::PitStopModel;

/// Training inputs live at fixed paths relative to the working directory.
const DRIVER_GRID_CSV: &str = "data/driverGrid.csv";
const CIRCUITS_CSV: &str = "data/circuits.csv";

/// Application state shared across handlers. The model is trained once at
/// startup and never mutated afterwards.
pub struct AppState {
    pub model: PitStopModel,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    info!(
        "Training pit stop models from {} and {}",
        DRIVER_GRID_CSV, CIRCUITS_CSV
    );
    let model = match train_startup_model() {
        Ok(model) => model,
        Err(e) => {
            error!("Startup training failed: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Models ready: {} race entries, {} feature columns",
        model.training_rows(),
        model.schema().n_features()
    );

    let app_state = Arc::new(AppState { model });

    info!("Starting pit stop API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/", web::get().to(predict::index))
            .route("/", web::post().to(predict::predict_pit_stops))
            .route("/health", web::get().to(health::health_check))
    })
    .bind(&addr)?
    .run()
    .await
}

/// One-shot startup training: load, join, simulate labels, fit. Any failure
/// here is fatal since there is nothing to serve without a trained bundle.
fn train_startup_model() -> Result<PitStopModel, Box<dyn std::error::Error>> {
    let entries = load_race_entries(DRIVER_GRID_CSV, CIRCUITS_CSV)?;
    info!("Loaded {} joined race entries", entries.len());
    let model = PitStopModel::train(&entries)?;
    Ok(model)
}
