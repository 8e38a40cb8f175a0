use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::AppState;
use pitstop::models::HealthResponse;

/// Health check endpoint
pub async fn health_check(state: web::Data<Arc<AppState>>) -> impl Responder {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        training_rows: state.model.training_rows(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::handlers::test_support::test_state;

    #[actix_web::test]
    async fn test_health_reports_training_rows() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let response: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.training_rows, 9);
    }
}
