// Route exports
pub mod inference;

use crate::models::ErrorResponse;
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use thiserror::Error;

pub use inference::AppState;

/// Request rejections surfaced to callers as 400 responses
///
/// Model failures never appear here; they are absorbed by the fallbacks.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::Validation(_) => "Validation failed",
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Map body extraction failures (malformed JSON, missing fields, wrong types)
/// onto [`ApiError::InvalidJson`]
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected payload on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Register inference routes at the service root
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(inference::configure);
}

/// Register shared state, payload error handling and routes
///
/// Used by the server binary and by integration tests so both run the same
/// application wiring.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .configure(configure_routes);
    }
}
