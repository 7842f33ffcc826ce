use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{calibrate_eta, forecast_demand, fraud_risk, score_match, FraudSignals, MatchInputs, PredictionSource};
use crate::models::{
    DemandPredictRequest, DemandPredictResponse, EtaCalibrateRequest, EtaCalibrateResponse,
    FraudScoreRequest, FraudScoreResponse, HealthResponse, MatchScoreRequest, MatchScoreResponse,
};
use crate::routes::ApiError;
use crate::services::ModelRegistry;
use std::sync::Arc;

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "ml-inference";

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Configure all inference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/eta/calibrate", web::post().to(eta_calibrate))
        .route("/demand/predict", web::post().to(demand_predict))
        .route("/match/score", web::post().to(match_score))
        .route("/fraud/score", web::post().to(fraud_score));
}

fn validate<T: Validate>(endpoint: &str, req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|errors| {
        tracing::info!("Validation failed for {} request: field_errors={:?}", endpoint, errors);
        ApiError::from(errors)
    })
}

/// Health check endpoint
///
/// Reports which model slots were populated at startup.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        models: state.registry.status(),
    })
}

/// ETA calibration endpoint
///
/// POST /eta/calibrate
///
/// Request body:
/// ```json
/// { "osrmDuration": 600.0, "hour": 8, "dow": 1 }
/// ```
async fn eta_calibrate(
    state: web::Data<AppState>,
    req: web::Json<EtaCalibrateRequest>,
) -> Result<HttpResponse, ApiError> {
    validate("eta_calibrate", &*req)?;

    let prediction = calibrate_eta(state.registry.eta(), req.osrm_duration, req.hour, req.dow);

    tracing::debug!(
        "Calibrated ETA {} -> {} via {:?}",
        req.osrm_duration,
        prediction.value,
        prediction.source
    );

    Ok(HttpResponse::Ok().json(EtaCalibrateResponse {
        calibrated_duration: prediction.value,
    }))
}

/// Demand forecast endpoint
///
/// POST /demand/predict
///
/// Request body:
/// ```json
/// { "zoneId": "downtown", "ts": "2024-01-01T08:00:00Z", "horizon": 3 }
/// ```
///
/// `ts` is accepted but forecasts are always anchored at the processing time.
async fn demand_predict(
    state: web::Data<AppState>,
    req: web::Json<DemandPredictRequest>,
) -> Result<HttpResponse, ApiError> {
    validate("demand_predict", &*req)?;

    if let Some(ts) = &req.ts {
        tracing::debug!("Ignoring client timestamp {} for zone {}", ts, req.zone_id);
    }

    // Range validation guarantees 0 <= horizon <= 8760
    let horizon = req.horizon.max(0) as usize;
    let prediction = forecast_demand(state.registry.demand(), &req.zone_id, horizon, chrono::Utc::now());

    if prediction.source == PredictionSource::Fallback {
        tracing::debug!("No demand model loaded, returning baseline for zone {}", req.zone_id);
    }

    Ok(HttpResponse::Ok().json(DemandPredictResponse {
        demand: prediction.value,
    }))
}

/// Match scoring endpoint
///
/// POST /match/score
///
/// Request body:
/// ```json
/// { "etaSec": 300, "distanceM": 2000, "captainRating": 4.8, "userRating": 4.6, "cancellationRate": 0.1 }
/// ```
async fn match_score(
    state: web::Data<AppState>,
    req: web::Json<MatchScoreRequest>,
) -> Result<HttpResponse, ApiError> {
    validate("match_score", &*req)?;

    let inputs = MatchInputs::from(&*req);
    let prediction = score_match(state.registry.match_model(), &inputs);

    tracing::debug!("Match score {} via {:?}", prediction.value, prediction.source);

    Ok(HttpResponse::Ok().json(MatchScoreResponse {
        score: prediction.value,
    }))
}

/// Fraud scoring endpoint
///
/// POST /fraud/score
///
/// Request body:
/// ```json
/// { "userTrips": 12, "chargebacks": 0, "deviceChangesLast7d": 1, "paymentFailuresLast7d": 0 }
/// ```
async fn fraud_score(req: web::Json<FraudScoreRequest>) -> Result<HttpResponse, ApiError> {
    validate("fraud_score", &*req)?;

    let risk = fraud_risk(&FraudSignals::from(&*req));

    Ok(HttpResponse::Ok().json(FraudScoreResponse { risk }))
}
