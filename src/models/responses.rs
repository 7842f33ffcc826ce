use serde::{Deserialize, Serialize};

/// Which model slots were populated at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub eta: bool,
    pub demand: bool,
    #[serde(rename = "match")]
    pub match_model: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub models: ModelStatus,
}

/// Response for ETA calibration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaCalibrateResponse {
    #[serde(rename = "calibratedDuration")]
    pub calibrated_duration: f64,
}

/// Response for demand forecasts, one value per horizon step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandPredictResponse {
    pub demand: Vec<f64>,
}

/// Response for match scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScoreResponse {
    pub score: f64,
}

/// Response for fraud scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudScoreResponse {
    pub risk: f64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
