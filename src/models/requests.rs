use crate::core::{FraudSignals, MatchInputs};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to calibrate a routing-engine duration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EtaCalibrateRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "osrm_duration", rename = "osrmDuration")]
    pub osrm_duration: f64,
    #[validate(range(min = 0, max = 23))]
    #[serde(default)]
    pub hour: Option<i32>,
    #[validate(range(min = 0, max = 6))]
    #[serde(default)]
    pub dow: Option<i32>,
}

/// Request to forecast demand for a zone
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DemandPredictRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "zone_id", rename = "zoneId")]
    pub zone_id: String,
    /// Accepted for compatibility; forecasts always use the processing time
    #[serde(default)]
    pub ts: Option<String>,
    /// Hourly steps, capped at one year
    #[validate(range(min = 0, max = 8760))]
    #[serde(default = "default_horizon")]
    pub horizon: i64,
}

fn default_horizon() -> i64 {
    1
}

/// Request to score a captain/rider match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchScoreRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "eta_sec", rename = "etaSec")]
    pub eta_sec: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "distance_m", rename = "distanceM", default)]
    pub distance_m: Option<f64>,
    #[serde(alias = "captain_rating", rename = "captainRating", default)]
    pub captain_rating: Option<f64>,
    #[serde(alias = "user_rating", rename = "userRating", default)]
    pub user_rating: Option<f64>,
    /// Fraction of accepted trips the captain cancelled
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "cancellation_rate", rename = "cancellationRate", default)]
    pub cancellation_rate: Option<f64>,
}

impl From<&MatchScoreRequest> for MatchInputs {
    fn from(req: &MatchScoreRequest) -> Self {
        MatchInputs {
            eta_sec: req.eta_sec,
            distance_m: req.distance_m,
            captain_rating: req.captain_rating,
            user_rating: req.user_rating,
            cancellation_rate: req.cancellation_rate,
        }
    }
}

/// Request to score fraud risk for an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FraudScoreRequest {
    #[validate(range(min = 0))]
    #[serde(alias = "user_trips", rename = "userTrips")]
    pub user_trips: i64,
    #[validate(range(min = 0))]
    pub chargebacks: i64,
    #[validate(range(min = 0))]
    #[serde(alias = "device_changes_last_7d", rename = "deviceChangesLast7d")]
    pub device_changes_last_7d: i64,
    #[validate(range(min = 0))]
    #[serde(alias = "payment_failures_last_7d", rename = "paymentFailuresLast7d")]
    pub payment_failures_last_7d: i64,
}

impl From<&FraudScoreRequest> for FraudSignals {
    fn from(req: &FraudScoreRequest) -> Self {
        FraudSignals {
            user_trips: req.user_trips,
            chargebacks: req.chargebacks,
            device_changes_last_7d: req.device_changes_last_7d,
            payment_failures_last_7d: req.payment_failures_last_7d,
        }
    }
}
