use crate::core::model::{ModelError, Prediction, Regressor};

/// Hours of day treated as morning/evening rush
pub const RUSH_HOURS: [i32; 4] = [8, 9, 18, 19];

/// Multiplier applied to rush-hour durations when no model is available
pub const RUSH_HOUR_FACTOR: f64 = 1.15;

/// Hour of day fed to the model when the request omits it
pub const DEFAULT_HOUR: i32 = 12;

/// Day of week fed to the model when the request omits it
pub const DEFAULT_DOW: i32 = 3;

/// Build the model feature vector `[osrm_duration, hour, dow]`
#[inline]
pub fn eta_features(osrm_duration: f64, hour: Option<i32>, dow: Option<i32>) -> [f64; 3] {
    [
        osrm_duration,
        hour.unwrap_or(DEFAULT_HOUR) as f64,
        dow.unwrap_or(DEFAULT_DOW) as f64,
    ]
}

/// Rule-based calibration: rush hours run 15% slower, everything else as-is
///
/// A missing hour is never treated as rush hour, even though the model path
/// substitutes noon for it.
#[inline]
pub fn fallback_calibration(osrm_duration: f64, hour: Option<i32>) -> f64 {
    let factor = match hour {
        Some(h) if RUSH_HOURS.contains(&h) => RUSH_HOUR_FACTOR,
        _ => 1.0,
    };
    osrm_duration * factor
}

/// Calibrate a raw routing duration, preferring the trained model
pub fn calibrate_eta(
    model: Option<&dyn Regressor>,
    osrm_duration: f64,
    hour: Option<i32>,
    dow: Option<i32>,
) -> Prediction<f64> {
    if let Some(model) = model {
        match model_calibration(model, osrm_duration, hour, dow) {
            Ok(value) => return Prediction::model(value),
            Err(e) => {
                tracing::warn!("ETA model failed, using rush-hour fallback: {}", e);
            }
        }
    }

    Prediction::fallback(fallback_calibration(osrm_duration, hour))
}

fn model_calibration(
    model: &dyn Regressor,
    osrm_duration: f64,
    hour: Option<i32>,
    dow: Option<i32>,
) -> Result<f64, ModelError> {
    model.predict(&eta_features(osrm_duration, hour, dow))
}
