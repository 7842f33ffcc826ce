use crate::core::model::Prediction;
use crate::core::time::hour_of_week;
use crate::models::DemandModel;
use chrono::{DateTime, Utc};

/// Trips reported for buckets with no history, and for every step when no
/// demand model is loaded
pub const BASELINE_DEMAND: f64 = 10.0;

/// Forecast `horizon` hourly demand values for a zone
///
/// Every step looks up the bucket for `now`; the horizon does not advance the
/// clock, so all values come from the same hour-of-week bucket.
pub fn forecast_demand(
    model: Option<&DemandModel>,
    zone_id: &str,
    horizon: usize,
    now: DateTime<Utc>,
) -> Prediction<Vec<f64>> {
    match model {
        Some(model) => {
            let value = model
                .get(zone_id, hour_of_week(&now))
                .unwrap_or(BASELINE_DEMAND);
            Prediction::model(vec![value; horizon])
        }
        None => Prediction::fallback(vec![BASELINE_DEMAND; horizon]),
    }
}
