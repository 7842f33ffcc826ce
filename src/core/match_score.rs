use crate::core::model::{ModelError, Prediction, ProbabilisticClassifier};

pub const DEFAULT_CAPTAIN_RATING: f64 = 4.5;
pub const DEFAULT_USER_RATING: f64 = 4.5;
pub const DEFAULT_CANCELLATION_RATE: f64 = 0.05;

/// Distance fed to the classifier when the request omits it
pub const MODEL_DEFAULT_DISTANCE_M: f64 = 0.0;

/// Distance assumed by the heuristic when the request omits it
pub const FALLBACK_DEFAULT_DISTANCE_M: f64 = 1000.0;

/// Raw match inputs as received from the caller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchInputs {
    pub eta_sec: f64,
    pub distance_m: Option<f64>,
    pub captain_rating: Option<f64>,
    pub user_rating: Option<f64>,
    pub cancellation_rate: Option<f64>,
}

impl MatchInputs {
    /// Classifier feature vector
    /// `[eta, distance, captain_rating, user_rating, cancellation_rate]`
    pub fn features(&self) -> [f64; 5] {
        [
            self.eta_sec,
            self.distance_m.unwrap_or(MODEL_DEFAULT_DISTANCE_M),
            self.captain_rating.unwrap_or(DEFAULT_CAPTAIN_RATING),
            self.user_rating.unwrap_or(DEFAULT_USER_RATING),
            self.cancellation_rate.unwrap_or(DEFAULT_CANCELLATION_RATE),
        ]
    }
}

/// Closed-form heuristic favouring nearby captains with few cancellations
///
/// score = clamp01(1 / (1 + eta/600 + distance/5000 + 5 * cancellation_rate))
#[inline]
pub fn fallback_match_score(inputs: &MatchInputs) -> f64 {
    let eta = inputs.eta_sec.max(1.0);
    let distance = inputs
        .distance_m
        .unwrap_or(FALLBACK_DEFAULT_DISTANCE_M)
        .max(1.0);
    let cancellation_rate = inputs
        .cancellation_rate
        .unwrap_or(DEFAULT_CANCELLATION_RATE);

    let score = 1.0 / (1.0 + eta / 600.0 + distance / 5000.0 + 5.0 * cancellation_rate);
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Score a captain/rider pairing, preferring the trained classifier
pub fn score_match(model: Option<&dyn ProbabilisticClassifier>, inputs: &MatchInputs) -> Prediction<f64> {
    if let Some(model) = model {
        match positive_probability(model, inputs) {
            Ok(score) => return Prediction::model(score),
            Err(e) => {
                tracing::warn!("Match model failed, using heuristic score: {}", e);
            }
        }
    }

    Prediction::fallback(fallback_match_score(inputs))
}

fn positive_probability(model: &dyn ProbabilisticClassifier, inputs: &MatchInputs) -> Result<f64, ModelError> {
    let proba = model.predict_proba(&inputs.features())?;
    let positive = *proba
        .get(1)
        .ok_or_else(|| ModelError::Invalid(format!("expected 2 class probabilities, got {}", proba.len())))?;

    if !(0.0..=1.0).contains(&positive) {
        return Err(ModelError::Invalid(format!("probability {} outside [0, 1]", positive)));
    }
    Ok(positive)
}
