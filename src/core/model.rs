use thiserror::Error;

/// Errors raised while invoking a loaded model
///
/// Handlers never surface these to callers; any variant selects the
/// deterministic fallback for the endpoint.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Model produced a non-finite value: {0}")]
    NonFinite(f64),

    #[error("Invalid model output: {0}")]
    Invalid(String),
}

/// Which path produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Model,
    Fallback,
}

/// A prediction together with the path that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<T> {
    pub value: T,
    pub source: PredictionSource,
}

impl<T> Prediction<T> {
    pub fn model(value: T) -> Self {
        Self { value, source: PredictionSource::Model }
    }

    pub fn fallback(value: T) -> Self {
        Self { value, source: PredictionSource::Fallback }
    }
}

/// A model mapping a feature vector to a single real value
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// A model mapping a feature vector to per-class probabilities
///
/// Index 1 of the returned vector is the positive class.
pub trait ProbabilisticClassifier: Send + Sync {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Reject feature vectors whose length does not match the model
#[inline]
pub fn check_feature_count(features: &[f64], expected: usize) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Pass finite values through, turn NaN and infinities into errors
#[inline]
pub fn ensure_finite(value: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite(value))
    }
}
