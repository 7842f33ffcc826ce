// Core scoring and training algorithms
pub mod demand;
pub mod eta;
pub mod fraud;
pub mod match_score;
pub mod model;
pub mod regression;
pub mod time;

pub use demand::{forecast_demand, BASELINE_DEMAND};
pub use eta::{calibrate_eta, fallback_calibration};
pub use fraud::{fraud_risk, FraudSignals};
pub use match_score::{fallback_match_score, score_match, MatchInputs};
pub use model::{ModelError, Prediction, PredictionSource, ProbabilisticClassifier, Regressor};
pub use regression::{fit_ols, LinearFit, RegressionError};
