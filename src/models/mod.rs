// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DemandArtifact, DemandEntry, DemandModel, EtaCalibrationModel, LogisticMatchModel, ETA_FEATURE_COUNT, MATCH_FEATURE_COUNT};
pub use requests::{DemandPredictRequest, EtaCalibrateRequest, FraudScoreRequest, MatchScoreRequest};
pub use responses::{
    DemandPredictResponse, ErrorResponse, EtaCalibrateResponse, FraudScoreResponse, HealthResponse, MatchScoreResponse,
    ModelStatus,
};
