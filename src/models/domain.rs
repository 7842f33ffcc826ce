use crate::core::model::{check_feature_count, ensure_finite, ModelError, ProbabilisticClassifier, Regressor};
use crate::core::time::HOURS_PER_WEEK;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of features consumed by the ETA calibration model
pub const ETA_FEATURE_COUNT: usize = 3;

/// Number of features consumed by the match classifier
pub const MATCH_FEATURE_COUNT: usize = 5;

/// Mean trip count for one (zone, hour-of-week) bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandEntry {
    pub zone_id: String,
    pub hour_of_week: u16,
    pub mean_trips: f64,
    #[serde(default)]
    pub observations: u64,
}

/// Demand forecast artifact: average trips per (zone, hour-of-week)
///
/// Serialized as a flat list of entries; held in memory as zone -> bucket maps
/// so lookups borrow the zone id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DemandArtifact", into = "DemandArtifact")]
pub struct DemandModel {
    zones: HashMap<String, HashMap<u16, DemandEntry>>,
}

/// On-disk layout of [`DemandModel`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandArtifact {
    pub entries: Vec<DemandEntry>,
}

impl DemandModel {
    pub fn from_entries(entries: Vec<DemandEntry>) -> Result<Self, String> {
        let mut zones: HashMap<String, HashMap<u16, DemandEntry>> = HashMap::new();
        for entry in entries {
            if entry.hour_of_week >= HOURS_PER_WEEK {
                return Err(format!(
                    "hour_of_week {} out of range for zone {}",
                    entry.hour_of_week, entry.zone_id
                ));
            }
            if !entry.mean_trips.is_finite() || entry.mean_trips < 0.0 {
                return Err(format!(
                    "mean_trips {} invalid for zone {} bucket {}",
                    entry.mean_trips, entry.zone_id, entry.hour_of_week
                ));
            }
            let buckets = zones.entry(entry.zone_id.clone()).or_default();
            if buckets.insert(entry.hour_of_week, entry).is_some() {
                return Err("duplicate (zone_id, hour_of_week) entry".to_string());
            }
        }
        Ok(Self { zones })
    }

    /// Stored mean for a bucket, if any observations existed
    pub fn get(&self, zone_id: &str, hour_of_week: u16) -> Option<f64> {
        self.zones
            .get(zone_id)
            .and_then(|buckets| buckets.get(&hour_of_week))
            .map(|entry| entry.mean_trips)
    }

    /// Number of populated buckets across all zones
    pub fn len(&self) -> usize {
        self.zones.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Entries sorted by zone then bucket
    pub fn entries(&self) -> Vec<DemandEntry> {
        let mut entries: Vec<DemandEntry> = self
            .zones
            .values()
            .flat_map(|buckets| buckets.values().cloned())
            .collect();
        entries.sort_by(|a, b| {
            a.zone_id
                .cmp(&b.zone_id)
                .then(a.hour_of_week.cmp(&b.hour_of_week))
        });
        entries
    }
}

impl TryFrom<DemandArtifact> for DemandModel {
    type Error = String;

    fn try_from(artifact: DemandArtifact) -> Result<Self, Self::Error> {
        DemandModel::from_entries(artifact.entries)
    }
}

impl From<DemandModel> for DemandArtifact {
    fn from(model: DemandModel) -> Self {
        DemandArtifact {
            entries: model.entries(),
        }
    }
}

/// ETA calibration artifact: linear function of
/// `[osrm_duration, hour_of_day, day_of_week]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtaCalibrationModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub n_samples: usize,
    #[serde(default)]
    pub r_squared: f64,
}

impl EtaCalibrationModel {
    /// Check the artifact is usable before installing it in a model slot
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != ETA_FEATURE_COUNT {
            return Err(format!(
                "expected {} coefficients, got {}",
                ETA_FEATURE_COUNT,
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("non-finite coefficient".to_string());
        }
        Ok(())
    }
}

impl Regressor for EtaCalibrationModel {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_feature_count(features, self.coefficients.len())?;
        let value = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>();
        ensure_finite(value)
    }
}

/// Match classifier artifact: logistic model over
/// `[eta_sec, distance_m, captain_rating, user_rating, cancellation_rate]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticMatchModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticMatchModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.weights.len() != MATCH_FEATURE_COUNT {
            return Err(format!(
                "expected {} weights, got {}",
                MATCH_FEATURE_COUNT,
                self.weights.len()
            ));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err("non-finite weight".to_string());
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for LogisticMatchModel {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_feature_count(features, self.weights.len())?;
        let logit = self.intercept
            + self
                .weights
                .iter()
                .zip(features.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let logit = ensure_finite(logit)?;
        let positive = 1.0 / (1.0 + (-logit).exp());
        Ok(vec![1.0 - positive, positive])
    }
}
