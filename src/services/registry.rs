use crate::config::ModelSettings;
use crate::core::{ProbabilisticClassifier, Regressor};
use crate::models::{DemandModel, EtaCalibrationModel, LogisticMatchModel, ModelStatus};
use crate::services::store::{Artifact, ArtifactStore, StoreError};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Models available to request handlers
///
/// Built once at startup and shared read-only across workers. A slot is
/// `None` when its artifact was missing or unusable; handlers then take the
/// fallback path.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    eta: Option<Arc<dyn Regressor>>,
    demand: Option<Arc<DemandModel>>,
    match_model: Option<Arc<dyn ProbabilisticClassifier>>,
}

impl ModelRegistry {
    /// Registry with every slot empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load all configured artifacts
    ///
    /// Never fails: any artifact that cannot be loaded leaves its slot empty.
    pub fn load(settings: &ModelSettings) -> Self {
        let mut registry = Self::empty();

        if let Some(model) = load_slot::<EtaCalibrationModel>("eta", &settings.eta_path) {
            registry = registry.with_eta(model);
        }
        if let Some(model) = load_slot::<DemandModel>("demand", &settings.demand_path) {
            registry = registry.with_demand(model);
        }
        if let Some(model) = load_slot::<LogisticMatchModel>("match", &settings.match_path) {
            registry = registry.with_match_model(model);
        }

        registry
    }

    pub fn with_eta<R: Regressor + 'static>(mut self, model: R) -> Self {
        self.eta = Some(Arc::new(model));
        self
    }

    pub fn with_demand(mut self, model: DemandModel) -> Self {
        self.demand = Some(Arc::new(model));
        self
    }

    pub fn with_match_model<C: ProbabilisticClassifier + 'static>(mut self, model: C) -> Self {
        self.match_model = Some(Arc::new(model));
        self
    }

    pub fn eta(&self) -> Option<&dyn Regressor> {
        self.eta.as_deref()
    }

    pub fn demand(&self) -> Option<&DemandModel> {
        self.demand.as_deref()
    }

    pub fn match_model(&self) -> Option<&dyn ProbabilisticClassifier> {
        self.match_model.as_deref()
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            eta: self.eta.is_some(),
            demand: self.demand.is_some(),
            match_model: self.match_model.is_some(),
        }
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("status", &self.status())
            .finish()
    }
}

fn load_slot<A: Artifact>(slot: &str, path: &Path) -> Option<A> {
    match ArtifactStore::load::<A>(path) {
        Ok(model) => {
            tracing::info!("Loaded {} model from {}", slot, path.display());
            Some(model)
        }
        Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("No {} model at {}, serving fallback", slot, path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to load {} model from {}, serving fallback: {}", slot, path.display(), e);
            None
        }
    }
}
