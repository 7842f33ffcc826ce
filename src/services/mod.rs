// Service exports
pub mod registry;
pub mod store;

pub use registry::ModelRegistry;
pub use store::{Artifact, ArtifactStore, StoreError, ARTIFACT_VERSION};
