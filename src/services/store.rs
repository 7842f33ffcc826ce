use crate::models::{DemandModel, EtaCalibrationModel, LogisticMatchModel};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Envelope format version written by this build
pub const ARTIFACT_VERSION: u32 = 1;

/// Errors that can occur loading or saving artifacts
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a {expected} artifact, found {found}")]
    KindMismatch { expected: String, found: String },

    #[error("Unsupported artifact version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// A model type that can be persisted in the artifact store
pub trait Artifact: Serialize + DeserializeOwned {
    /// Tag written to the envelope so artifacts cannot be loaded into the wrong slot
    const KIND: &'static str;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Artifact for EtaCalibrationModel {
    const KIND: &'static str = "eta_calibration";

    fn validate(&self) -> Result<(), String> {
        EtaCalibrationModel::validate(self)
    }
}

impl Artifact for DemandModel {
    // Bucket ranges are enforced while deserializing
    const KIND: &'static str = "demand_forecast";
}

impl Artifact for LogisticMatchModel {
    const KIND: &'static str = "match_classifier";

    fn validate(&self) -> Result<(), String> {
        LogisticMatchModel::validate(self)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, A> {
    kind: &'a str,
    version: u32,
    created_at: chrono::DateTime<chrono::Utc>,
    model: &'a A,
}

#[derive(Deserialize)]
struct Envelope<A> {
    model: A,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    kind: String,
    version: u32,
}

/// File-backed artifact store
///
/// Artifacts are JSON documents wrapped in an envelope carrying the model
/// kind and format version:
///
/// ```json
/// { "kind": "demand_forecast", "version": 1, "created_at": "...", "model": { ... } }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactStore;

impl ArtifactStore {
    /// Load and validate an artifact
    pub fn load<A: Artifact>(path: &Path) -> Result<A, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Check the header first so a wrong kind isn't reported as a schema error
        let header: EnvelopeHeader = serde_json::from_slice(&bytes)?;
        check_header(&header.kind, header.version, A::KIND)?;

        let envelope: Envelope<A> = serde_json::from_slice(&bytes)?;
        envelope.model.validate().map_err(StoreError::Invalid)?;

        Ok(envelope.model)
    }

    /// Save an artifact, replacing any existing file at `path`
    ///
    /// The document is written to a sibling temporary file and renamed into
    /// place so readers never observe a partial artifact.
    pub fn save<A: Artifact>(path: &Path, model: &A) -> Result<(), StoreError> {
        model.validate().map_err(StoreError::Invalid)?;

        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp_path = temporary_path(path);
        let file = File::create(&tmp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        let envelope = EnvelopeRef {
            kind: A::KIND,
            version: ARTIFACT_VERSION,
            created_at: chrono::Utc::now(),
            model,
        };
        serde_json::to_writer_pretty(&mut writer, &envelope)?;
        writer.flush().map_err(io_err)?;
        drop(writer);

        fs::rename(&tmp_path, path).map_err(io_err)?;
        Ok(())
    }
}

fn check_header(kind: &str, version: u32, expected: &str) -> Result<(), StoreError> {
    if kind != expected {
        return Err(StoreError::KindMismatch {
            expected: expected.to_string(),
            found: kind.to_string(),
        });
    }
    if version != ARTIFACT_VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
