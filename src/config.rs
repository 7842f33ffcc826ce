use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

/// Artifact locations for the three model slots
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_eta_path")]
    pub eta_path: PathBuf,
    #[serde(default = "default_demand_path")]
    pub demand_path: PathBuf,
    #[serde(default = "default_match_path")]
    pub match_path: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            eta_path: default_eta_path(),
            demand_path: default_demand_path(),
            match_path: default_match_path(),
        }
    }
}

fn default_eta_path() -> PathBuf { PathBuf::from("/models/eta_calibration.json") }
fn default_demand_path() -> PathBuf { PathBuf::from("/models/demand_forecast.json") }
fn default_match_path() -> PathBuf { PathBuf::from("/models/match_model.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Plain environment variables naming artifact locations, and the config key
/// each one overrides
const MODEL_PATH_VARS: &[(&str, &str)] = &[
    ("ETA_MODEL_PATH", "models.eta_path"),
    ("DEMAND_MODEL_PATH", "models.demand_path"),
    ("MATCH_MODEL_PATH", "models.match_path"),
];

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables prefixed with INFERENCE__,
    ///    e.g. INFERENCE__SERVER__PORT -> server.port
    /// 4. ETA_MODEL_PATH, DEMAND_MODEL_PATH and MATCH_MODEL_PATH
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        let settings = apply_model_path_overrides(settings, |var| std::env::var(var).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings = apply_model_path_overrides(settings, |var| std::env::var(var).ok())?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INFERENCE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the unprefixed model path variables on top of the loaded config
fn apply_model_path_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in MODEL_PATH_VARS {
        if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}
