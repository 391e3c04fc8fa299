//! # configs
//!
//! Layered settings for the incident core.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults (the field app's thresholds and weights)
//! 2. `config/incidents.{toml,yaml,json}` if present
//! 3. `INCIDENTS__*` environment variables, `__` separating nested keys
//!    (e.g. `INCIDENTS__VERIFICATION__VERIFY_THRESHOLD=4`), with `.env` loaded first

use config::{Config, Environment, File, FileFormat};
use domains::models::{CatalogPolicy, ClusterPolicy, HeatmapPolicy, VerificationPolicy};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "config/incidents";
const ENV_PREFIX: &str = "INCIDENTS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub verification: VerificationPolicy,
    pub clustering: ClusterPolicy,
    pub heatmap: HeatmapPolicy,
    pub catalog: CatalogPolicy,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads `.env`, the default config file (optional) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Same as [`Settings::load`] with a custom config file stem or path.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings: Settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("catalog.categories"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Parses inline TOML on top of the defaults (no env, no files).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, reason: &str| ConfigError::Invalid {
            key,
            reason: reason.to_string(),
        };

        if self.verification.verify_threshold == 0 {
            return Err(invalid("verification.verify_threshold", "must be at least 1"));
        }
        if self.verification.flag_threshold == 0 {
            return Err(invalid("verification.flag_threshold", "must be at least 1"));
        }
        if !(self.clustering.cluster_radius_px.is_finite() && self.clustering.cluster_radius_px > 0.0) {
            return Err(invalid("clustering.cluster_radius_px", "must be a positive number"));
        }
        if self.clustering.max_zoom > 30 {
            return Err(invalid("clustering.max_zoom", "must be 30 or less"));
        }
        let weight = self.heatmap.base_weight;
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(invalid("heatmap.base_weight", "must be in (0, 1]"));
        }
        if !(self.heatmap.step.is_finite() && self.heatmap.step >= 0.0) {
            return Err(invalid("heatmap.step", "must be zero or positive"));
        }
        if self.catalog.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(invalid("catalog.categories", "entries must not be blank"));
        }
        Ok(())
    }
}
