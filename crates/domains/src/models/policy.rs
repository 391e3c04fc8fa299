//! # Policies
//!
//! Tunable knobs for the core components. Defaults match the behaviour of the
//! field reporting app; `configs` layers file/env overrides on top.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, Result};
use crate::models::IncidentKind;

/// Thresholds for the verification state machine and contributor rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationPolicy {
    /// True verifications needed to lock an incident as `Verified`.
    pub verify_threshold: u32,
    /// False verifications (flags) needed to lock an incident as `Unverified`.
    pub flag_threshold: u32,
    /// Points credited to the acting contributor per true verification.
    pub points_per_verification: u64,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            verify_threshold: 3,
            flag_threshold: 2,
            points_per_verification: 5,
        }
    }
}

/// Greedy clustering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterPolicy {
    /// Screen-space radius a cluster absorbs, converted to meters per zoom.
    pub cluster_radius_px: f64,
    /// Zoom levels above this are clamped.
    pub max_zoom: u8,
    /// At or above this zoom every incident renders on its own.
    pub disable_clustering_at_zoom: Option<u8>,
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            cluster_radius_px: 80.0,
            max_zoom: 22,
            disable_clustering_at_zoom: None,
        }
    }
}

/// What a heat point's intensity is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatWeighting {
    #[default]
    Constant,
    UpVotes,
    Likes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapPolicy {
    pub weighting: HeatWeighting,
    /// Intensity of an incident with no corroboration.
    pub base_weight: f64,
    /// Extra intensity per up-vote or like, capped at 1.0.
    pub step: f64,
}

impl Default for HeatmapPolicy {
    fn default() -> Self {
        Self {
            weighting: HeatWeighting::Constant,
            base_weight: 0.5,
            step: 0.1,
        }
    }
}

/// The configured set of incident categories. Empty means "any non-blank label".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogPolicy {
    pub categories: Vec<String>,
}

impl CatalogPolicy {
    /// Validates a raw label and returns the normalized kind.
    pub fn admit(&self, raw: &str) -> Result<IncidentKind> {
        let kind = IncidentKind::parse(raw)?;
        if !self.categories.is_empty() && !self.categories.iter().any(|c| c == kind.as_str()) {
            return Err(DomainError::InvalidInput(format!(
                "unsupported incident type '{}'",
                kind.as_str()
            )));
        }
        Ok(kind)
    }
}
