//! # HeatmapProjector
//!
//! Derives the weighted point list for density rendering. Always a full
//! recompute; one point per incident, duplicates included.

use domains::models::{HeatWeighting, HeatmapPolicy, Incident};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct HeatmapProjector {
    policy: HeatmapPolicy,
}

impl HeatmapProjector {
    pub fn new(policy: HeatmapPolicy) -> Self {
        Self { policy }
    }

    pub fn project(&self, incidents: &[Incident]) -> Vec<HeatPoint> {
        incidents
            .iter()
            .map(|incident| {
                let location = incident.location();
                HeatPoint {
                    lat: location.lat,
                    lng: location.lng,
                    weight: self.weight(incident),
                }
            })
            .collect()
    }

    fn weight(&self, incident: &Incident) -> f64 {
        let corroboration = match self.policy.weighting {
            HeatWeighting::Constant => return self.policy.base_weight,
            HeatWeighting::UpVotes => incident.votes().up,
            HeatWeighting::Likes => incident.likes(),
        };
        (self.policy.base_weight + self.policy.step * f64::from(corroboration)).min(1.0)
    }
}
