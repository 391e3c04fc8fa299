//! # ClusterIndex
//!
//! Greedy radius clustering so a viewport with many incidents renders a
//! bounded number of markers.
//!
//! Seeds are taken in creation order (the order of `all_incidents()`); each
//! seed absorbs every later unclustered incident within the zoom-dependent
//! radius. The index is recomputed from scratch on each rebuild and only
//! cached for identical `(incident ids, viewport, zoom)` input.

use domains::models::{meters_per_pixel, ClusterPolicy, GeoPoint, Incident, IncidentId, ViewportBounds};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// The seed incident's location.
    pub representative: GeoPoint,
    pub member_ids: Vec<IncidentId>,
    pub count: usize,
}

impl Cluster {
    /// A single incident renders as its own marker, not an aggregate.
    pub fn is_single(&self) -> bool {
        self.count == 1
    }
}

/// Member ids in input order; a different set of the same size misses.
#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    incident_ids: Vec<IncidentId>,
    viewport: ViewportBounds,
    zoom: u8,
}

#[derive(Debug, Default)]
pub struct ClusterIndex {
    policy: ClusterPolicy,
    cache: Option<(CacheKey, Vec<Cluster>)>,
}

impl ClusterIndex {
    pub fn new(policy: ClusterPolicy) -> Self {
        Self { policy, cache: None }
    }

    /// Great-circle radius a seed at `lat` absorbs at `zoom`.
    pub fn radius_meters(&self, lat: f64, zoom: u8) -> f64 {
        self.policy.cluster_radius_px * meters_per_pixel(lat, zoom.min(self.policy.max_zoom))
    }

    /// Drops the cached clusters; the next rebuild recomputes.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Clusters of the incidents visible in `viewport`.
    ///
    /// `incidents` must be in creation order; that order decides seeds.
    pub fn rebuild(&mut self, incidents: &[Incident], viewport: &ViewportBounds, zoom: u8) -> &[Cluster] {
        let key = CacheKey {
            incident_ids: incidents.iter().map(Incident::id).collect(),
            viewport: *viewport,
            zoom: zoom.min(self.policy.max_zoom),
        };

        let fresh = !matches!(&self.cache, Some((cached, _)) if *cached == key);
        if fresh {
            let clusters = self.compute(incidents, viewport, key.zoom);
            debug!(
                incidents = incidents.len(),
                clusters = clusters.len(),
                zoom = key.zoom,
                "cluster index rebuilt"
            );
            self.cache = Some((key, clusters));
        }

        match &self.cache {
            Some((_, clusters)) => clusters,
            None => &[],
        }
    }

    fn compute(&self, incidents: &[Incident], viewport: &ViewportBounds, zoom: u8) -> Vec<Cluster> {
        let visible: Vec<&Incident> = incidents
            .iter()
            .filter(|i| viewport.contains(&i.location()))
            .collect();

        let clustering_disabled = self
            .policy
            .disable_clustering_at_zoom
            .is_some_and(|limit| zoom >= limit);

        let mut absorbed = vec![false; visible.len()];
        let mut clusters = Vec::new();

        for seed_idx in 0..visible.len() {
            if absorbed[seed_idx] {
                continue;
            }
            absorbed[seed_idx] = true;
            let seed = visible[seed_idx].location();
            let mut member_ids = vec![visible[seed_idx].id()];

            if !clustering_disabled {
                let radius = self.radius_meters(seed.lat, zoom);
                for candidate_idx in (seed_idx + 1)..visible.len() {
                    if absorbed[candidate_idx] {
                        continue;
                    }
                    if seed.distance_meters(&visible[candidate_idx].location()) <= radius {
                        absorbed[candidate_idx] = true;
                        member_ids.push(visible[candidate_idx].id());
                    }
                }
            }

            clusters.push(Cluster {
                representative: seed,
                count: member_ids.len(),
                member_ids,
            });
        }
        clusters
    }
}
