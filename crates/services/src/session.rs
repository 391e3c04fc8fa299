//! # ReportingSession
//!
//! Owns every core component for one process lifetime and is the single entry
//! point for presentation collaborators. Construct with [`ReportingSession::new`],
//! tear down with [`ReportingSession::close`].

use chrono::{DateTime, Utc};
use domains::errors::Result;
use domains::models::{
    CatalogPolicy, ClusterPolicy, ContributorId, ContributorProfile, HeatmapPolicy, Incident,
    IncidentEvent, IncidentId, MonthKey, NewIncidentReport, PhotoRef, VerificationPolicy,
    ViewportBounds, VoteDirection,
};
use domains::ports::IncidentRepository;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clustering::{Cluster, ClusterIndex};
use crate::events::SubscriptionId;
use crate::heatmap::{HeatPoint, HeatmapProjector};
use crate::incident_store::IncidentStore;
use crate::position::PositionTracker;
use crate::sharing::ShareCard;
use crate::statistics::{MonthlySummary, SeriesPoint};
use crate::verification::{VerificationEngine, VerificationOutcome};

/// All tunables a session is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPolicies {
    pub verification: VerificationPolicy,
    pub clustering: ClusterPolicy,
    pub heatmap: HeatmapPolicy,
    pub catalog: CatalogPolicy,
}

/// Totals reported when a session is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub incidents: usize,
    pub months: usize,
    pub contributor_points: u64,
}

pub struct ReportingSession<R: IncidentRepository> {
    store: IncidentStore<R>,
    engine: VerificationEngine,
    contributor: ContributorProfile,
    clusters: ClusterIndex,
    heatmap: HeatmapProjector,
    positions: PositionTracker,
}

impl<R: IncidentRepository> ReportingSession<R> {
    /// Starts a session with a fresh zero-point local contributor.
    pub fn new(repo: R, policies: SessionPolicies) -> Self {
        let contributor = ContributorProfile::new(ContributorId::new());
        info!(contributor = %contributor.id(), "reporting session started");
        Self {
            store: IncidentStore::new(repo, policies.catalog),
            engine: VerificationEngine::new(policies.verification),
            contributor,
            clusters: ClusterIndex::new(policies.clustering),
            heatmap: HeatmapProjector::new(policies.heatmap),
            positions: PositionTracker::new(),
        }
    }

    /// Reports at the device's current position.
    pub fn submit_incident(
        &mut self,
        kind: &str,
        photo_refs: Vec<PhotoRef>,
        now: DateTime<Utc>,
    ) -> Result<Incident> {
        let report = NewIncidentReport {
            kind: kind.to_string(),
            location: self.positions.current(),
            photo_refs,
        };
        self.submit_at(report, now)
    }

    /// Reports with an explicit location.
    pub fn submit_at(&mut self, report: NewIncidentReport, now: DateTime<Utc>) -> Result<Incident> {
        let incident = self.store.submit_incident(report, now)?;
        self.clusters.invalidate();
        Ok(incident)
    }

    pub fn get_incident(&self, id: IncidentId) -> Result<Incident> {
        self.store.get_incident(id)
    }

    pub fn all_incidents(&self) -> Vec<Incident> {
        self.store.all_incidents()
    }

    pub fn cast_vote(&mut self, id: IncidentId, direction: VoteDirection) -> Result<Incident> {
        self.engine.cast_vote(&mut self.store, id, direction)
    }

    /// Verifies or flags as the local contributor.
    pub fn cast_verification(&mut self, id: IncidentId, verified: bool) -> Result<VerificationOutcome> {
        self.engine
            .cast_verification(&mut self.store, id, verified, &mut self.contributor)
    }

    pub fn like(&mut self, id: IncidentId) -> Result<Incident> {
        self.engine.like(&mut self.store, id)
    }

    pub fn contributor(&self) -> &ContributorProfile {
        &self.contributor
    }

    pub fn clusters(&mut self, viewport: &ViewportBounds, zoom: u8) -> Vec<Cluster> {
        let incidents = self.store.all_incidents();
        self.clusters.rebuild(&incidents, viewport, zoom).to_vec()
    }

    pub fn heatmap(&self) -> Vec<HeatPoint> {
        self.heatmap.project(&self.store.all_incidents())
    }

    pub fn list_months(&self) -> Vec<MonthKey> {
        self.store.statistics().list_months()
    }

    pub fn summarize(&self, month: MonthKey) -> MonthlySummary {
        self.store.statistics().summarize(month)
    }

    pub fn time_series(&self, month: MonthKey) -> [u64; 12] {
        self.store.statistics().time_series(month)
    }

    pub fn trailing_series(&self, month: MonthKey) -> Vec<SeriesPoint> {
        self.store.statistics().trailing_series(month)
    }

    pub fn share_card(&self, id: IncidentId) -> Result<ShareCard> {
        self.store.get_incident(id).map(|incident| ShareCard::from(&incident))
    }

    pub fn positions(&self) -> &PositionTracker {
        &self.positions
    }

    /// Where the location collaborator pushes fixes and headings.
    pub fn positions_mut(&mut self) -> &mut PositionTracker {
        &mut self.positions
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&IncidentEvent) + Send + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Ends the session: observers are dropped and totals logged.
    pub fn close(mut self) -> SessionSummary {
        self.store.clear_subscribers();
        self.positions.clear_subscribers();
        let summary = SessionSummary {
            incidents: self.store.incident_count(),
            months: self.store.statistics().list_months().len(),
            contributor_points: self.contributor.points(),
        };
        info!(
            incidents = summary.incidents,
            months = summary.months,
            points = summary.contributor_points,
            "reporting session closed"
        );
        summary
    }
}
