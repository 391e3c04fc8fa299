//! # IncidentStore
//!
//! The authoritative set of incidents. All mutation passes through here; the
//! statistics buckets and subscribers are kept in step with every change.

use chrono::{DateTime, Utc};
use domains::errors::{DomainError, Result};
use domains::models::{CatalogPolicy, Incident, IncidentEvent, IncidentId, NewIncidentReport};
use domains::ports::IncidentRepository;
use tracing::{debug, info, warn};

use crate::events::{EventBus, SubscriptionId};
use crate::statistics::StatisticsAggregator;

pub struct IncidentStore<R: IncidentRepository> {
    repo: R,
    catalog: CatalogPolicy,
    statistics: StatisticsAggregator,
    events: EventBus<IncidentEvent>,
}

impl<R: IncidentRepository> IncidentStore<R> {
    pub fn new(repo: R, catalog: CatalogPolicy) -> Self {
        // Incidents already in the repository still need to be counted.
        let statistics = StatisticsAggregator::from_incidents(&repo.list());
        Self {
            repo,
            catalog,
            statistics,
            events: EventBus::new(),
        }
    }

    /// Validates and records a new report.
    ///
    /// Nothing is created on failure: location, type and coordinates are all
    /// checked before the repository is touched.
    pub fn submit_incident(
        &mut self,
        report: NewIncidentReport,
        now: DateTime<Utc>,
    ) -> Result<Incident> {
        let Some(location) = report.location else {
            warn!(kind = %report.kind, "submission rejected: no current position");
            return Err(DomainError::LocationUnavailable);
        };
        let location = location.validated().inspect_err(|e| warn!(error = %e, "submission rejected"))?;
        let kind = self
            .catalog
            .admit(&report.kind)
            .inspect_err(|e| warn!(error = %e, "submission rejected"))?;

        let incident = Incident::new(IncidentId::new(), kind, location, report.photo_refs, now);
        self.repo.insert(incident.clone())?;
        self.statistics.record(&incident);

        info!(
            id = %incident.id(),
            kind = %incident.kind(),
            month = %incident.month_key(),
            lat = location.lat,
            lng = location.lng,
            "incident submitted"
        );
        self.events.publish(&IncidentEvent::Submitted {
            id: incident.id(),
            month_key: incident.month_key(),
        });
        Ok(incident)
    }

    pub fn get_incident(&self, id: IncidentId) -> Result<Incident> {
        self.repo.find(id).ok_or(DomainError::IncidentNotFound(id))
    }

    /// Read-only snapshot in creation order.
    pub fn all_incidents(&self) -> Vec<Incident> {
        self.repo.list()
    }

    pub fn incident_count(&self) -> usize {
        self.repo.count()
    }

    pub fn statistics(&self) -> &StatisticsAggregator {
        &self.statistics
    }

    /// Applies `mutate` to a copy of the incident and persists it only if the
    /// closure succeeds, so a failed call leaves stored counters untouched.
    pub fn update_with<T, F>(&mut self, id: IncidentId, mutate: F) -> Result<(Incident, T)>
    where
        F: FnOnce(&mut Incident) -> Result<T>,
    {
        let mut incident = self.get_incident(id)?;
        let output = mutate(&mut incident)?;
        self.repo.update(incident.clone())?;
        debug!(%id, "incident updated");
        Ok((incident, output))
    }

    pub fn publish(&mut self, event: IncidentEvent) {
        self.events.publish(&event);
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&IncidentEvent) + Send + 'static,
    {
        self.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.events.clear();
    }
}
