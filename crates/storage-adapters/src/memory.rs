//! In-memory implementation of `IncidentRepository`.
//! Lives as long as the process; there is no durability.

use std::collections::HashMap;

use domains::errors::{DomainError, Result};
use domains::models::{Incident, IncidentId};
use domains::ports::IncidentRepository;
use tracing::trace;

/// Incidents kept in insertion order with an id index for lookups.
#[derive(Debug, Default)]
pub struct InMemoryIncidentRepository {
    rows: Vec<Incident>,
    index: HashMap<IncidentId, usize>,
}

impl InMemoryIncidentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IncidentRepository for InMemoryIncidentRepository {
    fn insert(&mut self, incident: Incident) -> Result<()> {
        let id = incident.id();
        if self.index.contains_key(&id) {
            return Err(DomainError::Conflict(format!("incident {id} already exists")));
        }
        self.index.insert(id, self.rows.len());
        self.rows.push(incident);
        trace!(%id, rows = self.rows.len(), "incident row inserted");
        Ok(())
    }

    fn find(&self, id: IncidentId) -> Option<Incident> {
        self.index.get(&id).map(|&pos| self.rows[pos].clone())
    }

    fn update(&mut self, incident: Incident) -> Result<()> {
        let id = incident.id();
        let pos = *self.index.get(&id).ok_or(DomainError::IncidentNotFound(id))?;
        self.rows[pos] = incident;
        Ok(())
    }

    fn list(&self) -> Vec<Incident> {
        self.rows.clone()
    }

    fn count(&self) -> usize {
        self.rows.len()
    }
}
