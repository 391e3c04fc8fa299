//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be plugged into the services.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::{GeoPoint, Incident, IncidentId};

/// Incident persistence contract.
///
/// Implementations must return incidents in creation (insertion) order and
/// never drop or reorder them; there is no delete.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait IncidentRepository: Send {
    /// Adds a new incident. Fails with `Conflict` if the id is already taken.
    fn insert(&mut self, incident: Incident) -> Result<()>;

    fn find(&self, id: IncidentId) -> Option<Incident>;

    /// Replaces an existing incident. Fails with `IncidentNotFound` if absent.
    fn update(&mut self, incident: Incident) -> Result<()>;

    /// All incidents in creation order.
    fn list(&self) -> Vec<Incident>;

    fn count(&self) -> usize;
}

/// A geocoded search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: GeoPoint,
}

/// Free-text place lookup (e.g. a geocoding API).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Returns the best match, or `None` when nothing matched.
    async fn lookup(&self, query: &str) -> Result<Option<Place>>;
}
