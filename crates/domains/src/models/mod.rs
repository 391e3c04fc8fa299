//! # Domain Models
//!
//! These structs represent the core entities of the incident tracker.
//! We use UUID v7 for time-ordered incident identification.

mod contributor;
mod events;
mod geo;
mod incident;
mod month_key;
mod policy;

pub use contributor::{badge_for, Badge, ContributorId, ContributorProfile};
pub use events::IncidentEvent;
pub use geo::{meters_per_pixel, GeoPoint, ViewportBounds};
pub use incident::{
    Incident, IncidentId, IncidentKind, IncidentStatus, NewIncidentReport, PhotoRef, VoteDirection,
    VoteTally,
};
pub use month_key::MonthKey;
pub use policy::{CatalogPolicy, ClusterPolicy, HeatWeighting, HeatmapPolicy, VerificationPolicy};
