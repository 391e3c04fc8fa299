//! # services
//!
//! The incident lifecycle and aggregation engine: store, verification state
//! machine, clustering, statistics and heatmap projection, plus the edge
//! helpers (position tracking, place search, sharing) and the session facade
//! that wires them together.

pub mod clustering;
pub mod events;
pub mod heatmap;
pub mod incident_store;
pub mod position;
pub mod search;
pub mod session;
pub mod sharing;
pub mod statistics;
pub mod verification;

pub use clustering::{Cluster, ClusterIndex};
pub use events::{EventBus, SubscriptionId};
pub use heatmap::{HeatPoint, HeatmapProjector};
pub use incident_store::IncidentStore;
pub use position::{PositionFix, PositionTracker};
pub use search::{PlaceSearchCoordinator, SearchOutcome};
pub use session::{ReportingSession, SessionPolicies, SessionSummary};
pub use sharing::{ShareCard, ShareTarget};
pub use statistics::{MonthlySummary, SeriesPoint, StatisticsAggregator, TypeCount};
pub use verification::{VerificationEngine, VerificationOutcome};
