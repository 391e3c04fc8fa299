//! Change notifications published by the core after a mutation completes.

use serde::{Deserialize, Serialize};

use crate::models::{Badge, ContributorId, IncidentId, IncidentStatus, MonthKey, VoteDirection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IncidentEvent {
    Submitted {
        id: IncidentId,
        month_key: MonthKey,
    },
    VoteCast {
        id: IncidentId,
        direction: VoteDirection,
    },
    VerificationRecorded {
        id: IncidentId,
        verified: bool,
        /// The status the incident locked into, if this call crossed a threshold.
        transition: Option<IncidentStatus>,
    },
    Liked {
        id: IncidentId,
    },
    ContributorUpdated {
        contributor: ContributorId,
        points: u64,
        badge: Option<Badge>,
    },
}

impl IncidentEvent {
    /// The incident this event concerns, if any.
    pub fn incident_id(&self) -> Option<IncidentId> {
        match self {
            IncidentEvent::Submitted { id, .. }
            | IncidentEvent::VoteCast { id, .. }
            | IncidentEvent::VerificationRecorded { id, .. }
            | IncidentEvent::Liked { id } => Some(*id),
            IncidentEvent::ContributorUpdated { .. } => None,
        }
    }
}
