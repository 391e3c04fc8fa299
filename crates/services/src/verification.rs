//! # VerificationEngine
//!
//! Applies community votes, likes and verification events to incidents.
//!
//! Status transitions are one-way: `Pending → Verified` once enough true
//! verifications arrive, or `Pending → Unverified` once enough flags arrive,
//! whichever threshold is crossed first. Later calls keep counting but never
//! move the status again.

use domains::errors::Result;
use domains::models::{
    Badge, ContributorProfile, Incident, IncidentEvent, IncidentId, IncidentStatus,
    VerificationPolicy, VoteDirection,
};
use domains::ports::IncidentRepository;
use serde::Serialize;
use tracing::{debug, info};

use crate::incident_store::IncidentStore;

/// Result of a single `cast_verification` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationOutcome {
    pub incident: Incident,
    /// Set when this call locked the incident's status.
    pub transition: Option<IncidentStatus>,
    pub points_awarded: u64,
    pub badge: Option<Badge>,
}

#[derive(Debug, Clone, Default)]
pub struct VerificationEngine {
    policy: VerificationPolicy,
}

impl VerificationEngine {
    pub fn new(policy: VerificationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    pub fn cast_vote<R: IncidentRepository>(
        &self,
        store: &mut IncidentStore<R>,
        id: IncidentId,
        direction: VoteDirection,
    ) -> Result<Incident> {
        let (incident, ()) = store.update_with(id, |incident| {
            incident.record_vote(direction);
            Ok(())
        })?;
        debug!(%id, ?direction, votes = ?incident.votes(), "vote cast");
        store.publish(IncidentEvent::VoteCast { id, direction });
        Ok(incident)
    }

    pub fn like<R: IncidentRepository>(
        &self,
        store: &mut IncidentStore<R>,
        id: IncidentId,
    ) -> Result<Incident> {
        let (incident, ()) = store.update_with(id, |incident| {
            incident.record_like();
            Ok(())
        })?;
        debug!(%id, likes = incident.likes(), "incident liked");
        store.publish(IncidentEvent::Liked { id });
        Ok(incident)
    }

    /// Records a verification (`verified == true`) or a flag (`false`).
    ///
    /// The contributor is only credited after the incident update succeeded;
    /// an unknown id leaves both untouched.
    pub fn cast_verification<R: IncidentRepository>(
        &self,
        store: &mut IncidentStore<R>,
        id: IncidentId,
        verified: bool,
        contributor: &mut ContributorProfile,
    ) -> Result<VerificationOutcome> {
        let policy = &self.policy;
        let (incident, transition) =
            store.update_with(id, |incident| Ok(incident.record_verification(verified, policy)))?;

        let points_awarded = if verified { policy.points_per_verification } else { 0 };
        let badge = contributor.award(points_awarded);

        if let Some(status) = transition {
            info!(
                %id,
                ?status,
                verified_count = incident.verified_count(),
                flagged_count = incident.flagged_count(),
                "incident status locked"
            );
        }
        debug!(
            %id,
            verified,
            contributor = %contributor.id(),
            points = contributor.points(),
            badge = ?badge,
            "verification recorded"
        );

        store.publish(IncidentEvent::VerificationRecorded { id, verified, transition });
        if verified {
            store.publish(IncidentEvent::ContributorUpdated {
                contributor: contributor.id(),
                points: contributor.points(),
                badge,
            });
        }

        Ok(VerificationOutcome {
            incident,
            transition,
            points_awarded,
            badge,
        })
    }
}
