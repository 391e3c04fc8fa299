//! # Incident
//!
//! A single reported issue. Fields are private so that every mutation goes
//! through the methods below, which keep counters monotonic and the status
//! lock one-way.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, Result};
use crate::models::{GeoPoint, MonthKey, VerificationPolicy};

/// UUID v7, so ids sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(pub Uuid);

impl IncidentId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for IncidentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Open category label such as "Pothole" or "Rubbish".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentKind(String);

impl IncidentKind {
    /// Trims the label and rejects blanks.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput("incident type is empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque attachment reference (object URL, media id, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Pending,
    Verified,
    Unverified,
}

impl IncidentStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, IncidentStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub up: u32,
    pub down: u32,
}

/// What a reporter hands to the store. `location` is `None` when the device
/// has no fix yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncidentReport {
    pub kind: String,
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub photo_refs: Vec<PhotoRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    id: IncidentId,
    #[serde(rename = "type")]
    kind: IncidentKind,
    location: GeoPoint,
    created_at: DateTime<Utc>,
    month_key: MonthKey,
    photo_refs: Vec<PhotoRef>,
    status: IncidentStatus,
    verified_count: u32,
    flagged_count: u32,
    votes: VoteTally,
    likes: u32,
}

impl Incident {
    /// A fresh `Pending` incident with zeroed counters. The month bucket is
    /// fixed here and never recomputed.
    pub fn new(
        id: IncidentId,
        kind: IncidentKind,
        location: GeoPoint,
        photo_refs: Vec<PhotoRef>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            location,
            month_key: MonthKey::from_datetime(&created_at),
            created_at,
            photo_refs,
            status: IncidentStatus::Pending,
            verified_count: 0,
            flagged_count: 0,
            votes: VoteTally::default(),
            likes: 0,
        }
    }

    pub fn id(&self) -> IncidentId {
        self.id
    }

    pub fn kind(&self) -> &IncidentKind {
        &self.kind
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn month_key(&self) -> MonthKey {
        self.month_key
    }

    pub fn photo_refs(&self) -> &[PhotoRef] {
        &self.photo_refs
    }

    pub fn status(&self) -> IncidentStatus {
        self.status
    }

    pub fn verified_count(&self) -> u32 {
        self.verified_count
    }

    pub fn flagged_count(&self) -> u32 {
        self.flagged_count
    }

    pub fn votes(&self) -> VoteTally {
        self.votes
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn record_vote(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.votes.up = self.votes.up.saturating_add(1),
            VoteDirection::Down => self.votes.down = self.votes.down.saturating_add(1),
        }
    }

    pub fn record_like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    /// Counts a verification and, while still `Pending`, applies the
    /// first-threshold-wins transition. Returns the new status if one fired.
    ///
    /// Once resolved the status never changes again; counters keep counting.
    pub fn record_verification(
        &mut self,
        verified: bool,
        policy: &VerificationPolicy,
    ) -> Option<IncidentStatus> {
        if verified {
            self.verified_count = self.verified_count.saturating_add(1);
        } else {
            self.flagged_count = self.flagged_count.saturating_add(1);
        }

        if self.status.is_resolved() {
            return None;
        }

        let next = if self.verified_count >= policy.verify_threshold {
            IncidentStatus::Verified
        } else if self.flagged_count >= policy.flag_threshold {
            IncidentStatus::Unverified
        } else {
            return None;
        };
        self.status = next;
        Some(next)
    }
}
