use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributorId(pub Uuid);

impl ContributorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContributorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reputation tier earned through verification work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Badge {
    Bronze,
    Silver,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Bronze => f.write_str("Bronze"),
            Badge::Silver => f.write_str("Silver"),
        }
    }
}

/// Derives the badge for a point total. `None` means no badge yet.
pub fn badge_for(points: u64) -> Option<Badge> {
    match points {
        p if p >= 1000 => Some(Badge::Silver),
        p if p >= 500 => Some(Badge::Bronze),
        _ => None,
    }
}

/// The acting user. Points only grow through true verifications; the badge is
/// always derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorProfile {
    id: ContributorId,
    points: u64,
}

impl ContributorProfile {
    pub fn new(id: ContributorId) -> Self {
        Self { id, points: 0 }
    }

    pub fn id(&self) -> ContributorId {
        self.id
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn badge(&self) -> Option<Badge> {
        badge_for(self.points)
    }

    /// Credits points and returns the new badge.
    pub fn award(&mut self, points: u64) -> Option<Badge> {
        self.points = self.points.saturating_add(points);
        self.badge()
    }
}
