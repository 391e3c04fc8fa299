//! # PositionTracker
//!
//! Latest-snapshot holder for the device position and compass heading.
//! Location callbacks land here; only incident submission reads the snapshot.

use chrono::{DateTime, Utc};
use domains::errors::Result;
use domains::models::GeoPoint;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::{EventBus, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub point: GeoPoint,
    pub received_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct PositionTracker {
    current: Option<PositionFix>,
    heading: Option<f64>,
    observers: EventBus<PositionFix>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new fix and notifies observers. Invalid coordinates are
    /// rejected and the previous fix is kept.
    pub fn update_position(&mut self, lat: f64, lng: f64, received_at: DateTime<Utc>) -> Result<()> {
        let point = GeoPoint::new(lat, lng)
            .inspect_err(|e| warn!(error = %e, "ignoring invalid position update"))?;
        let fix = PositionFix { point, received_at };
        self.current = Some(fix);
        debug!(lat, lng, "position updated");
        self.observers.publish(&fix);
        Ok(())
    }

    /// Compass heading, normalized into [0, 360).
    pub fn update_heading(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.heading = Some(degrees.rem_euclid(360.0));
        }
    }

    /// Geolocation failure or denial. The last known fix stays usable.
    pub fn report_error(&self, reason: &str) {
        warn!(reason, has_fix = self.current.is_some(), "geolocation error");
    }

    pub fn current(&self) -> Option<GeoPoint> {
        self.current.map(|fix| fix.point)
    }

    pub fn last_fix(&self) -> Option<PositionFix> {
        self.current
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&PositionFix) + Send + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.observers.clear();
    }
}
