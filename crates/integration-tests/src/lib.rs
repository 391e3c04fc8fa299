//! Shared fixtures for the cross-crate tests.

use chrono::{DateTime, TimeZone, Utc};
use domains::models::{GeoPoint, MonthKey, NewIncidentReport};
use services::{ReportingSession, SessionPolicies};
use storage_adapters::InMemoryIncidentRepository;

pub type TestSession = ReportingSession<InMemoryIncidentRepository>;

pub fn session() -> TestSession {
    session_with(SessionPolicies::default())
}

pub fn session_with(policies: SessionPolicies) -> TestSession {
    ReportingSession::new(InMemoryIncidentRepository::new(), policies)
}

/// Noon UTC on the given day.
pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

pub fn month(key: &str) -> MonthKey {
    key.parse().unwrap_or_else(|e| panic!("invalid fixture month {key}: {e}"))
}

pub fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap_or_else(|e| panic!("invalid fixture point: {e}"))
}

pub fn report(kind: &str, location: GeoPoint) -> NewIncidentReport {
    NewIncidentReport {
        kind: kind.to_string(),
        location: Some(location),
        photo_refs: Vec::new(),
    }
}

pub const LONDON: (f64, f64) = (51.50, -0.12);
