//! Scenario scripts and the report produced by replaying them.
//!
//! Incidents are referenced by their submission index (0 = first successful
//! submit). Rejected steps are recorded in the report instead of aborting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use domains::models::{
    Badge, ContributorId, GeoPoint, Incident, IncidentId, MonthKey, NewIncidentReport, PhotoRef,
    ViewportBounds, VoteDirection,
};
use domains::ports::IncidentRepository;
use serde::{Deserialize, Serialize};
use services::{Cluster, HeatPoint, MonthlySummary, ReportingSession, SeriesPoint, SessionSummary};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Position {
        lat: f64,
        lng: f64,
        #[serde(default = "Utc::now")]
        at: DateTime<Utc>,
    },
    Heading {
        degrees: f64,
    },
    PositionLost {
        reason: String,
    },
    Submit {
        #[serde(rename = "type")]
        kind: String,
        at: DateTime<Utc>,
        /// Overrides the tracked position when present.
        location: Option<GeoPoint>,
        #[serde(default)]
        photos: Vec<String>,
    },
    Vote {
        incident: usize,
        direction: VoteDirection,
    },
    Verify {
        incident: usize,
        verified: bool,
    },
    Like {
        incident: usize,
    },
    Clusters {
        zoom: u8,
        viewport: Option<ViewportBounds>,
    },
}

#[derive(Debug, Serialize)]
pub struct Rejection {
    pub step: usize,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ContributorReport {
    pub id: ContributorId,
    pub points: u64,
    pub badge: Option<Badge>,
}

#[derive(Debug, Serialize)]
pub struct MonthReport {
    pub label: String,
    pub summary: MonthlySummary,
    pub time_series: [u64; 12],
    pub trailing: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct ClusterSnapshot {
    pub step: usize,
    pub zoom: u8,
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub contributor: ContributorReport,
    pub incidents: Vec<Incident>,
    pub months: Vec<MonthReport>,
    pub heatmap: Vec<HeatPoint>,
    pub clusters: Vec<ClusterSnapshot>,
    pub rejections: Vec<Rejection>,
    pub events_observed: usize,
    pub session: SessionSummary,
}

impl Scenario {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("scenario is not valid JSON")
    }
}

fn resolve(submitted: &[IncidentId], index: usize) -> anyhow::Result<IncidentId> {
    submitted
        .get(index)
        .copied()
        .ok_or_else(|| anyhow!("no incident was submitted at index {index}"))
}

/// Runs every step through `session`, then closes it.
pub fn replay<R: IncidentRepository>(
    mut session: ReportingSession<R>,
    scenario: Scenario,
) -> Report {
    let events = Arc::new(AtomicUsize::new(0));
    let counter = events.clone();
    session.subscribe(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let mut submitted = Vec::new();
    let mut snapshots = Vec::new();
    let mut rejections = Vec::new();

    for (step_no, step) in scenario.steps.into_iter().enumerate() {
        let result = apply(&mut session, step, step_no, &mut submitted, &mut snapshots);
        if let Err(error) = result {
            warn!(step = step_no, error = %error, "scenario step rejected");
            rejections.push(Rejection { step: step_no, error: error.to_string() });
        }
    }

    let months = session
        .list_months()
        .into_iter()
        .map(|month: MonthKey| MonthReport {
            label: month.label(),
            summary: session.summarize(month),
            time_series: session.time_series(month),
            trailing: session.trailing_series(month),
        })
        .collect();

    let contributor = session.contributor();
    let contributor = ContributorReport {
        id: contributor.id(),
        points: contributor.points(),
        badge: contributor.badge(),
    };
    let incidents = session.all_incidents();
    let heatmap = session.heatmap();
    let summary = session.close();
    info!(rejected = rejections.len(), "scenario replayed");

    Report {
        contributor,
        incidents,
        months,
        heatmap,
        clusters: snapshots,
        rejections,
        events_observed: events.load(Ordering::Relaxed),
        session: summary,
    }
}

fn apply<R: IncidentRepository>(
    session: &mut ReportingSession<R>,
    step: Step,
    step_no: usize,
    submitted: &mut Vec<IncidentId>,
    snapshots: &mut Vec<ClusterSnapshot>,
) -> anyhow::Result<()> {
    match step {
        Step::Position { lat, lng, at } => session.positions_mut().update_position(lat, lng, at)?,
        Step::Heading { degrees } => session.positions_mut().update_heading(degrees),
        Step::PositionLost { reason } => session.positions().report_error(&reason),
        Step::Submit { kind, at, location, photos } => {
            let photo_refs = photos.into_iter().map(PhotoRef).collect();
            let incident = match location {
                Some(location) => session.submit_at(
                    NewIncidentReport { kind, location: Some(location), photo_refs },
                    at,
                )?,
                None => session.submit_incident(&kind, photo_refs, at)?,
            };
            submitted.push(incident.id());
        }
        Step::Vote { incident, direction } => {
            session.cast_vote(resolve(submitted, incident)?, direction)?;
        }
        Step::Verify { incident, verified } => {
            session.cast_verification(resolve(submitted, incident)?, verified)?;
        }
        Step::Like { incident } => {
            session.like(resolve(submitted, incident)?)?;
        }
        Step::Clusters { zoom, viewport } => {
            let viewport = viewport.unwrap_or_else(ViewportBounds::world);
            snapshots.push(ClusterSnapshot {
                step: step_no,
                zoom,
                clusters: session.clusters(&viewport, zoom),
            });
        }
    }
    Ok(())
}
