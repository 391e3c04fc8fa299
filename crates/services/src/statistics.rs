//! # StatisticsAggregator
//!
//! Rollups of incidents by month and type for the reporting dashboard.
//!
//! The buckets are updated incrementally on every successful submission and
//! must always match a from-scratch scan ([`StatisticsAggregator::from_incidents`]).

use std::collections::BTreeMap;

use domains::models::{Incident, IncidentKind, MonthKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub total: u64,
    /// Count descending, then type ascending.
    pub by_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: MonthKey,
    pub total: u64,
}

const SERIES_WINDOW: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsAggregator {
    buckets: BTreeMap<MonthKey, BTreeMap<IncidentKind, u64>>,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full scan grouping by `(month_key, kind)`.
    pub fn from_incidents<'a, I>(incidents: I) -> Self
    where
        I: IntoIterator<Item = &'a Incident>,
    {
        let mut aggregator = Self::new();
        for incident in incidents {
            aggregator.record(incident);
        }
        aggregator
    }

    /// Counts one newly created incident in its month/type bucket.
    pub fn record(&mut self, incident: &Incident) {
        *self
            .buckets
            .entry(incident.month_key())
            .or_default()
            .entry(incident.kind().clone())
            .or_insert(0) += 1;
    }

    /// Months with data, most recent first.
    pub fn list_months(&self) -> Vec<MonthKey> {
        self.buckets.keys().rev().copied().collect()
    }

    /// Unknown months yield an empty summary rather than an error.
    pub fn summarize(&self, month: MonthKey) -> MonthlySummary {
        let Some(types) = self.buckets.get(&month) else {
            debug!(%month, "no incidents recorded for month");
            return MonthlySummary { month, total: 0, by_type: Vec::new() };
        };

        let mut by_type: Vec<TypeCount> = types
            .iter()
            .map(|(kind, count)| TypeCount { kind: kind.clone(), count: *count })
            .collect();
        by_type.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));

        MonthlySummary {
            month,
            total: types.values().sum(),
            by_type,
        }
    }

    fn total(&self, month: MonthKey) -> u64 {
        self.buckets
            .get(&month)
            .map(|types| types.values().sum())
            .unwrap_or(0)
    }

    /// The trailing twelve months ending at `month`, oldest first.
    pub fn trailing_series(&self, month: MonthKey) -> Vec<SeriesPoint> {
        let mut series = Vec::with_capacity(SERIES_WINDOW);
        let mut cursor = month;
        for _ in 0..SERIES_WINDOW {
            series.push(SeriesPoint { month: cursor, total: self.total(cursor) });
            cursor = cursor.previous();
        }
        series.reverse();
        series
    }

    /// Calendar-indexed (Jan..Dec) totals for the trailing window ending at
    /// `month`. The slot for `month` itself equals `summarize(month).total`.
    pub fn time_series(&self, month: MonthKey) -> [u64; 12] {
        let mut slots = [0u64; SERIES_WINDOW];
        for point in self.trailing_series(month) {
            slots[point.month.calendar_index()] = point.total;
        }
        slots
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
