//! # Place search
//!
//! Free-text lookups run at the async edge and never block submission. A new
//! search supersedes any in-flight one: only the latest result is delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use domains::errors::Result;
use domains::ports::{Place, PlaceSearch};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found { place: Place },
    NotFound,
    /// A newer search started while this one was in flight; ignore it.
    Superseded,
    /// The query was blank; nothing was looked up.
    Empty,
}

pub struct PlaceSearchCoordinator {
    provider: Arc<dyn PlaceSearch>,
    generation: AtomicU64,
}

impl PlaceSearchCoordinator {
    pub fn new(provider: Arc<dyn PlaceSearch>) -> Self {
        Self {
            provider,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::Empty);
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.provider.lookup(query).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(query, ticket, "discarding superseded place search");
            return Ok(SearchOutcome::Superseded);
        }

        Ok(match result? {
            Some(place) => SearchOutcome::Found { place },
            None => SearchOutcome::NotFound,
        })
    }
}
