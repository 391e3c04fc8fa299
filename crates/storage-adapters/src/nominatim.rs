//! # NominatimPlaceSearch
//!
//! `PlaceSearch` backed by the OpenStreetMap Nominatim `/search` endpoint.

use async_trait::async_trait;
use domains::errors::{DomainError, Result};
use domains::models::GeoPoint;
use domains::ports::{Place, PlaceSearch};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// One entry of the JSON array Nominatim returns. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct NominatimPlaceSearch {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimPlaceSearch {
    /// Nominatim's usage policy requires an identifying user agent.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| DomainError::LookupFailed(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

/// First parseable hit wins.
fn first_place(body: &str) -> Result<Option<Place>> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| DomainError::LookupFailed(e.to_string()))?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };
    let lat = hit
        .lat
        .parse::<f64>()
        .map_err(|e| DomainError::LookupFailed(format!("bad latitude '{}': {e}", hit.lat)))?;
    let lng = hit
        .lon
        .parse::<f64>()
        .map_err(|e| DomainError::LookupFailed(format!("bad longitude '{}': {e}", hit.lon)))?;

    Ok(Some(Place {
        name: hit.display_name,
        location: GeoPoint::new(lat, lng)?,
    }))
}

#[async_trait]
impl PlaceSearch for NominatimPlaceSearch {
    async fn lookup(&self, query: &str) -> Result<Option<Place>> {
        let url = format!("{}/search", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DomainError::LookupFailed(e.to_string()))?
            .text()
            .await
            .map_err(|e| DomainError::LookupFailed(e.to_string()))?;

        let place = first_place(&body)?;
        debug!(query, found = place.is_some(), "nominatim lookup");
        Ok(place)
    }
}
