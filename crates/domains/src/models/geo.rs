//! # Geographic primitives
//!
//! Coordinates, viewport boxes and the distance math used by clustering.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, Result};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Ground resolution of a 256px Web-Mercator tile at the equator, zoom 0.
const METERS_PER_PIXEL_AT_ZOOM_0: f64 = 156_543.033_92;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidInput(format!("latitude {lat} out of range")));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidInput(format!("longitude {lng} out of range")));
        }
        Ok(Self { lat, lng })
    }

    /// Re-runs range validation on a point built from raw fields.
    pub fn validated(self) -> Result<Self> {
        Self::new(self.lat, self.lng)
    }

    /// Haversine great-circle distance in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let to_rad = |deg: f64| deg * PI / 180.0;

        let dlat = to_rad(other.lat - self.lat);
        let dlng = to_rad(other.lng - self.lng);

        let a = (dlat / 2.0).sin().powi(2)
            + to_rad(self.lat).cos() * to_rad(other.lat).cos() * (dlng / 2.0).sin().powi(2);

        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_METERS * c
    }
}

/// Web-Mercator ground resolution at `lat` for the given zoom level.
pub fn meters_per_pixel(lat: f64, zoom: u8) -> f64 {
    let lat_rad = lat * PI / 180.0;
    METERS_PER_PIXEL_AT_ZOOM_0 * lat_rad.cos().abs() / 2f64.powi(i32::from(zoom))
}

/// The visible map rectangle.
///
/// When `south_west.lng > north_east.lng` the box crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl ViewportBounds {
    pub fn new(south_west: GeoPoint, north_east: GeoPoint) -> Result<Self> {
        if south_west.lat > north_east.lat {
            return Err(DomainError::InvalidInput(
                "viewport south edge is above its north edge".to_string(),
            ));
        }
        Ok(Self { south_west, north_east })
    }

    /// The whole globe.
    pub fn world() -> Self {
        Self {
            south_west: GeoPoint { lat: -90.0, lng: -180.0 },
            north_east: GeoPoint { lat: 90.0, lng: 180.0 },
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        let within_lat = point.lat >= self.south_west.lat && point.lat <= self.north_east.lat;
        let within_lng = if self.south_west.lng <= self.north_east.lng {
            point.lng >= self.south_west.lng && point.lng <= self.north_east.lng
        } else {
            point.lng >= self.south_west.lng || point.lng <= self.north_east.lng
        };
        within_lat && within_lng
    }
}
