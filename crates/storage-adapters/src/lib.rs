//! # storage-adapters
//!
//! Implementations of the `domains` ports.
//!
//! - [`memory::InMemoryIncidentRepository`]: process-lifetime incident storage.
//! - `nominatim::NominatimPlaceSearch` (feature `place-nominatim`): OpenStreetMap geocoding.

pub mod memory;

#[cfg(feature = "place-nominatim")]
pub mod nominatim;

pub use memory::InMemoryIncidentRepository;

#[cfg(feature = "place-nominatim")]
pub use nominatim::NominatimPlaceSearch;
