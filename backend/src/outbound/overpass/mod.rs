//! Overpass outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `BuildingSource`
//! port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_OVERPASS_URL, OverpassHttpIdentity, OverpassHttpSource};
