//! Domain primitives, services and ports.
//!
//! Purpose: keep the building-footprint pipeline (validate, project, measure,
//! classify) free of transport concerns. Adapters in `inbound` and `outbound`
//! translate between these types and HTTP/JSON.
//!
//! Public surface:
//! - `BoundingBox` — south/west/north/east query rectangle.
//! - `BuildingFeature` / `FeatureCollection` — normalised footprints.
//! - `PotentialCalculator` — validity filter, UTM area and yield model.
//! - `SolarPotentialService` — fetch-then-enrich orchestration.
//! - `estimate_site` — reference-system yield from a site's annual climate.
//! - `Error` / `ErrorCode` — transport-agnostic failures.

pub mod bounding_box;
pub mod error;
pub mod features;
pub mod ports;
pub mod potential;
pub mod projection;
pub mod site_estimate;
mod solar_potential_service;
pub mod trace_id;

pub use self::bounding_box::{BoundingBox, BoundingBoxValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::features::{
    BuildingFeature, EnrichedFeature, EnrichedFeatureCollection, FeatureCollection, Properties,
};
pub use self::potential::{
    validate_feature, DropCounts, FeatureRejection, LevelThresholds, PotentialCalculator,
    PotentialLevel, PotentialModel, PotentialModelError, PotentialReport,
};
pub use self::projection::{Hemisphere, ProjectionError, ProjectionStrategy, UtmZone};
pub use self::site_estimate::{estimate_site, AnnualClimate, SiteEstimate};
pub use self::solar_potential_service::SolarPotentialService;
pub use self::trace_id::TraceId;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
