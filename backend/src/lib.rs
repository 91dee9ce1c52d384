//! Rooftop solar potential backend.
//!
//! Fetches building footprints for a bounding box, measures each roof in a
//! UTM projection and attaches a yearly yield estimate with a qualitative
//! level.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
