//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape for the generated document.

use serde::Serialize;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(Serialize, ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "No data or 'coords' key provided")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for the `coords` object of a potential request.
///
/// Each bound may also be sent as a numeric string.
#[derive(Serialize, ToSchema)]
pub struct CoordsSchema {
    /// Southern latitude bound.
    #[schema(example = 40.99)]
    south: f64,
    /// Western longitude bound.
    #[schema(example = 29.0)]
    west: f64,
    /// Northern latitude bound.
    #[schema(example = 41.01)]
    north: f64,
    /// Eastern longitude bound.
    #[schema(example = 29.02)]
    east: f64,
}

/// OpenAPI schema for the `POST /api/potential` request body.
#[derive(Serialize, ToSchema)]
pub struct PotentialRequestSchema {
    /// Query rectangle in WGS84 degrees.
    coords: CoordsSchema,
}
