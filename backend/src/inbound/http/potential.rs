//! Solar potential API handler.
//!
//! ```text
//! POST /api/potential  Estimate rooftop solar yield inside a bounding box
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::PotentialOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::geojson::FeatureCollectionBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_bounds;

/// Message returned when the area holds no usable buildings.
pub const NO_BUILDINGS_MESSAGE: &str = "No buildings found in the selected area";

/// Informational body returned instead of an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageBody {
    /// Human-readable explanation.
    #[schema(example = "No buildings found in the selected area")]
    pub message: String,
}

impl MessageBody {
    fn no_buildings() -> Self {
        Self {
            message: NO_BUILDINGS_MESSAGE.to_owned(),
        }
    }
}

/// Estimate yearly solar yield for every building inside `coords`.
///
/// A missing body, a body that is not JSON, or a bound that is neither a
/// number nor a numeric string yields `400`. Upstream failures are reported
/// as "no buildings" with `200`.
#[utoipa::path(
    post,
    path = "/api/potential",
    request_body = crate::inbound::http::schemas::PotentialRequestSchema,
    responses(
        (status = 200, description = "Enriched buildings, or a no-buildings message", body = FeatureCollectionBody),
        (status = 400, description = "Missing or malformed coordinates", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["potential"],
    operation_id = "computePotential"
)]
#[post("/potential")]
pub async fn compute_potential(
    state: web::Data<HttpState>,
    payload: Option<web::Json<Value>>,
) -> ApiResult<HttpResponse> {
    let body = payload.map(web::Json::into_inner);
    let bounds = parse_bounds(body.as_ref())?;

    match state.potential.potential_for(&bounds).await? {
        PotentialOutcome::NoBuildings => {
            info!("no buildings in requested area");
            Ok(HttpResponse::Ok().json(MessageBody::no_buildings()))
        }
        PotentialOutcome::Computed(report) => {
            let body = FeatureCollectionBody::from(&report.collection);
            info!(feature_count = body.len(), "returning enriched buildings");
            Ok(HttpResponse::Ok().json(body))
        }
    }
}

#[cfg(test)]
mod tests;
