//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the potential endpoint, the health probes and the
//! schema wrappers that describe domain payloads without coupling domain
//! types to utoipa. The document is exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::geojson::{FeatureBody, FeatureCollectionBody, PolygonGeometry};
use crate::inbound::http::potential::MessageBody;
use crate::inbound::http::schemas::{
    CoordsSchema, ErrorCodeSchema, ErrorSchema, PotentialRequestSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rooftop solar potential API",
        description = "Estimates yearly rooftop solar yield for buildings inside a bounding box."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::potential::compute_potential,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PotentialRequestSchema,
        CoordsSchema,
        FeatureCollectionBody,
        FeatureBody,
        PolygonGeometry,
        MessageBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "potential", description = "Rooftop solar estimates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/potential")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn request_schema_exposes_coords() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let coords = schemas.get("CoordsSchema").expect("coords schema");

        for field in ["south", "west", "north", "east"] {
            assert_object_schema_has_field(coords, field);
        }
    }
}
