//! GeoJSON response bodies for enriched building footprints.
//!
//! Rings are closed on output as GeoJSON requires; the domain keeps them in
//! source order without the repeated vertex.

use geo::Coord;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{EnrichedFeature, EnrichedFeatureCollection};

/// `FeatureCollection` of enriched buildings.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeatureCollectionBody {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "FeatureCollection")]
    kind: &'static str,
    features: Vec<FeatureBody>,
}

/// One building with its tags and derived estimate in `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeatureBody {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Feature")]
    kind: &'static str,
    geometry: PolygonGeometry,
    /// Source tags plus `area_sqm`, `potential_kwh` and `potential_level`.
    #[schema(value_type = Object)]
    properties: Map<String, Value>,
}

/// Polygon geometry with a single exterior ring of `[longitude, latitude]`
/// positions.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Polygon")]
    kind: &'static str,
    #[schema(value_type = Vec<Vec<Vec<f64>>>)]
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl FeatureCollectionBody {
    /// Number of features in the body.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the body holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl From<&EnrichedFeatureCollection> for FeatureCollectionBody {
    fn from(collection: &EnrichedFeatureCollection) -> Self {
        Self {
            kind: "FeatureCollection",
            features: collection.features.iter().map(FeatureBody::from).collect(),
        }
    }
}

impl From<&EnrichedFeature> for FeatureBody {
    fn from(enriched: &EnrichedFeature) -> Self {
        let mut properties: Map<String, Value> = enriched
            .feature
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        properties.insert("area_sqm".to_owned(), Value::from(enriched.area_sqm));
        properties.insert(
            "potential_kwh".to_owned(),
            Value::from(enriched.potential_kwh),
        );
        properties.insert(
            "potential_level".to_owned(),
            Value::from(enriched.potential_level.as_str()),
        );

        Self {
            kind: "Feature",
            geometry: PolygonGeometry {
                kind: "Polygon",
                coordinates: vec![closed_ring(&enriched.feature.ring)],
            },
            properties,
        }
    }
}

fn closed_ring(ring: &[Coord<f64>]) -> Vec<[f64; 2]> {
    let mut positions: Vec<[f64; 2]> = ring.iter().map(|coord| [coord.x, coord.y]).collect();
    match (positions.first().copied(), positions.last().copied()) {
        (Some(first), Some(last)) if first != last => positions.push(first),
        _ => {}
    }
    positions
}
