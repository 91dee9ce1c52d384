//! DTOs for decoding Overpass `out geom` JSON responses.
//!
//! Elements and their points are kept as raw JSON values so one malformed
//! element or vertex discards only that element instead of failing the whole
//! payload. The adapter decodes into these DTOs first, then maps into domain
//! features in one pass.

use std::collections::BTreeMap;

use geo::Coord;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::BuildingFeature;
use crate::domain::ports::BuildingFetch;

const MIN_FOOTPRINT_POINTS: usize = 3;
const OUTER_ROLE: &str = "outer";

/// Top-level payload; elements stay raw so each decodes independently.
#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponseDto {
    #[serde(default)]
    pub(super) elements: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementDto {
    #[serde(rename = "type")]
    pub(super) element_type: String,
    #[serde(default)]
    pub(super) id: i64,
    #[serde(default)]
    pub(super) geometry: Option<Value>,
    #[serde(default)]
    pub(super) members: Vec<OverpassMemberDto>,
    #[serde(default)]
    pub(super) tags: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassMemberDto {
    #[serde(default)]
    pub(super) role: String,
    #[serde(default)]
    pub(super) geometry: Option<Value>,
}

#[derive(Debug, PartialEq)]
enum ElementOutcome {
    Accepted(BuildingFeature),
    UnsupportedType,
    MalformedGeometry,
    InvalidPoint { index: usize },
    TooFewPoints { count: usize },
}

impl OverpassResponseDto {
    pub(super) fn into_fetch(self) -> BuildingFetch {
        let mut fetch = BuildingFetch::default();
        for raw in self.elements {
            let element = match serde_json::from_value::<OverpassElementDto>(raw) {
                Ok(element) => element,
                Err(error) => {
                    warn!(error = %error, "discarding undecodable element");
                    fetch.skipped.unsupported_type += 1;
                    continue;
                }
            };
            let id = element.id;
            let element_type = element.element_type.clone();
            match element.into_outcome() {
                ElementOutcome::Accepted(feature) => fetch.collection.features.push(feature),
                ElementOutcome::UnsupportedType => fetch.skipped.unsupported_type += 1,
                ElementOutcome::MalformedGeometry => {
                    warn!(
                        element_id = id,
                        element_type = %element_type,
                        "discarding element whose geometry is not a point list"
                    );
                    fetch.skipped.invalid_points += 1;
                }
                ElementOutcome::InvalidPoint { index } => {
                    warn!(
                        element_id = id,
                        element_type = %element_type,
                        point_index = index,
                        "discarding element with missing or non-numeric point"
                    );
                    fetch.skipped.invalid_points += 1;
                }
                ElementOutcome::TooFewPoints { count } => {
                    warn!(
                        element_id = id,
                        element_type = %element_type,
                        point_count = count,
                        "discarding element with fewer than three points"
                    );
                    fetch.skipped.too_few_points += 1;
                }
            }
        }
        fetch
    }
}

impl OverpassElementDto {
    fn into_outcome(self) -> ElementOutcome {
        if !matches!(self.element_type.as_str(), "way" | "relation") {
            return ElementOutcome::UnsupportedType;
        }

        let points: &[Value] = match self.outline() {
            None => &[],
            Some(Value::Array(points)) => points.as_slice(),
            Some(_) => return ElementOutcome::MalformedGeometry,
        };
        let mut ring = Vec::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            match parse_point(point) {
                Some(coord) => ring.push(coord),
                None => return ElementOutcome::InvalidPoint { index },
            }
        }
        if ring.len() < MIN_FOOTPRINT_POINTS {
            return ElementOutcome::TooFewPoints { count: ring.len() };
        }

        let properties = self
            .tags
            .into_iter()
            .filter_map(|(key, value)| tag_text(value).map(|text| (key, text)))
            .collect();
        ElementOutcome::Accepted(BuildingFeature { ring, properties })
    }

    /// Element geometry, or the first outer member's for multipolygon relations.
    fn outline(&self) -> Option<&Value> {
        self.geometry.as_ref().or_else(|| {
            self.members
                .iter()
                .filter(|member| member.role == OUTER_ROLE)
                .find_map(|member| member.geometry.as_ref())
        })
    }
}

/// Overpass tags are strings; scalars from other producers are stringified.
fn tag_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_point(point: &Value) -> Option<Coord<f64>> {
    let latitude = point.get("lat")?.as_f64()?;
    let longitude = point.get("lon")?.as_f64()?;
    (latitude.is_finite() && longitude.is_finite()).then_some(Coord {
        x: longitude,
        y: latitude,
    })
}
