//! Building footprints before and after enrichment.
//!
//! Rings hold `(longitude, latitude)` pairs as [`Coord`] values (`x` is
//! longitude) in the order the upstream source returned them. Rings are never
//! closed by repeating the first vertex.

use std::collections::BTreeMap;

use geo::Coord;

use super::PotentialLevel;

/// Free-form tags carried over verbatim from the source element.
pub type Properties = BTreeMap<String, String>;

/// One building footprint as returned by a [`BuildingSource`](super::ports::BuildingSource).
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingFeature {
    /// Outer ring in source order.
    pub ring: Vec<Coord<f64>>,
    /// Source tags.
    pub properties: Properties,
}

impl BuildingFeature {
    /// Build a feature from `(longitude, latitude)` pairs.
    ///
    /// # Examples
    /// ```
    /// use solar_backend::domain::BuildingFeature;
    ///
    /// let feature = BuildingFeature::from_lon_lat(
    ///     [(29.0, 41.0), (29.001, 41.0), (29.0, 41.001)],
    ///     Default::default(),
    /// );
    /// assert_eq!(feature.ring.len(), 3);
    /// ```
    pub fn from_lon_lat(
        points: impl IntoIterator<Item = (f64, f64)>,
        properties: Properties,
    ) -> Self {
        Self {
            ring: points
                .into_iter()
                .map(|(x, y)| Coord { x, y })
                .collect(),
            properties,
        }
    }
}

/// Ordered building footprints for one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    /// Features in upstream element order.
    pub features: Vec<BuildingFeature>,
}

impl FeatureCollection {
    /// Wrap a list of features.
    pub fn new(features: Vec<BuildingFeature>) -> Self {
        Self { features }
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A building feature with its derived solar estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFeature {
    /// Original geometry and tags.
    pub feature: BuildingFeature,
    /// Projected planar footprint area in square metres.
    pub area_sqm: f64,
    /// Estimated yearly yield in kWh.
    pub potential_kwh: f64,
    /// Qualitative bucket for `potential_kwh`.
    pub potential_level: PotentialLevel,
}

/// Enriched features that survived validation, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnrichedFeatureCollection {
    /// Enriched features.
    pub features: Vec<EnrichedFeature>,
}

impl EnrichedFeatureCollection {
    /// Number of enriched features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no feature survived.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
