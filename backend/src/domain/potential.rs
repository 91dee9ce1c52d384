//! Solar potential estimation for building footprints.
//!
//! The calculator validates each footprint, projects the survivors into a
//! planar UTM zone, measures their area and applies a linear yield model:
//!
//! ```text
//! potential_kwh = area_sqm * factor
//! level         = high   if potential_kwh > high_threshold
//!                 medium if potential_kwh > medium_threshold
//!                 low    otherwise
//! ```
//!
//! The default factor (288 kWh per m² per year) is a placeholder for an
//! irradiance-weighted model and is injected through [`PotentialModel`].

use geo::{Area, LineString, Polygon, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    BuildingFeature, EnrichedFeature, EnrichedFeatureCollection, FeatureCollection,
    ProjectionStrategy, UtmZone,
};

/// Average peak power per square metre of panel, in kWp/m².
pub const PEAK_POWER_DENSITY: f64 = 1.6;
/// Annual sunshine hours assumed for the deployment region.
pub const ANNUAL_SUN_HOURS: f64 = 1200.0;
/// Panel conversion efficiency.
pub const PANEL_EFFICIENCY: f64 = 0.15;
/// Default yield factor in kWh per m² per year (288).
pub const DEFAULT_POTENTIAL_FACTOR: f64 = PEAK_POWER_DENSITY * ANNUAL_SUN_HOURS * PANEL_EFFICIENCY;
/// Default lower bound (exclusive) of the `high` level, in kWh.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 2000.0;
/// Default lower bound (exclusive) of the `medium` level, in kWh.
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 500.0;

const MIN_RING_POINTS: usize = 3;
/// Smallest WGS84 footprint area, in square degrees, treated as a real
/// polygon (about 0.01 m² at the equator). Collinear rings land below it once
/// floating-point noise is accounted for.
const MIN_RING_AREA_SQ_DEG: f64 = 1e-12;

/// Qualitative bucket of estimated yearly yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotentialLevel {
    /// At or below the medium threshold.
    Low,
    /// Above the medium threshold, at or below the high threshold.
    Medium,
    /// Above the high threshold.
    High,
}

impl PotentialLevel {
    /// Lower-case label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for PotentialLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid yield model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PotentialModelError {
    /// The yield factor must be finite and strictly positive.
    #[error("potential factor must be a positive finite number, got {factor}")]
    InvalidFactor {
        /// Rejected factor.
        factor: f64,
    },
    /// Thresholds must be finite.
    #[error("level thresholds must be finite numbers")]
    NonFiniteThreshold,
    /// The medium threshold must sit strictly below the high threshold.
    #[error("medium threshold {medium} must be below high threshold {high}")]
    InvertedThresholds {
        /// Rejected medium threshold.
        medium: f64,
        /// Rejected high threshold.
        high: f64,
    },
}

/// The two breakpoints separating `low`, `medium` and `high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelThresholds {
    medium: f64,
    high: f64,
}

impl LevelThresholds {
    /// Build thresholds, requiring finite values with `medium < high`.
    pub fn try_new(medium: f64, high: f64) -> Result<Self, PotentialModelError> {
        if !medium.is_finite() || !high.is_finite() {
            return Err(PotentialModelError::NonFiniteThreshold);
        }
        if medium >= high {
            return Err(PotentialModelError::InvertedThresholds { medium, high });
        }
        Ok(Self { medium, high })
    }

    /// Exclusive lower bound of `medium`.
    pub fn medium(&self) -> f64 {
        self.medium
    }

    /// Exclusive lower bound of `high`.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Bucket a yearly yield.
    pub fn classify(&self, potential_kwh: f64) -> PotentialLevel {
        if potential_kwh > self.high {
            PotentialLevel::High
        } else if potential_kwh > self.medium {
            PotentialLevel::Medium
        } else {
            PotentialLevel::Low
        }
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            medium: DEFAULT_MEDIUM_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

/// Linear yield model: a factor applied to area, then bucketed.
///
/// # Examples
/// ```
/// use solar_backend::domain::{LevelThresholds, PotentialLevel, PotentialModel};
///
/// let model = PotentialModel::try_new(288.0, LevelThresholds::default()).expect("valid model");
/// assert_eq!(model.estimate(10.0), 2880.0);
/// assert_eq!(model.classify(2880.0), PotentialLevel::High);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialModel {
    factor: f64,
    thresholds: LevelThresholds,
}

impl PotentialModel {
    /// Build a model, rejecting non-positive or non-finite factors.
    pub fn try_new(factor: f64, thresholds: LevelThresholds) -> Result<Self, PotentialModelError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PotentialModelError::InvalidFactor { factor });
        }
        Ok(Self { factor, thresholds })
    }

    /// Yield factor in kWh per m² per year.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Level breakpoints.
    pub fn thresholds(&self) -> LevelThresholds {
        self.thresholds
    }

    /// Yearly yield for a footprint area.
    pub fn estimate(&self, area_sqm: f64) -> f64 {
        area_sqm * self.factor
    }

    /// Bucket a yearly yield.
    pub fn classify(&self, potential_kwh: f64) -> PotentialLevel {
        self.thresholds.classify(potential_kwh)
    }
}

impl Default for PotentialModel {
    fn default() -> Self {
        Self {
            factor: DEFAULT_POTENTIAL_FACTOR,
            thresholds: LevelThresholds::default(),
        }
    }
}

/// Why a footprint was left out of the enriched collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeatureRejection {
    /// The ring has fewer than three vertices.
    #[error("ring has {count} points, at least 3 are required")]
    TooFewPoints {
        /// Number of vertices found.
        count: usize,
    },
    /// A vertex is NaN or infinite.
    #[error("ring contains a non-finite coordinate")]
    NonFiniteCoordinate,
    /// The polygon self-intersects or has a degenerate ring.
    #[error("polygon is not topologically valid")]
    InvalidGeometry,
}

/// Number of features dropped per rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropCounts {
    /// Rings with fewer than three vertices.
    pub too_few_points: usize,
    /// Rings with NaN or infinite vertices.
    pub non_finite_coordinates: usize,
    /// Self-intersecting or degenerate polygons.
    pub invalid_geometry: usize,
}

impl DropCounts {
    fn record(&mut self, rejection: FeatureRejection) {
        match rejection {
            FeatureRejection::TooFewPoints { .. } => self.too_few_points += 1,
            FeatureRejection::NonFiniteCoordinate => self.non_finite_coordinates += 1,
            FeatureRejection::InvalidGeometry => self.invalid_geometry += 1,
        }
    }

    /// Total number of dropped features.
    pub fn total(&self) -> usize {
        self.too_few_points + self.non_finite_coordinates + self.invalid_geometry
    }
}

/// Result of one calculator pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PotentialReport {
    /// Enriched survivors, in input order.
    pub collection: EnrichedFeatureCollection,
    /// Features dropped during validation.
    pub dropped: DropCounts,
    /// Zone the survivors were measured in; `None` when nothing survived.
    pub zone: Option<UtmZone>,
}

/// Build a WGS84 polygon from a feature ring and check its validity.
///
/// # Examples
/// ```
/// use solar_backend::domain::{validate_feature, BuildingFeature, FeatureRejection};
///
/// let bowtie = BuildingFeature::from_lon_lat(
///     [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)],
///     Default::default(),
/// );
/// assert_eq!(validate_feature(&bowtie), Err(FeatureRejection::InvalidGeometry));
/// ```
pub fn validate_feature(feature: &BuildingFeature) -> Result<Polygon<f64>, FeatureRejection> {
    let count = feature.ring.len();
    if count < MIN_RING_POINTS {
        return Err(FeatureRejection::TooFewPoints { count });
    }
    if feature
        .ring
        .iter()
        .any(|coord| !coord.x.is_finite() || !coord.y.is_finite())
    {
        return Err(FeatureRejection::NonFiniteCoordinate);
    }
    let polygon = Polygon::new(LineString::new(feature.ring.clone()), Vec::new());
    if !polygon.is_valid() || polygon.unsigned_area() < MIN_RING_AREA_SQ_DEG {
        return Err(FeatureRejection::InvalidGeometry);
    }
    Ok(polygon)
}

/// Turns building footprints into enriched features.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PotentialCalculator {
    model: PotentialModel,
    projection: ProjectionStrategy,
}

impl PotentialCalculator {
    /// Build a calculator from a yield model and projection strategy.
    pub fn new(model: PotentialModel, projection: ProjectionStrategy) -> Self {
        Self { model, projection }
    }

    /// The yield model in use.
    pub fn model(&self) -> PotentialModel {
        self.model
    }

    /// Validate, project, measure and classify every feature.
    ///
    /// Invalid features are dropped and counted; they never fail the pass.
    pub fn compute_potential(&self, collection: FeatureCollection) -> PotentialReport {
        let mut dropped = DropCounts::default();
        let mut survivors = Vec::with_capacity(collection.len());
        for feature in collection.features {
            match validate_feature(&feature) {
                Ok(polygon) => survivors.push((feature, polygon)),
                Err(rejection) => dropped.record(rejection),
            }
        }

        if survivors.is_empty() {
            return PotentialReport {
                collection: EnrichedFeatureCollection::default(),
                dropped,
                zone: None,
            };
        }

        let zone = self
            .projection
            .resolve(survivors.iter().map(|(_, polygon)| polygon));
        let features = survivors
            .into_iter()
            .map(|(feature, polygon)| self.enrich(feature, &polygon, zone))
            .collect();

        PotentialReport {
            collection: EnrichedFeatureCollection { features },
            dropped,
            zone: Some(zone),
        }
    }

    fn enrich(
        &self,
        feature: BuildingFeature,
        polygon: &Polygon<f64>,
        zone: UtmZone,
    ) -> EnrichedFeature {
        let area_sqm = zone.project_polygon(polygon).unsigned_area();
        let potential_kwh = self.model.estimate(area_sqm);
        EnrichedFeature {
            feature,
            area_sqm,
            potential_kwh,
            potential_level: self.model.classify(potential_kwh),
        }
    }
}
