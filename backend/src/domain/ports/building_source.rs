//! Driven port for fetching building footprints from a map-data API.
//!
//! The domain owns the request shape and the normalised response so the
//! potential service can stay adapter-agnostic.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{BoundingBox, FeatureCollection};

/// Upstream elements that did not become features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkippedElements {
    /// Elements with at least one missing or non-numeric point.
    pub invalid_points: usize,
    /// Elements with fewer than three points.
    pub too_few_points: usize,
    /// Elements of a type that cannot carry a footprint (e.g. nodes).
    pub unsupported_type: usize,
}

impl SkippedElements {
    /// Total number of skipped elements.
    pub fn total(&self) -> usize {
        self.invalid_points + self.too_few_points + self.unsupported_type
    }
}

/// Normalised footprints plus the bookkeeping for discarded elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildingFetch {
    /// Accepted building footprints, in upstream order.
    pub collection: FeatureCollection,
    /// Elements discarded while normalising.
    pub skipped: SkippedElements,
}

define_port_error! {
    /// Errors surfaced while fetching building footprints.
    pub enum BuildingSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "building source transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "building source timeout: {message}",
        /// Upstream rate-limited the request.
        RateLimited { message: String } =>
            "building source rate limited request: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "building source response decode failed: {message}",
        /// Upstream rejected the request as malformed.
        InvalidRequest { message: String } =>
            "building source request invalid: {message}",
    }
}

/// Port for querying building footprints inside a bounding box.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildingSource: Send + Sync {
    /// Fetch every building-tagged footprint inside `bounds`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use solar_backend::domain::BoundingBox;
    /// use solar_backend::domain::ports::{BuildingSource, FixtureBuildingSource};
    ///
    /// let source = FixtureBuildingSource;
    /// let bounds = BoundingBox::try_new(40.99, 29.0, 41.01, 29.02)?;
    /// let fetch = source.fetch_buildings(&bounds).await?;
    /// assert!(fetch.collection.is_empty());
    /// ```
    async fn fetch_buildings(
        &self,
        bounds: &BoundingBox,
    ) -> Result<BuildingFetch, BuildingSourceError>;
}

/// Fixture implementation returning no buildings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBuildingSource;

#[async_trait]
impl BuildingSource for FixtureBuildingSource {
    async fn fetch_buildings(
        &self,
        _bounds: &BoundingBox,
    ) -> Result<BuildingFetch, BuildingSourceError> {
        Ok(BuildingFetch::default())
    }
}
