//! Driving port used by inbound adapters to request solar estimates.

use async_trait::async_trait;

use crate::domain::{BoundingBox, Error, PotentialReport};

/// What a potential query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PotentialOutcome {
    /// The fetch failed or returned no footprints.
    NoBuildings,
    /// Footprints were fetched and run through the calculator.
    Computed(PotentialReport),
}

/// Port for estimating the solar potential of every building in a box.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolarPotentialQuery: Send + Sync {
    /// Fetch, validate, measure and classify the buildings inside `bounds`.
    ///
    /// Upstream failures are absorbed into [`PotentialOutcome::NoBuildings`];
    /// an `Err` signals an unexpected internal failure.
    async fn potential_for(&self, bounds: &BoundingBox) -> Result<PotentialOutcome, Error>;
}
