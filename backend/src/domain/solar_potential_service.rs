//! Solar potential service: fetch footprints, then enrich them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{BuildingSource, PotentialOutcome, SolarPotentialQuery};
use crate::domain::{BoundingBox, Error, FeatureCollection, PotentialCalculator};

/// Chains a [`BuildingSource`] and a [`PotentialCalculator`].
#[derive(Clone)]
pub struct SolarPotentialService {
    source: Arc<dyn BuildingSource>,
    calculator: PotentialCalculator,
}

impl SolarPotentialService {
    /// Build the service from a building source and calculator.
    pub fn new(source: Arc<dyn BuildingSource>, calculator: PotentialCalculator) -> Self {
        Self { source, calculator }
    }

    /// Fetch footprints inside `bounds`, or `None` when the source fails.
    ///
    /// Source errors are logged and absorbed; callers treat `None` as "no
    /// buildings".
    pub async fn fetch_buildings(&self, bounds: &BoundingBox) -> Option<FeatureCollection> {
        info!(
            south = bounds.south(),
            west = bounds.west(),
            north = bounds.north(),
            east = bounds.east(),
            "fetching building footprints"
        );
        match self.source.fetch_buildings(bounds).await {
            Ok(fetch) => {
                if fetch.skipped.total() > 0 {
                    warn!(
                        invalid_points = fetch.skipped.invalid_points,
                        too_few_points = fetch.skipped.too_few_points,
                        unsupported_type = fetch.skipped.unsupported_type,
                        "skipped upstream elements"
                    );
                }
                info!(
                    feature_count = fetch.collection.len(),
                    "fetched building footprints"
                );
                Some(fetch.collection)
            }
            Err(err) => {
                error!(error = %err, "building fetch failed");
                None
            }
        }
    }
}

#[async_trait]
impl SolarPotentialQuery for SolarPotentialService {
    async fn potential_for(&self, bounds: &BoundingBox) -> Result<PotentialOutcome, Error> {
        let Some(collection) = self.fetch_buildings(bounds).await else {
            return Ok(PotentialOutcome::NoBuildings);
        };
        if collection.is_empty() {
            return Ok(PotentialOutcome::NoBuildings);
        }

        let report = self.calculator.compute_potential(collection);
        info!(
            enriched = report.collection.len(),
            dropped_too_few_points = report.dropped.too_few_points,
            dropped_non_finite = report.dropped.non_finite_coordinates,
            dropped_invalid_geometry = report.dropped.invalid_geometry,
            epsg = report.zone.map(|zone| zone.epsg()),
            "computed solar potential"
        );
        Ok(PotentialOutcome::Computed(report))
    }
}
