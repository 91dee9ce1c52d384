//! Domain ports for the hexagonal boundary.
//!
//! Outbound adapters implement [`BuildingSource`], [`IrradianceSource`] and
//! [`ClimateSource`]; inbound adapters depend on [`SolarPotentialQuery`].

mod macros;
pub(crate) use macros::define_port_error;

mod building_source;
mod irradiance_source;
mod solar_potential_query;

#[cfg(test)]
pub use building_source::MockBuildingSource;
pub use building_source::{
    BuildingFetch, BuildingSource, BuildingSourceError, FixtureBuildingSource, SkippedElements,
};
pub use irradiance_source::{
    ClimateSource, DailyIrradiance, IrradianceRequest, IrradianceSeries, IrradianceSource,
    IrradianceSourceError,
};
#[cfg(test)]
pub use solar_potential_query::MockSolarPotentialQuery;
pub use solar_potential_query::{PotentialOutcome, SolarPotentialQuery};
