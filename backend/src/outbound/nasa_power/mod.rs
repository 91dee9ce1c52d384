//! NASA POWER outbound adapters.
//!
//! Provides the daily all-sky irradiance implementation of the
//! `IrradianceSource` port and the annual climatology implementation of the
//! `ClimateSource` port.

mod dto;
mod http_source;

pub use http_source::{
    DEFAULT_NASA_POWER_CLIMATOLOGY_URL, DEFAULT_NASA_POWER_URL, NasaPowerClimatologySource,
    NasaPowerHttpSource,
};
