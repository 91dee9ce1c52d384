//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **overpass**: building footprints from the Overpass API
//!   (`BuildingSource`).
//! - **nasa_power**: daily irradiance from the NASA POWER API
//!   (`IrradianceSource`).
//!
//! Adapters are thin translators that convert between domain types and
//! transport representations. They contain no business logic.

pub mod nasa_power;
pub mod overpass;
