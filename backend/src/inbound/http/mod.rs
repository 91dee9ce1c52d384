//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod geojson;
pub mod health;
pub mod potential;
pub mod routes;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
