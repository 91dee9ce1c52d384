//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::SolarPotentialQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Use-case behind `POST /api/potential`.
    pub potential: Arc<dyn SolarPotentialQuery>,
}

impl HttpState {
    /// Construct state from the potential query port.
    pub fn new(potential: Arc<dyn SolarPotentialQuery>) -> Self {
        Self { potential }
    }
}
