//! Route table for the HTTP adapter.
//!
//! ```text
//! POST /api/potential  Estimate rooftop solar yield inside a bounding box
//! GET  /health/ready   Readiness probe
//! GET  /health/live    Liveness probe
//! ```

use actix_web::web;

use crate::inbound::http::health::{live, ready};
use crate::inbound::http::potential::compute_potential;

/// Register every endpoint on `cfg`.
///
/// Callers supply `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use solar_backend::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(compute_potential))
        .service(ready)
        .service(live);
}
