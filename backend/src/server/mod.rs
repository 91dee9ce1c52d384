//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing::info;

use solar_backend::Trace;
use solar_backend::domain::SolarPotentialService;
use solar_backend::inbound::http::health::HealthState;
use solar_backend::inbound::http::routes::configure;
use solar_backend::inbound::http::state::HttpState;
use solar_backend::outbound::overpass::OverpassHttpSource;

/// Wire the Overpass adapter and calculator into the HTTP state.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let source = OverpassHttpSource::with_identity(
        config.overpass_url.clone(),
        config.overpass_timeout,
        config.overpass_identity.clone(),
    )
    .map_err(|err| std::io::Error::other(format!("build Overpass client: {err}")))?;
    let service = SolarPotentialService::new(Arc::new(source), config.calculator);
    Ok(HttpState::new(Arc::new(service)))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when building the client or binding the
/// socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .bind(config.bind_addr())?
    .run();

    info!(
        bind_addr = %config.bind_addr(),
        overpass_url = %config.overpass_url,
        "solar potential server listening"
    );
    health_state.mark_ready();
    Ok(server)
}
