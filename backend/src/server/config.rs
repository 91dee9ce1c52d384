//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;
use solar_backend::domain::PotentialCalculator;
use solar_backend::outbound::overpass::OverpassHttpIdentity;
use solar_backend::settings::{SettingsError, SolarSettings};

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) overpass_url: Url,
    pub(crate) overpass_timeout: Duration,
    pub(crate) overpass_identity: OverpassHttpIdentity,
    pub(crate) calculator: PotentialCalculator,
}

impl ServerConfig {
    /// Validate raw settings into a server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when any setting fails validation.
    pub fn from_settings(settings: &SolarSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            overpass_url: settings.overpass_url()?,
            overpass_timeout: settings.overpass_timeout(),
            overpass_identity: settings.overpass_identity(),
            calculator: settings.calculator()?,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
