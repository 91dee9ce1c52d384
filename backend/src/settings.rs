//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SOLAR_*` environment variables and config
//! files. Every field is optional; accessors fall back to the defaults below
//! and the domain conversions reject inconsistent combinations before the
//! server starts.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::potential::{
    DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD, DEFAULT_POTENTIAL_FACTOR,
};
use crate::domain::projection::DEFAULT_UTM_ZONE;
use crate::domain::{
    Hemisphere, LevelThresholds, PotentialCalculator, PotentialModel, PotentialModelError,
    ProjectionError, ProjectionStrategy, UtmZone,
};
use crate::outbound::overpass::{DEFAULT_OVERPASS_URL, OverpassHttpIdentity};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_OVERPASS_TIMEOUT_SECONDS: u32 = 60;
const DEFAULT_USER_AGENT: &str = "rooftop-solar-backend/0.1";

/// `utm_zone` value selecting the zone from the data.
pub const AUTO_UTM_ZONE: u8 = 0;

/// Failures turning raw settings into runtime configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `overpass_url` is not an absolute URL.
    #[error("invalid Overpass URL `{value}`: {message}")]
    InvalidOverpassUrl {
        /// Rejected value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// Factor or thresholds are unusable.
    #[error(transparent)]
    Model(#[from] PotentialModelError),
    /// `utm_hemisphere` names neither hemisphere.
    #[error("invalid UTM hemisphere `{value}`: expected `north` or `south`")]
    InvalidHemisphere {
        /// Rejected value.
        value: String,
    },
    /// `utm_zone` is outside 0..=60.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Configuration for the solar potential service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOLAR")]
pub struct SolarSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Overpass interpreter endpoint.
    pub overpass_url: Option<String>,
    /// Overpass request and query timeout in seconds.
    pub overpass_timeout_seconds: Option<u32>,
    /// User-Agent sent to Overpass.
    pub user_agent: Option<String>,
    /// kWh per square metre per year.
    pub potential_factor: Option<f64>,
    /// Lower bound (exclusive) of the `high` level in kWh.
    pub high_threshold: Option<f64>,
    /// Lower bound (exclusive) of the `medium` level in kWh.
    pub medium_threshold: Option<f64>,
    /// UTM zone used for area measurement; `0` picks the zone from the data.
    pub utm_zone: Option<u8>,
    /// Hemisphere of a fixed zone: `north` (326xx) or `south` (327xx).
    pub utm_hemisphere: Option<String>,
}

impl SolarSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Overpass endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidOverpassUrl`] when the value does not
    /// parse.
    pub fn overpass_url(&self) -> Result<Url, SettingsError> {
        let value = self.overpass_url.as_deref().unwrap_or(DEFAULT_OVERPASS_URL);
        Url::parse(value).map_err(|err| SettingsError::InvalidOverpassUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Overpass timeout in seconds, never below one.
    pub fn overpass_timeout_seconds(&self) -> u32 {
        self.overpass_timeout_seconds
            .unwrap_or(DEFAULT_OVERPASS_TIMEOUT_SECONDS)
            .max(1)
    }

    /// HTTP client timeout for Overpass calls.
    pub fn overpass_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.overpass_timeout_seconds()))
    }

    /// Outbound identity for the Overpass adapter.
    pub fn overpass_identity(&self) -> OverpassHttpIdentity {
        OverpassHttpIdentity {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            query_timeout_seconds: self.overpass_timeout_seconds(),
        }
    }

    /// Yield model built from the factor and thresholds.
    ///
    /// # Errors
    ///
    /// Propagates [`PotentialModelError`] for non-positive factors or
    /// inverted thresholds.
    pub fn potential_model(&self) -> Result<PotentialModel, SettingsError> {
        let thresholds = LevelThresholds::try_new(
            self.medium_threshold.unwrap_or(DEFAULT_MEDIUM_THRESHOLD),
            self.high_threshold.unwrap_or(DEFAULT_HIGH_THRESHOLD),
        )?;
        let factor = self.potential_factor.unwrap_or(DEFAULT_POTENTIAL_FACTOR);
        Ok(PotentialModel::try_new(factor, thresholds)?)
    }

    /// Projection strategy for area measurement.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::ZoneOutOfRange`] for zones above 60 and
    /// [`SettingsError::InvalidHemisphere`] for unknown hemisphere names.
    pub fn projection(&self) -> Result<ProjectionStrategy, SettingsError> {
        let zone = self.utm_zone.unwrap_or(DEFAULT_UTM_ZONE);
        if zone == AUTO_UTM_ZONE {
            return Ok(ProjectionStrategy::Auto);
        }
        let hemisphere = match self.utm_hemisphere.as_deref() {
            None => Hemisphere::North,
            Some(value) => {
                parse_hemisphere(value).ok_or_else(|| SettingsError::InvalidHemisphere {
                    value: value.to_owned(),
                })?
            }
        };
        Ok(ProjectionStrategy::Fixed(UtmZone::new(zone, hemisphere)?))
    }

    /// Calculator combining [`Self::potential_model`] and [`Self::projection`].
    ///
    /// # Errors
    ///
    /// Propagates either conversion failure.
    pub fn calculator(&self) -> Result<PotentialCalculator, SettingsError> {
        Ok(PotentialCalculator::new(
            self.potential_model()?,
            self.projection()?,
        ))
    }
}

fn parse_hemisphere(value: &str) -> Option<Hemisphere> {
    match value.trim().to_ascii_lowercase().as_str() {
        "north" | "n" => Some(Hemisphere::North),
        "south" | "s" => Some(Hemisphere::South),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and domain conversion.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 9] = [
        "SOLAR_BIND_ADDR",
        "SOLAR_OVERPASS_URL",
        "SOLAR_OVERPASS_TIMEOUT_SECONDS",
        "SOLAR_USER_AGENT",
        "SOLAR_POTENTIAL_FACTOR",
        "SOLAR_HIGH_THRESHOLD",
        "SOLAR_MEDIUM_THRESHOLD",
        "SOLAR_UTM_ZONE",
        "SOLAR_UTM_HEMISPHERE",
    ];

    /// Every `SOLAR_*` key, unset unless listed in `overrides`.
    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        KEYS.into_iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (*value).to_owned());
                (key, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> SolarSettings {
        SolarSettings::load_from_iter([OsString::from("solar-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal addr")
        );
        assert_eq!(
            settings.overpass_url().expect("default url").as_str(),
            DEFAULT_OVERPASS_URL
        );
        assert_eq!(settings.overpass_timeout(), Duration::from_secs(60));
        assert_eq!(settings.overpass_identity().user_agent, DEFAULT_USER_AGENT);

        let model = settings.potential_model().expect("default model");
        assert_eq!(model.factor(), 288.0);
        assert_eq!(model.thresholds().high(), 2000.0);
        assert_eq!(model.thresholds().medium(), 500.0);

        let ProjectionStrategy::Fixed(zone) = settings.projection().expect("default zone") else {
            panic!("default projection should be fixed");
        };
        assert_eq!(zone.epsg(), 32635);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("SOLAR_BIND_ADDR", "127.0.0.1:9000"),
            ("SOLAR_OVERPASS_TIMEOUT_SECONDS", "15"),
            ("SOLAR_USER_AGENT", "roof-audit/2"),
            ("SOLAR_HIGH_THRESHOLD", "20000"),
            ("SOLAR_MEDIUM_THRESHOLD", "5000"),
            ("SOLAR_UTM_ZONE", "31"),
            ("SOLAR_UTM_HEMISPHERE", "true"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("addr").to_string(),
            "127.0.0.1:9000"
        );
        let identity = settings.overpass_identity();
        assert_eq!(identity.user_agent, "roof-audit/2");
        assert_eq!(identity.query_timeout_seconds, 15);
        let thresholds = settings.potential_model().expect("model").thresholds();
        assert_eq!((thresholds.medium(), thresholds.high()), (5000.0, 20000.0));
        assert_eq!(
            settings.projection().expect("projection"),
            ProjectionStrategy::Fixed(
                UtmZone::new(31, Hemisphere::South).expect("valid zone")
            )
        );
    }

    #[rstest]
    fn zone_zero_selects_automatic_projection() {
        let settings = SolarSettings {
            utm_zone: Some(AUTO_UTM_ZONE),
            ..SolarSettings::default()
        };
        assert_eq!(settings.projection(), Ok(ProjectionStrategy::Auto));
    }

    #[rstest]
    #[case::zone(SolarSettings { utm_zone: Some(61), ..SolarSettings::default() })]
    #[case::inverted(SolarSettings {
        medium_threshold: Some(3000.0),
        high_threshold: Some(1000.0),
        ..SolarSettings::default()
    })]
    #[case::factor(SolarSettings { potential_factor: Some(0.0), ..SolarSettings::default() })]
    #[case::url(SolarSettings { overpass_url: Some("not a url".to_owned()), ..SolarSettings::default() })]
    fn invalid_combinations_are_rejected(#[case] settings: SolarSettings) {
        let outcome = settings
            .calculator()
            .map(|_| ())
            .and_then(|()| settings.overpass_url().map(|_| ()));
        assert!(outcome.is_err());
    }

    #[rstest]
    #[case::full("south", Hemisphere::South)]
    #[case::short_upper("N", Hemisphere::North)]
    #[case::padded(" South ", Hemisphere::South)]
    fn hemisphere_names_are_parsed(#[case] value: &str, #[case] expected: Hemisphere) {
        let settings = SolarSettings {
            utm_zone: Some(35),
            utm_hemisphere: Some(value.to_owned()),
            ..SolarSettings::default()
        };
        let ProjectionStrategy::Fixed(zone) = settings.projection().expect("projection") else {
            panic!("explicit zone should be fixed");
        };
        assert_eq!(zone, UtmZone::new(35, expected).expect("valid zone"));
    }

    #[rstest]
    fn unknown_hemisphere_is_reported() {
        let settings = SolarSettings {
            utm_hemisphere: Some("true".to_owned()),
            ..SolarSettings::default()
        };
        assert_eq!(
            settings.projection(),
            Err(SettingsError::InvalidHemisphere {
                value: "true".to_owned()
            })
        );
    }

    #[rstest]
    fn bad_bind_addr_is_reported() {
        let settings = SolarSettings {
            bind_addr: Some("localhost".to_owned()),
            ..SolarSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
