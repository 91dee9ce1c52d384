//! Reqwest-backed NASA POWER sources for daily series and annual climatology.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{IRRADIANCE_PARAMETER, POWER_DATE_FORMAT, PowerResponseDto, TEMPERATURE_PARAMETER};
use crate::domain::AnnualClimate;
use crate::domain::ports::{
    ClimateSource, IrradianceRequest, IrradianceSeries, IrradianceSource, IrradianceSourceError,
};

/// Daily point endpoint of the NASA POWER API.
pub const DEFAULT_NASA_POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
/// Climatology point endpoint of the NASA POWER API.
pub const DEFAULT_NASA_POWER_CLIMATOLOGY_URL: &str =
    "https://power.larc.nasa.gov/api/temporal/climatology/point";

const RENEWABLE_ENERGY_COMMUNITY: &str = "RE";

/// Irradiance source issuing one GET per request against a POWER endpoint.
pub struct NasaPowerHttpSource {
    client: Client,
    endpoint: Url,
}

impl NasaPowerHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IrradianceSource for NasaPowerHttpSource {
    async fn fetch_daily_irradiance(
        &self,
        request: &IrradianceRequest,
    ) -> Result<IrradianceSeries, IrradianceSourceError> {
        let query = build_query(request)?;
        debug!(endpoint = %self.endpoint, ?query, "requesting NASA POWER series");
        let body = get_body(&self.client, &self.endpoint, &query).await?;
        parse_series(&body)
    }
}

/// Climate source reading annual means from a POWER climatology endpoint.
pub struct NasaPowerClimatologySource {
    client: Client,
    endpoint: Url,
}

impl NasaPowerClimatologySource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ClimateSource for NasaPowerClimatologySource {
    async fn fetch_annual_climate(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AnnualClimate, IrradianceSourceError> {
        let query = build_climatology_query(latitude, longitude)?;
        debug!(endpoint = %self.endpoint, ?query, "requesting NASA POWER climatology");
        let body = get_body(&self.client, &self.endpoint, &query).await?;
        parse_climate(&body)
    }
}

async fn get_body(
    client: &Client,
    endpoint: &Url,
    query: &[(&'static str, String)],
) -> Result<Vec<u8>, IrradianceSourceError> {
    let response = client
        .get(endpoint.clone())
        .query(query)
        .send()
        .await
        .map_err(|error| IrradianceSourceError::transport(error.to_string()))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|error| IrradianceSourceError::transport(error.to_string()))?;
    if !status.is_success() {
        return Err(IrradianceSourceError::transport(format!(
            "status {}",
            status.as_u16()
        )));
    }
    Ok(body.to_vec())
}

fn parse_climate(body: &[u8]) -> Result<AnnualClimate, IrradianceSourceError> {
    let decoded: PowerResponseDto = serde_json::from_slice(body).map_err(|error| {
        IrradianceSourceError::decode(format!("invalid NASA POWER JSON payload: {error}"))
    })?;
    decoded.into_annual_climate()
}

fn parse_series(body: &[u8]) -> Result<IrradianceSeries, IrradianceSourceError> {
    let decoded: PowerResponseDto = serde_json::from_slice(body).map_err(|error| {
        IrradianceSourceError::decode(format!("invalid NASA POWER JSON payload: {error}"))
    })?;
    decoded.into_series()
}

fn build_query(
    request: &IrradianceRequest,
) -> Result<Vec<(&'static str, String)>, IrradianceSourceError> {
    validate_request(request)?;
    Ok(vec![
        ("parameters", IRRADIANCE_PARAMETER.to_owned()),
        ("community", RENEWABLE_ENERGY_COMMUNITY.to_owned()),
        ("longitude", request.longitude.to_string()),
        ("latitude", request.latitude.to_string()),
        ("start", request.start.format(POWER_DATE_FORMAT).to_string()),
        ("end", request.end.format(POWER_DATE_FORMAT).to_string()),
        ("format", "JSON".to_owned()),
    ])
}

fn build_climatology_query(
    latitude: f64,
    longitude: f64,
) -> Result<Vec<(&'static str, String)>, IrradianceSourceError> {
    validate_point(latitude, longitude)?;
    Ok(vec![
        (
            "parameters",
            format!("{IRRADIANCE_PARAMETER},{TEMPERATURE_PARAMETER}"),
        ),
        ("community", RENEWABLE_ENERGY_COMMUNITY.to_owned()),
        ("longitude", longitude.to_string()),
        ("latitude", latitude.to_string()),
        ("format", "JSON".to_owned()),
    ])
}

fn validate_point(latitude: f64, longitude: f64) -> Result<(), IrradianceSourceError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(IrradianceSourceError::invalid_request(
            "latitude must be within [-90, 90]",
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(IrradianceSourceError::invalid_request(
            "longitude must be within [-180, 180]",
        ));
    }
    Ok(())
}

fn validate_request(request: &IrradianceRequest) -> Result<(), IrradianceSourceError> {
    validate_point(request.latitude, request.longitude)?;
    if request.start > request.end {
        return Err(IrradianceSourceError::invalid_request(
            "start date must not be after end date",
        ));
    }
    Ok(())
}
