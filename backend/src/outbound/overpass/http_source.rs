//! Reqwest-backed Overpass building source.
//!
//! This adapter owns transport details only: query text, timeout and HTTP
//! error mapping, and JSON decoding into domain footprints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::OverpassResponseDto;
use crate::domain::BoundingBox;
use crate::domain::ports::{BuildingFetch, BuildingSource, BuildingSourceError};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

const DEFAULT_OVERPASS_QUERY_TIMEOUT_SECONDS: u32 = 60;
const DEFAULT_USER_AGENT: &str = "rooftop-solar-backend/0.1";

/// Outbound identity and query timeout settings for Overpass requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassHttpIdentity {
    /// HTTP user-agent sent to Overpass.
    pub user_agent: String,
    /// Timeout directive embedded in Overpass query text.
    pub query_timeout_seconds: u32,
}

impl Default for OverpassHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            query_timeout_seconds: DEFAULT_OVERPASS_QUERY_TIMEOUT_SECONDS,
        }
    }
}

/// Building source that POSTs one query per bounding box to an Overpass
/// endpoint.
pub struct OverpassHttpSource {
    client: Client,
    endpoint: Url,
    user_agent: String,
    query_timeout_seconds: u32,
}

impl OverpassHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, timeout, OverpassHttpIdentity::default())
    }

    /// Build an adapter with explicit outbound identity and query timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        endpoint: Url,
        timeout: Duration,
        identity: OverpassHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            user_agent: identity.user_agent,
            query_timeout_seconds: identity.query_timeout_seconds.max(1),
        })
    }
}

#[async_trait]
impl BuildingSource for OverpassHttpSource {
    async fn fetch_buildings(
        &self,
        bounds: &BoundingBox,
    ) -> Result<BuildingFetch, BuildingSourceError> {
        let query = build_overpass_query(bounds, self.query_timeout_seconds);
        debug!(endpoint = %self.endpoint, query = %query, "sending Overpass query");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        debug!(transfer_bytes = body.len(), "received Overpass response");
        parse_buildings(body.as_ref())
    }
}

fn parse_buildings(body: &[u8]) -> Result<BuildingFetch, BuildingSourceError> {
    let decoded: OverpassResponseDto = serde_json::from_slice(body).map_err(|error| {
        BuildingSourceError::decode(format!("invalid Overpass JSON payload: {error}"))
    })?;
    Ok(decoded.into_fetch())
}

/// Ways and relations tagged `building`, with inline geometry.
fn build_overpass_query(bounds: &BoundingBox, query_timeout_seconds: u32) -> String {
    let bbox = format!(
        "({south},{west},{north},{east})",
        south = bounds.south(),
        west = bounds.west(),
        north = bounds.north(),
        east = bounds.east(),
    );
    let lines = ["way", "relation"]
        .into_iter()
        .map(|element_type| format!("  {element_type}[\"building\"]{bbox};"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("[out:json][timeout:{query_timeout_seconds}];\n(\n{lines}\n);\nout geom;")
}

fn map_transport_error(error: reqwest::Error) -> BuildingSourceError {
    if error.is_timeout() {
        BuildingSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        BuildingSourceError::decode(error.to_string())
    } else {
        BuildingSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BuildingSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => BuildingSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            BuildingSourceError::timeout(message)
        }
        _ if status.is_client_error() => BuildingSourceError::invalid_request(message),
        _ => BuildingSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
