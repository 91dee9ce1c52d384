//! Driven ports for surface irradiance: daily series and annual climatology.
//!
//! Nothing on the request path consumes irradiance yet; the
//! `irradiance-series` tool uses both to inspect candidate replacements for
//! the fixed yield factor.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::define_port_error;
use crate::domain::AnnualClimate;

/// Daily irradiance query for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrradianceRequest {
    /// Latitude in WGS84 degrees.
    pub latitude: f64,
    /// Longitude in WGS84 degrees.
    pub longitude: f64,
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

/// All-sky surface shortwave irradiance for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyIrradiance {
    /// Calendar day.
    pub date: NaiveDate,
    /// Irradiance in kWh/m²/day.
    pub kwh_per_sqm: f64,
}

/// Date-ordered daily irradiance values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrradianceSeries {
    /// Days with a measured value, ascending.
    pub days: Vec<DailyIrradiance>,
}

impl IrradianceSeries {
    /// Mean daily irradiance, or `None` for an empty series.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use solar_backend::domain::ports::{DailyIrradiance, IrradianceSeries};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).expect("valid date");
    /// let series = IrradianceSeries {
    ///     days: vec![
    ///         DailyIrradiance { date: day(1), kwh_per_sqm: 2.0 },
    ///         DailyIrradiance { date: day(2), kwh_per_sqm: 4.0 },
    ///     ],
    /// };
    /// assert_eq!(series.mean(), Some(3.0));
    /// ```
    pub fn mean(&self) -> Option<f64> {
        if self.days.is_empty() {
            return None;
        }
        let total: f64 = self.days.iter().map(|day| day.kwh_per_sqm).sum();
        let count = self.days.len() as f64;
        Some(total / count)
    }
}

define_port_error! {
    /// Errors surfaced while fetching irradiance data.
    pub enum IrradianceSourceError {
        /// Network transport failed or upstream answered with an error status.
        Transport { message: String } =>
            "irradiance source transport failed: {message}",
        /// The response lacked the expected parameter block, had bad dates or
        /// reported a fill value where a measurement was required.
        Decode { message: String } =>
            "irradiance response decode failed: {message}",
        /// The request was rejected before execution.
        InvalidRequest { message: String } =>
            "irradiance request invalid: {message}",
    }
}

/// Port for querying a daily irradiance series.
#[async_trait]
pub trait IrradianceSource: Send + Sync {
    /// Fetch daily irradiance for one point and date range.
    async fn fetch_daily_irradiance(
        &self,
        request: &IrradianceRequest,
    ) -> Result<IrradianceSeries, IrradianceSourceError>;
}

/// Port for querying the long-term annual climate of one point.
#[async_trait]
pub trait ClimateSource: Send + Sync {
    /// Fetch annual mean irradiance and temperature at a WGS84 point.
    async fn fetch_annual_climate(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AnnualClimate, IrradianceSourceError>;
}
