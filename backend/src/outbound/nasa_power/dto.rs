//! DTOs for NASA POWER point responses.
//!
//! Daily and climatology endpoints share one envelope: a `parameter` map from
//! parameter name to a map of period key (`YYYYMMDD`, or `JAN`..`DEC` and
//! `ANN`) to value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::AnnualClimate;
use crate::domain::ports::{DailyIrradiance, IrradianceSeries, IrradianceSourceError};

/// All-sky surface shortwave irradiance, kWh/m²/day.
pub(super) const IRRADIANCE_PARAMETER: &str = "ALLSKY_SFC_SW_DWN";
/// Air temperature at 2 m, °C.
pub(super) const TEMPERATURE_PARAMETER: &str = "T2M";
/// Climatology key holding the annual mean.
const ANNUAL_KEY: &str = "ANN";
/// Date format used in requests and in the parameter map keys.
pub(super) const POWER_DATE_FORMAT: &str = "%Y%m%d";
/// POWER marks missing days with this value.
const FILL_VALUE: f64 = -999.0;

#[derive(Debug, Deserialize)]
pub(super) struct PowerResponseDto {
    properties: PowerPropertiesDto,
}

#[derive(Debug, Deserialize)]
struct PowerPropertiesDto {
    parameter: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PowerResponseDto {
    fn parameter(&self, name: &str) -> Result<&BTreeMap<String, f64>, IrradianceSourceError> {
        self.properties.parameter.get(name).ok_or_else(|| {
            IrradianceSourceError::decode(format!("response is missing parameter {name}"))
        })
    }

    fn annual_mean(&self, name: &str) -> Result<f64, IrradianceSourceError> {
        let value = self
            .parameter(name)?
            .get(ANNUAL_KEY)
            .copied()
            .ok_or_else(|| {
                IrradianceSourceError::decode(format!("parameter {name} has no {ANNUAL_KEY} value"))
            })?;
        if value <= FILL_VALUE || !value.is_finite() {
            return Err(IrradianceSourceError::decode(format!(
                "parameter {name} reports no annual measurement"
            )));
        }
        Ok(value)
    }

    pub(super) fn into_annual_climate(self) -> Result<AnnualClimate, IrradianceSourceError> {
        Ok(AnnualClimate {
            irradiance_kwh_per_sqm_day: self.annual_mean(IRRADIANCE_PARAMETER)?,
            temperature_celsius: self.annual_mean(TEMPERATURE_PARAMETER)?,
        })
    }

    pub(super) fn into_series(self) -> Result<IrradianceSeries, IrradianceSourceError> {
        let values = self.parameter(IRRADIANCE_PARAMETER)?;

        let mut days = Vec::with_capacity(values.len());
        for (key, value) in values {
            let date = NaiveDate::parse_from_str(key, POWER_DATE_FORMAT).map_err(|error| {
                IrradianceSourceError::decode(format!("invalid date key `{key}`: {error}"))
            })?;
            if *value <= FILL_VALUE || !value.is_finite() {
                continue;
            }
            days.push(DailyIrradiance {
                date,
                kwh_per_sqm: *value,
            });
        }
        days.sort_by_key(|day| day.date);
        Ok(IrradianceSeries { days })
    }
}
