//! Irradiance-based yield estimate for a reference rooftop system.
//!
//! Where [`super::PotentialCalculator`] scales footprint area by a fixed
//! factor, this model starts from a site's long-term annual climate:
//!
//! ```text
//! efficiency_score = round(85 - max(0, (t2m - 25) * 0.4))
//! performance      = 0.75 * efficiency_score / 85
//! annual_kwh       = round(irradiance * 365 * 5 kW * performance)
//! co2_tonnes       = round2(annual_kwh * 0.00045)
//! suitable         = irradiance > 3.5
//! ```

/// Efficiency score of a panel at or below the reference temperature.
pub const BASE_EFFICIENCY_SCORE: f64 = 85.0;
/// Cell temperature above which efficiency starts dropping, in °C.
pub const REFERENCE_TEMPERATURE_CELSIUS: f64 = 25.0;
/// Score points lost per °C above the reference temperature.
pub const TEMPERATURE_LOSS_PER_DEGREE: f64 = 0.4;
/// Nameplate size of the reference system, in kW.
pub const REFERENCE_SYSTEM_KW: f64 = 5.0;
/// Performance ratio at the base efficiency score.
pub const BASE_PERFORMANCE_RATIO: f64 = 0.75;
/// Grid emissions avoided per kWh produced, in tonnes of CO2.
pub const CO2_TONNES_PER_KWH: f64 = 0.000_45;
/// Annual mean irradiance (kWh/m²/day) above which a site is suitable.
pub const SUITABLE_IRRADIANCE: f64 = 3.5;

const DAYS_PER_YEAR: f64 = 365.0;

/// Long-term annual climate of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualClimate {
    /// Mean all-sky surface irradiance in kWh/m²/day.
    pub irradiance_kwh_per_sqm_day: f64,
    /// Mean air temperature at 2 m in °C.
    pub temperature_celsius: f64,
}

/// Derived metrics for the reference system at one site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteEstimate {
    /// Input climate.
    pub climate: AnnualClimate,
    /// Temperature-adjusted efficiency score, 0 to 85.
    pub efficiency_score: f64,
    /// Yearly production in kWh, rounded to whole kWh.
    pub annual_production_kwh: f64,
    /// Avoided emissions in tonnes per year, rounded to two decimals.
    pub co2_reduction_tonnes: f64,
    /// Whether irradiance clears [`SUITABLE_IRRADIANCE`].
    pub suitable: bool,
}

/// Derive the reference-system metrics from a site's annual climate.
///
/// # Examples
/// ```
/// use solar_backend::domain::{AnnualClimate, estimate_site};
///
/// let estimate = estimate_site(AnnualClimate {
///     irradiance_kwh_per_sqm_day: 4.5,
///     temperature_celsius: 15.0,
/// });
/// assert_eq!(estimate.efficiency_score, 85.0);
/// assert_eq!(estimate.annual_production_kwh, 6159.0);
/// assert!(estimate.suitable);
/// ```
pub fn estimate_site(climate: AnnualClimate) -> SiteEstimate {
    let excess = (climate.temperature_celsius - REFERENCE_TEMPERATURE_CELSIUS).max(0.0);
    let efficiency_score = (BASE_EFFICIENCY_SCORE - excess * TEMPERATURE_LOSS_PER_DEGREE)
        .round()
        .max(0.0);
    let performance_ratio = BASE_PERFORMANCE_RATIO * efficiency_score / BASE_EFFICIENCY_SCORE;
    let annual_production_kwh = (climate.irradiance_kwh_per_sqm_day
        * DAYS_PER_YEAR
        * REFERENCE_SYSTEM_KW
        * performance_ratio)
        .round();
    let co2_reduction_tonnes = (annual_production_kwh * CO2_TONNES_PER_KWH * 100.0).round() / 100.0;

    SiteEstimate {
        climate,
        efficiency_score,
        annual_production_kwh,
        co2_reduction_tonnes,
        suitable: climate.irradiance_kwh_per_sqm_day > SUITABLE_IRRADIANCE,
    }
}
