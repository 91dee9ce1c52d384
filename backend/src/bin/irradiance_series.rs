//! Inspect NASA POWER irradiance for one point.
//!
//! `daily` prints a daily irradiance series as CSV; `estimate` reads the
//! annual climatology and prints the reference-system yield estimate.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use reqwest::Url;
use solar_backend::domain::estimate_site;
use solar_backend::domain::ports::{ClimateSource, IrradianceRequest, IrradianceSource};
use solar_backend::outbound::nasa_power::{
    DEFAULT_NASA_POWER_CLIMATOLOGY_URL, DEFAULT_NASA_POWER_URL, NasaPowerClimatologySource,
    NasaPowerHttpSource,
};
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// `irradiance-series` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "irradiance-series",
    about = "Inspect NASA POWER surface irradiance for one point",
    version,
    propagate_version = true
)]
struct CliArgs {
    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "seconds", default_value_t = 60)]
    timeout_seconds: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print daily all-sky irradiance (kWh/m²/day) as CSV.
    Daily(DailyArgs),
    /// Estimate yearly output of a 5 kW reference system from climatology.
    Estimate(EstimateArgs),
}

#[derive(Debug, Clone, Args)]
struct PointArgs {
    /// Latitude in WGS84 degrees.
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,
    /// Longitude in WGS84 degrees.
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,
}

#[derive(Debug, Clone, Args)]
struct DailyArgs {
    #[command(flatten)]
    point: PointArgs,
    /// First day as `YYYY-MM-DD` or `YYYYMMDD`.
    #[arg(long, value_name = "date", value_parser = parse_date)]
    start: NaiveDate,
    /// Last day as `YYYY-MM-DD` or `YYYYMMDD`.
    #[arg(long, value_name = "date", value_parser = parse_date)]
    end: NaiveDate,
    /// Daily point endpoint override.
    #[arg(long, value_name = "url", default_value = DEFAULT_NASA_POWER_URL)]
    endpoint: Url,
}

#[derive(Debug, Clone, Args)]
struct EstimateArgs {
    #[command(flatten)]
    point: PointArgs,
    /// Climatology point endpoint override.
    #[arg(long, value_name = "url", default_value = DEFAULT_NASA_POWER_CLIMATOLOGY_URL)]
    endpoint: Url,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(run(args))
}

async fn run(args: CliArgs) -> io::Result<()> {
    let timeout = Duration::from_secs(args.timeout_seconds.max(1));
    match args.command {
        Command::Daily(daily) => print_daily(daily, timeout).await,
        Command::Estimate(estimate) => print_estimate(estimate, timeout).await,
    }
}

async fn print_daily(args: DailyArgs, timeout: Duration) -> io::Result<()> {
    let source = NasaPowerHttpSource::new(args.endpoint, timeout)
        .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?;
    let request = IrradianceRequest {
        latitude: args.point.latitude,
        longitude: args.point.longitude,
        start: args.start,
        end: args.end,
    };

    let series = source
        .fetch_daily_irradiance(&request)
        .await
        .map_err(|error| io::Error::other(format!("irradiance fetch failed: {error}")))?;
    info!(days = series.days.len(), "fetched irradiance series");

    println!("date,kwh_per_sqm");
    for day in &series.days {
        println!("{},{}", day.date, day.kwh_per_sqm);
    }
    match series.mean() {
        Some(mean) => eprintln!("mean_kwh_per_sqm_per_day={mean:.3}"),
        None => eprintln!("no measured days in range"),
    }

    Ok(())
}

async fn print_estimate(args: EstimateArgs, timeout: Duration) -> io::Result<()> {
    let source = NasaPowerClimatologySource::new(args.endpoint, timeout)
        .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?;
    let climate = source
        .fetch_annual_climate(args.point.latitude, args.point.longitude)
        .await
        .map_err(|error| io::Error::other(format!("climatology fetch failed: {error}")))?;

    let estimate = estimate_site(climate);
    info!(suitable = estimate.suitable, "estimated reference system yield");
    println!(
        "irradiance_kwh_per_sqm_day={:.2}",
        climate.irradiance_kwh_per_sqm_day
    );
    println!("temperature_celsius={:.1}", climate.temperature_celsius);
    println!("efficiency_score={}", estimate.efficiency_score);
    println!("annual_production_kwh={}", estimate.annual_production_kwh);
    println!("co2_reduction_tonnes={:.2}", estimate.co2_reduction_tonnes);
    println!("suitable={}", estimate.suitable);

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y%m%d"))
        .map_err(|error| format!("expected YYYY-MM-DD or YYYYMMDD: {error}"))
}
