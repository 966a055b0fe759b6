//! Fallback weather used when the provider cannot be reached, and for the
//! first-run demo. Never fails.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::synthetic::SyntheticSource;
use crate::types::{DataSource, ForecastDay, WeatherReport, WeatherSnapshot};

/// Label used when a coordinate lookup fails and no city name is known
pub const CURRENT_LOCATION_LABEL: &str = "Your Location";

pub const DEMO_COUNTRY: &str = "Demo";
pub const DEMO_DESCRIPTION: &str = "Partly Cloudy";
pub const DEMO_ICON: &str = "02d";

pub const FORECAST_DAYS: usize = 5;

const FORECAST_CONDITIONS: [&str; 5] = ["Sunny", "Cloudy", "Partly Cloudy", "Rainy", "Stormy"];

/// Random current conditions labeled with `city`
pub fn snapshot<R: Rng + ?Sized>(rng: &mut R, city: &str) -> WeatherSnapshot {
    let wind_tenths: u32 = rng.gen_range(0..=100);

    WeatherSnapshot {
        city: city.to_string(),
        country: DEMO_COUNTRY.to_string(),
        temperature: rng.gen_range(10..40),
        feels_like: rng.gen_range(10..40),
        humidity: rng.gen_range(30..80),
        pressure: rng.gen_range(1000..1100),
        wind_speed: f64::from(wind_tenths) / 10.0,
        visibility: rng.gen_range(5_000..=15_000),
        description: DEMO_DESCRIPTION.to_string(),
        icon: DEMO_ICON.to_string(),
        dew_point: rng.gen_range(5..20),
        wind_direction: rng.gen_range(0..360),
        uv_index: rng.uv_index(),
        precipitation_chance: rng.precipitation_chance(),
        coordinates: None,
    }
}

/// Five days starting at `today`.
///
/// Every day shares one base temperature and gets its own jitter in
/// `-4..=3`; high and low sit 3 °C either side of `base + jitter`. The
/// ordering of high and low is not checked.
pub fn forecast<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<ForecastDay> {
    let base: i32 = rng.gen_range(10..35);

    (0..FORECAST_DAYS)
        .map(|offset| {
            let jitter: i32 = rng.gen_range(-4..4);
            let description = FORECAST_CONDITIONS[rng.gen_range(0..FORECAST_CONDITIONS.len())];

            ForecastDay {
                date: today + Duration::days(offset as i64),
                high: base + jitter + 3,
                low: base + jitter - 3,
                description: description.to_string(),
                icon: DEMO_ICON.to_string(),
            }
        })
        .collect()
}

/// Complete synthetic report for `city`
pub fn report<R: Rng + ?Sized>(rng: &mut R, city: &str, today: NaiveDate) -> WeatherReport {
    let current = snapshot(rng, city);
    let forecast = forecast(rng, today);
    WeatherReport {
        current,
        forecast,
        source: DataSource::Synthetic,
    }
}
