//! OpenWeatherMap 2.5 response shapes and their normalization.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::error::WeatherError;
use crate::synthetic::SyntheticSource;
use crate::types::{dew_point, round_half_up, Coordinates, ForecastDay, WeatherSnapshot};

/// Forecast samples are three hours apart; every eighth one is a day later.
pub const SAMPLES_PER_DAY: usize = 8;
pub const MAX_FORECAST_DAYS: usize = 5;

/// The provider caps visibility at 10 km and omits it in some responses.
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

/// `GET /weather`
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub coord: Coord,
    pub sys: Sys,
    pub main: Main,
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Main {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

/// `GET /forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSample>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub main: Main,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl CurrentResponse {
    /// Map the raw response onto a snapshot, filling synthetic fields from `source`.
    pub fn into_snapshot<S: SyntheticSource + ?Sized>(
        self,
        source: &mut S,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("response has no weather conditions".into()))?;

        let wind_direction = self
            .wind
            .deg
            .map(|deg| round_half_up(deg).rem_euclid(360) as u16)
            .unwrap_or(0);

        Ok(WeatherSnapshot {
            city: self.name,
            country: self.sys.country.unwrap_or_default(),
            temperature: round_half_up(self.main.temp),
            feels_like: round_half_up(self.main.feels_like),
            humidity: self.main.humidity.round().clamp(0.0, 100.0) as u8,
            pressure: self.main.pressure.round().max(0.0) as u32,
            wind_speed: self.wind.speed,
            visibility: self.visibility.unwrap_or(DEFAULT_VISIBILITY_M).max(0.0) as u32,
            description: condition.description,
            icon: condition.icon,
            dew_point: dew_point(self.main.temp, self.main.humidity),
            wind_direction,
            uv_index: source.uv_index(),
            precipitation_chance: source.precipitation_chance(),
            coordinates: Some(Coordinates::new(self.coord.lat, self.coord.lon)),
        })
    }
}

impl ForecastResponse {
    /// Downsample the 3-hour series to one sample per day, at most five days.
    pub fn into_days(self) -> Result<Vec<ForecastDay>, WeatherError> {
        self.list
            .into_iter()
            .step_by(SAMPLES_PER_DAY)
            .take(MAX_FORECAST_DAYS)
            .map(ForecastSample::into_day)
            .collect()
    }
}

impl ForecastSample {
    fn into_day(self) -> Result<ForecastDay, WeatherError> {
        let date = sample_date(self.dt)?;
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse(format!("forecast sample {} has no conditions", self.dt)))?;

        Ok(ForecastDay {
            date,
            high: round_half_up(self.main.temp_max.unwrap_or(self.main.temp)),
            low: round_half_up(self.main.temp_min.unwrap_or(self.main.temp)),
            description: condition.description,
            icon: condition.icon,
        })
    }
}

fn sample_date(dt: i64) -> Result<NaiveDate, WeatherError> {
    DateTime::from_timestamp(dt, 0)
        .map(|ts| ts.date_naive())
        .ok_or_else(|| WeatherError::Parse(format!("invalid forecast timestamp {}", dt)))
}
