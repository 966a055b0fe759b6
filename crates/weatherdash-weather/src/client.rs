//! OpenWeatherMap 2.5 client.

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::WeatherError;
use crate::mock;
use crate::openweather::{CurrentResponse, ForecastResponse};
use crate::synthetic::SyntheticSource;
use crate::types::{Coordinates, DataSource, ForecastDay, WeatherReport, WeatherSnapshot};

const USER_AGENT: &str = concat!("weatherdash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Build a client for `base_url` (e.g. `https://api.openweathermap.org/data/2.5`).
    ///
    /// Without a `timeout` the transport default applies.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Current conditions for a city name.
    #[instrument(skip(self, source), level = "info")]
    pub async fn current_by_city<S: SyntheticSource + ?Sized>(
        &self,
        city: &str,
        source: &mut S,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let raw: CurrentResponse = self
            .get("weather", &[("q", city.to_string())], "City")
            .await?;
        raw.into_snapshot(source)
    }

    /// Current conditions for a position.
    #[instrument(skip(self, source), level = "info")]
    pub async fn current_by_coords<S: SyntheticSource + ?Sized>(
        &self,
        coords: Coordinates,
        source: &mut S,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let raw: CurrentResponse = self
            .get("weather", &coord_params(coords), "Location")
            .await?;
        raw.into_snapshot(source)
    }

    /// Five-day forecast, one entry per day.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, coords: Coordinates) -> Result<Vec<ForecastDay>, WeatherError> {
        let raw: ForecastResponse = self
            .get("forecast", &coord_params(coords), "Forecast")
            .await?;
        raw.into_days()
    }

    /// Current conditions plus forecast for a city name.
    ///
    /// Only the current-conditions request can fail the report; a failed
    /// forecast is replaced with a synthetic one.
    pub async fn report_by_city<R: Rng + ?Sized>(
        &self,
        city: &str,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<WeatherReport, WeatherError> {
        let current = self.current_by_city(city, rng).await?;
        let forecast = match current.coordinates {
            Some(coords) => self.forecast_or_synthetic(coords, rng, today).await,
            None => mock::forecast(rng, today),
        };

        Ok(WeatherReport {
            current,
            forecast,
            source: DataSource::Live,
        })
    }

    /// Current conditions plus forecast for a position.
    pub async fn report_by_coords<R: Rng + ?Sized>(
        &self,
        coords: Coordinates,
        rng: &mut R,
        today: NaiveDate,
    ) -> Result<WeatherReport, WeatherError> {
        let current = self.current_by_coords(coords, rng).await?;
        let forecast = self.forecast_or_synthetic(coords, rng, today).await;

        Ok(WeatherReport {
            current,
            forecast,
            source: DataSource::Live,
        })
    }

    async fn forecast_or_synthetic<R: Rng + ?Sized>(
        &self,
        coords: Coordinates,
        rng: &mut R,
        today: NaiveDate,
    ) -> Vec<ForecastDay> {
        match self.forecast(coords).await {
            Ok(days) => days,
            Err(e) => {
                tracing::warn!(error = %e, "Forecast unavailable, using synthetic forecast");
                mock::forecast(rng, today)
            }
        }
    }

    /// GET `endpoint` with the key and metric units, mapping HTTP failures.
    ///
    /// `subject` names what was looked up in the not-found error.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        subject: &'static str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(WeatherError::Unauthorized)
        } else if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            tracing::debug!(%status, endpoint, "Provider could not resolve lookup");
            Err(WeatherError::NotFound(subject))
        } else {
            Err(WeatherError::Unavailable(status.as_u16()))
        }
    }
}

fn coord_params(coords: Coordinates) -> [(&'static str, String); 2] {
    [("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}
