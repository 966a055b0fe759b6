//! Weather data for weatherdash
//!
//! Fetches current conditions and a five-day forecast from OpenWeatherMap,
//! normalizes them into [`WeatherReport`]s, and generates synthetic data for
//! the values the provider does not supply or when it cannot be reached.

pub mod client;
pub mod error;
pub mod location;
pub mod mock;
pub mod openweather;
pub mod synthetic;
pub mod types;

pub use client::WeatherClient;
pub use error::{LocationError, WeatherError};
pub use location::{FixedLocation, LocationProvider};
pub use synthetic::SyntheticSource;
pub use types::*;
