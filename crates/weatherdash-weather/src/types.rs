use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Current conditions for one city at one point in time.
///
/// Temperatures are whole degrees Celsius, visibility is meters and wind
/// speed is m/s. `uv_index` and `precipitation_chance` are synthetic: the
/// provider tier used does not report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub visibility: u32,
    pub description: String,
    pub icon: String,
    pub dew_point: i32,
    pub wind_direction: u16,
    pub uv_index: u8,
    pub precipitation_chance: u8,
    /// Present for live data; used to request the forecast
    pub coordinates: Option<Coordinates>,
}

/// One day of the five-day forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub high: i32,
    pub low: i32,
    pub description: String,
    pub icon: String,
}

/// Where a report's numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Synthetic,
}

/// Everything the dashboard renders for one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub source: DataSource,
}

impl WeatherReport {
    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Visual indicator for a provider icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    Cloud,
    CloudRain,
    CloudSunRain,
    CloudMoonRain,
    Bolt,
    Snowflake,
    Smog,
}

impl WeatherIcon {
    /// Look up an OpenWeatherMap icon code such as `"10d"`.
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_code(code: &str) -> Option<Self> {
        let icon = match code {
            "01d" => Self::Sun,
            "01n" => Self::Moon,
            "02d" => Self::CloudSun,
            "02n" => Self::CloudMoon,
            "03d" | "03n" | "04d" | "04n" => Self::Cloud,
            "09d" | "09n" => Self::CloudRain,
            "10d" => Self::CloudSunRain,
            "10n" => Self::CloudMoonRain,
            "11d" | "11n" => Self::Bolt,
            "13d" | "13n" => Self::Snowflake,
            "50d" | "50n" => Self::Smog,
            _ => return None,
        };
        Some(icon)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::CloudSun => "cloud-sun",
            Self::CloudMoon => "cloud-moon",
            Self::Cloud => "cloud",
            Self::CloudRain => "cloud-rain",
            Self::CloudSunRain => "cloud-sun-rain",
            Self::CloudMoonRain => "cloud-moon-rain",
            Self::Bolt => "bolt",
            Self::Snowflake => "snowflake",
            Self::Smog => "smog",
        }
    }

    /// Terminal glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Moon => "☾",
            Self::CloudSun => "⛅",
            Self::CloudMoon => "☁☾",
            Self::Cloud => "☁",
            Self::CloudRain => "🌧",
            Self::CloudSunRain => "🌦",
            Self::CloudMoonRain => "🌧☾",
            Self::Bolt => "⚡",
            Self::Snowflake => "❄",
            Self::Smog => "🌫",
        }
    }
}

/// Round half toward positive infinity (`15.5` → `16`, `-2.5` → `-2`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Dew point approximation: `temperature - (100 - humidity) / 5`.
///
/// Only reasonable above ~50% relative humidity, where it stays within about
/// 1 °C of the Magnus formula. Kept as-is; displayed values depend on it.
pub fn dew_point(temperature: f64, humidity: f64) -> i32 {
    round_half_up(temperature - ((100.0 - humidity) / 5.0))
}
