//! Projection of weather data onto display values.
//!
//! Everything here is pure: the same report, units and clock reading always
//! produce the same views.

use chrono::NaiveDateTime;
use weatherdash_store::{FavoriteEntry, TemperatureUnit, WindUnit};
use weatherdash_weather::synthetic::{AIR_QUALITY_LABEL, PM25_READING};
use weatherdash_weather::{round_half_up, ForecastDay, WeatherIcon, WeatherReport, WeatherSnapshot};

use crate::display::{CurrentConditionsView, DisplayPort, FavoriteCard, ForecastCard, ListView};

pub const NO_FAVORITES: &str = "No favorites added yet. Add cities from home screen.";
pub const NO_RECENT_SEARCHES: &str = "No recent searches";

/// Units chosen in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
}

impl DisplayUnits {
    fn degrees(&self, celsius: i32) -> i32 {
        match self.temperature {
            TemperatureUnit::Celsius => celsius,
            unit => round_half_up(unit.from_celsius(f64::from(celsius))),
        }
    }

    fn temperature_symbol(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Live m/s values print as the provider sent them; generated ones
    /// always carry one decimal.
    fn wind(&self, meters_per_second: f64, synthetic: bool) -> String {
        match self.wind {
            WindUnit::Ms if synthetic => format!("{:.1} {}", meters_per_second, self.wind.label()),
            WindUnit::Ms => format!("{} {}", meters_per_second, self.wind.label()),
            unit => {
                let converted = unit.from_meters_per_second(meters_per_second);
                format!("{} {}", (converted * 10.0).round() / 10.0, unit.label())
            }
        }
    }
}

pub fn current_conditions(
    report: &WeatherReport,
    units: DisplayUnits,
    now: NaiveDateTime,
) -> CurrentConditionsView {
    let current: &WeatherSnapshot = &report.current;

    CurrentConditionsView {
        location: format!("{}, {}", current.city, current.country),
        date: now.format("%A, %B %-d, %Y").to_string(),
        temperature: units.degrees(current.temperature).to_string(),
        temperature_unit: units.temperature_symbol(),
        description: current.description.clone(),
        icon: WeatherIcon::from_code(&current.icon).unwrap_or(WeatherIcon::Sun),
        feels_like: format!("{}°", units.degrees(current.feels_like)),
        humidity: format!("{}%", current.humidity),
        wind_speed: units.wind(current.wind_speed, report.is_synthetic()),
        visibility: format!("{:.1} km", f64::from(current.visibility) / 1000.0),
        pressure: format!("{} hPa", current.pressure),
        dew_point: format!("{}°", units.degrees(current.dew_point)),
        wind_direction: format!("{}°", current.wind_direction),
        precipitation_chance: format!("{}%", current.precipitation_chance),
        uv_index: current.uv_index.to_string(),
        air_quality: AIR_QUALITY_LABEL.to_string(),
        pm25: PM25_READING.to_string(),
        synthetic: report.is_synthetic(),
    }
}

pub fn forecast_cards(days: &[ForecastDay], units: DisplayUnits) -> Vec<ForecastCard> {
    days.iter()
        .map(|day| ForecastCard {
            day: day.date.format("%a").to_string(),
            icon: WeatherIcon::from_code(&day.icon).unwrap_or(WeatherIcon::CloudSun),
            description: capitalize_words(&day.description),
            high: format!("{}°", units.degrees(day.high)),
            low: format!("{}°", units.degrees(day.low)),
        })
        .collect()
}

pub fn favorite_cards(entries: &[FavoriteEntry], units: DisplayUnits) -> ListView<FavoriteCard> {
    if entries.is_empty() {
        return ListView::Placeholder(NO_FAVORITES);
    }

    ListView::Items(
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| FavoriteCard {
                position: i + 1,
                city: entry.city.clone(),
                country: entry.country.clone(),
                temperature: format!("{}°", units.degrees(entry.temperature)),
            })
            .collect(),
    )
}

pub fn recent_tags(cities: &[String]) -> ListView<String> {
    if cities.is_empty() {
        ListView::Placeholder(NO_RECENT_SEARCHES)
    } else {
        ListView::Items(cities.to_vec())
    }
}

/// Wall-clock time as shown next to "Last updated"
pub fn clock_time(now: NaiveDateTime) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// Draw a report: current conditions, the whole forecast, and the timestamp.
pub fn render_report<D: DisplayPort + ?Sized>(
    display: &mut D,
    report: &WeatherReport,
    units: DisplayUnits,
    now: NaiveDateTime,
) {
    display.set_current_conditions(&current_conditions(report, units, now));
    display.set_forecast(&forecast_cards(&report.forecast, units));
    display.set_last_updated(&clock_time(now));
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
