//! Typed access to the stored preference keys.
//!
//! Values are plain strings or JSON documents under un-namespaced keys.
//! Anything absent or unreadable reads back as the default.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::lists::{Favorites, RecentSearches};

pub const FAVORITES_KEY: &str = "favorites";
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const TEMP_UNIT_KEY: &str = "tempUnit";
pub const WIND_UNIT_KEY: &str = "windUnit";

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "celsius" | "c" | "metric" => Some(Self::Celsius),
            "fahrenheit" | "f" | "imperial" => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// Convert a Celsius reading into this unit
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

/// Wind speed display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Ms,
    Kmh,
    Mph,
}

impl WindUnit {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ms" | "m/s" => Some(Self::Ms),
            "kmh" | "km/h" => Some(Self::Kmh),
            "mph" => Some(Self::Mph),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ms => "ms",
            Self::Kmh => "kmh",
            Self::Mph => "mph",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ms => "m/s",
            Self::Kmh => "km/h",
            Self::Mph => "mph",
        }
    }

    /// Convert a m/s reading into this unit
    pub fn from_meters_per_second(&self, speed: f64) -> f64 {
        match self {
            Self::Ms => speed,
            Self::Kmh => speed * 3.6,
            Self::Mph => speed * 2.236_936,
        }
    }
}

/// Typed view over a [`KeyValueStore`]
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn favorites(&self) -> Favorites {
        Favorites::from_entries(self.read_json_list(FAVORITES_KEY))
    }

    /// Replace the stored favorites with `favorites` in full
    pub fn save_favorites(&self, favorites: &Favorites) -> Result<(), StoreError> {
        self.write_json(FAVORITES_KEY, favorites.entries())
    }

    pub fn recent_searches(&self) -> RecentSearches {
        RecentSearches::from_cities(self.read_json_list(RECENT_SEARCHES_KEY))
    }

    pub fn save_recent_searches(&self, recent: &RecentSearches) -> Result<(), StoreError> {
        self.write_json(RECENT_SEARCHES_KEY, recent.cities())
    }

    pub fn dark_mode(&self) -> bool {
        self.raw(DARK_MODE_KEY).as_deref() == Some("true")
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<(), StoreError> {
        self.store
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.raw(TEMP_UNIT_KEY)
            .and_then(|v| TemperatureUnit::parse(&v))
            .unwrap_or_default()
    }

    pub fn wind_unit(&self) -> WindUnit {
        self.raw(WIND_UNIT_KEY)
            .and_then(|v| WindUnit::parse(&v))
            .unwrap_or_default()
    }

    /// Read a key as stored; read failures are logged and treated as absent.
    pub fn raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read preference");
                None
            }
        }
    }

    /// Store `value` under `key` verbatim
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.store.set(key, value)
    }

    /// Read a stored JSON array, skipping elements that no longer parse so one
    /// bad entry does not take the rest of the list with it.
    fn read_json_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.raw(key) else {
            return Vec::new();
        };

        let items: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed stored value");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "Skipping malformed stored entry");
                    None
                }
            })
            .collect()
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}
