//! The surface the controller draws on.
//!
//! [`DisplayPort`] receives fully-formatted view values; adapters only lay
//! them out. [`RecordingDisplay`] keeps everything it was sent so tests can
//! assert on it.

use std::sync::Arc;

use parking_lot::Mutex;
use weatherdash_weather::WeatherIcon;

/// Current conditions, formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditionsView {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub temperature_unit: &'static str,
    pub description: String,
    pub icon: WeatherIcon,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub visibility: String,
    pub pressure: String,
    pub dew_point: String,
    pub wind_direction: String,
    pub precipitation_chance: String,
    pub uv_index: String,
    pub air_quality: String,
    pub pm25: String,
    /// Set when the numbers were generated rather than fetched
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day: String,
    pub icon: WeatherIcon,
    pub description: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteCard {
    /// 1-based position, as typed in `fav rm` / `fav view`
    pub position: usize,
    pub city: String,
    pub country: String,
    pub temperature: String,
}

/// A list panel, or the text shown in its place when there is nothing to list
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Placeholder(&'static str),
    Items(Vec<T>),
}

impl<T> ListView<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListView::Placeholder(_) => &[],
            ListView::Items(items) => items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Favorites,
    Settings,
}

impl Section {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Self::Home),
            "favorites" | "favourites" | "favs" => Some(Self::Favorites),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Favorites => "Favorites",
            Self::Settings => "Settings",
        }
    }
}

/// Panels that open over the current section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Settings,
    Auth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A one-off message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything the controller can change on screen.
///
/// Every `set_*` call replaces what was shown before.
pub trait DisplayPort {
    fn set_current_conditions(&mut self, view: &CurrentConditionsView);
    fn set_forecast(&mut self, cards: &[ForecastCard]);
    fn set_favorites(&mut self, favorites: &ListView<FavoriteCard>);
    fn set_recent_searches(&mut self, recent: &ListView<String>);
    fn set_last_updated(&mut self, time: &str);
    fn set_controls_enabled(&mut self, enabled: bool);
    fn notify(&mut self, notice: Notice);
    fn set_dark_mode(&mut self, enabled: bool);
    fn set_section(&mut self, section: Section);
    fn set_auth_label(&mut self, label: &str);
    fn set_overlay_open(&mut self, overlay: Overlay, open: bool);

    /// Called when the controller is waiting for the next command.
    fn ready(&mut self) {}
}

#[derive(Debug, Default)]
struct Recorded {
    current: Option<CurrentConditionsView>,
    conditions_renders: usize,
    forecast: Vec<ForecastCard>,
    favorites: Option<ListView<FavoriteCard>>,
    recent: Option<ListView<String>>,
    last_updated: Option<String>,
    controls: Vec<bool>,
    notices: Vec<Notice>,
    dark_mode: bool,
    section: Section,
    auth_label: Option<String>,
    settings_open: bool,
    auth_open: bool,
}

/// Headless display that records what it is sent.
///
/// Clones share the same record, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<CurrentConditionsView> {
        self.inner.lock().current.clone()
    }

    /// Number of times current conditions were drawn
    pub fn conditions_renders(&self) -> usize {
        self.inner.lock().conditions_renders
    }

    pub fn forecast(&self) -> Vec<ForecastCard> {
        self.inner.lock().forecast.clone()
    }

    pub fn favorites(&self) -> Option<ListView<FavoriteCard>> {
        self.inner.lock().favorites.clone()
    }

    pub fn recent_searches(&self) -> Option<ListView<String>> {
        self.inner.lock().recent.clone()
    }

    pub fn last_updated(&self) -> Option<String> {
        self.inner.lock().last_updated.clone()
    }

    /// Every `set_controls_enabled` value, in call order
    pub fn controls_history(&self) -> Vec<bool> {
        self.inner.lock().controls.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.inner.lock().notices.clone()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.inner.lock().notices.last().cloned()
    }

    pub fn dark_mode(&self) -> bool {
        self.inner.lock().dark_mode
    }

    pub fn section(&self) -> Section {
        self.inner.lock().section
    }

    pub fn auth_label(&self) -> Option<String> {
        self.inner.lock().auth_label.clone()
    }

    pub fn overlay_open(&self, overlay: Overlay) -> bool {
        let recorded = self.inner.lock();
        match overlay {
            Overlay::Settings => recorded.settings_open,
            Overlay::Auth => recorded.auth_open,
        }
    }
}

impl DisplayPort for RecordingDisplay {
    fn set_current_conditions(&mut self, view: &CurrentConditionsView) {
        let mut recorded = self.inner.lock();
        recorded.current = Some(view.clone());
        recorded.conditions_renders += 1;
    }

    fn set_forecast(&mut self, cards: &[ForecastCard]) {
        self.inner.lock().forecast = cards.to_vec();
    }

    fn set_favorites(&mut self, favorites: &ListView<FavoriteCard>) {
        self.inner.lock().favorites = Some(favorites.clone());
    }

    fn set_recent_searches(&mut self, recent: &ListView<String>) {
        self.inner.lock().recent = Some(recent.clone());
    }

    fn set_last_updated(&mut self, time: &str) {
        self.inner.lock().last_updated = Some(time.to_string());
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.inner.lock().controls.push(enabled);
    }

    fn notify(&mut self, notice: Notice) {
        self.inner.lock().notices.push(notice);
    }

    fn set_dark_mode(&mut self, enabled: bool) {
        self.inner.lock().dark_mode = enabled;
    }

    fn set_section(&mut self, section: Section) {
        self.inner.lock().section = section;
    }

    fn set_auth_label(&mut self, label: &str) {
        self.inner.lock().auth_label = Some(label.to_string());
    }

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool) {
        let mut recorded = self.inner.lock();
        match overlay {
            Overlay::Settings => recorded.settings_open = open,
            Overlay::Auth => recorded.auth_open = open,
        }
    }
}
