//! Dashboard controller: owns the application state and turns user actions
//! into fetches, renders and stored preferences.

use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use weatherdash_store::preferences::{DARK_MODE_KEY, TEMP_UNIT_KEY, WIND_UNIT_KEY};
use weatherdash_store::{Preferences, StoreError};
use weatherdash_weather::mock::{self, CURRENT_LOCATION_LABEL};
use weatherdash_weather::{LocationProvider, WeatherClient, WeatherError, WeatherReport, WeatherSnapshot};

use crate::auth::{AuthAction, MockAuth};
use crate::command::{self, Command, HELP};
use crate::display::{DisplayPort, Notice, Overlay, Section};
use crate::error_mapping;
use crate::history::HistoryManager;
use crate::render::{self, DisplayUnits};

/// Shown on first run when no usable demo city is configured.
const FALLBACK_DEMO_CITY: &str = "London";

/// Mutable dashboard state
#[derive(Debug, Default)]
pub struct AppState {
    /// Report on screen, live or synthetic
    pub report: Option<WeatherReport>,
    pub section: Section,
    /// A fetch is in flight and controls are disabled
    pub busy: bool,
    pub settings_open: bool,
    pub auth_open: bool,
    pub dark_mode: bool,
    pub units: DisplayUnits,
}

impl AppState {
    pub fn current(&self) -> Option<&WeatherSnapshot> {
        self.report.as_ref().map(|r| &r.current)
    }
}

/// Whether the command loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Controller<D, L> {
    client: WeatherClient,
    location: L,
    display: D,
    prefs: Preferences,
    history: HistoryManager,
    auth: MockAuth,
    demo_cities: Vec<String>,
    rng: StdRng,
    state: AppState,
}

impl<D: DisplayPort, L: LocationProvider> Controller<D, L> {
    pub fn new(
        client: WeatherClient,
        location: L,
        display: D,
        prefs: Preferences,
        demo_cities: Vec<String>,
        rng: StdRng,
    ) -> Self {
        let history = HistoryManager::load(prefs.clone());
        let demo_cities = demo_cities
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            client,
            location,
            display,
            prefs,
            history,
            auth: MockAuth::new(),
            demo_cities,
            rng,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Draw the saved lists and settings without loading any weather.
    pub fn restore(&mut self) {
        self.load_settings();
        self.history.render_recent(&mut self.display);
        self.history.render_favorites(&mut self.display, self.state.units);
        self.display.set_last_updated(&render::clock_time(now()));
        self.display.set_auth_label(self.auth.label());
        self.display.set_section(self.state.section);
    }

    /// Startup: restore saved state, then show the most recent search or,
    /// on first run, synthetic weather for a demo city.
    pub async fn init(&mut self) {
        self.restore();

        match self.history.recent().most_recent().map(str::to_string) {
            Some(city) => self.search(&city).await,
            None => self.show_demo(),
        }
    }

    pub async fn search(&mut self, input: &str) {
        let city = input.trim();
        if city.is_empty() {
            self.display.notify(Notice::info("Please enter a city name"));
            return;
        }

        self.set_busy(true);
        let now = now();
        let result = self
            .client
            .report_by_city(city, &mut self.rng, now.date())
            .await;

        match result {
            Ok(report) => {
                tracing::info!(city, "Showing live weather");
                self.show_report(report, now);
                self.history.record_search(&mut self.display, city);
            }
            Err(e) => {
                let text = self.fetch_failure("Search failed", e);
                self.display.notify(Notice::error(format!("Error: {text}")));
                self.use_mock_data(city);
            }
        }
        self.set_busy(false);
    }

    pub async fn search_current_location(&mut self) {
        let coords = match self.location.current_location().await {
            Ok(coords) => coords,
            Err(e) => {
                let message = format!("Error getting location: {e}");
                tracing::warn!(error = %error_mapping::from_location(e), "Location lookup failed");
                self.display.notify(Notice::error(message));
                return;
            }
        };

        self.set_busy(true);
        let now = now();
        let result = self
            .client
            .report_by_coords(coords, &mut self.rng, now.date())
            .await;

        match result {
            Ok(report) => {
                let city = report.current.city.clone();
                tracing::info!(city = %city, "Showing live weather for current location");
                self.show_report(report, now);
                self.history.record_search(&mut self.display, &city);
            }
            Err(e) => {
                let text = self.fetch_failure("Location weather failed", e);
                self.display.notify(Notice::error(format!(
                    "Error fetching location weather: {text}"
                )));
                self.use_mock_data(CURRENT_LOCATION_LABEL);
            }
        }
        self.set_busy(false);
    }

    pub fn add_favorite(&mut self) {
        let units = self.state.units;
        let current = self.state.report.as_ref().map(|r| &r.current);
        self.history.add_favorite(&mut self.display, current, units);
    }

    /// `index` is 0-based
    pub fn remove_favorite(&mut self, index: usize) {
        self.history
            .remove_favorite(&mut self.display, index, self.state.units);
    }

    /// Search a saved city and switch to the home section.
    pub async fn view_favorite(&mut self, index: usize) {
        let Some(city) = self.history.favorites().get(index).map(|f| f.city.clone()) else {
            self.display
                .notify(Notice::info(format!("No favorite at position {}", index + 1)));
            return;
        };
        self.search(&city).await;
        self.show_section(Section::Home);
    }

    pub async fn search_recent(&mut self, index: usize) {
        let Some(city) = self.history.recent().get(index).map(str::to_string) else {
            self.display.notify(Notice::info(format!(
                "No recent search at position {}",
                index + 1
            )));
            return;
        };
        self.search(&city).await;
    }

    pub fn toggle_dark_mode(&mut self) {
        let enabled = !self.state.dark_mode;
        self.state.dark_mode = enabled;
        if let Err(e) = self.prefs.set_dark_mode(enabled) {
            self.store_failure(e);
        }
        self.display.set_dark_mode(enabled);
    }

    /// Store any preference key verbatim and apply it if it is one we read.
    pub fn save_setting(&mut self, key: &str, value: &str) {
        if let Err(e) = self.prefs.set_raw(key, value) {
            self.store_failure(e);
            return;
        }
        self.display
            .notify(Notice::success(format!("Setting saved: {key} = {value}")));

        match key {
            TEMP_UNIT_KEY | WIND_UNIT_KEY => {
                self.load_units();
                self.rerender();
            }
            DARK_MODE_KEY => {
                self.state.dark_mode = value == "true";
                self.display.set_dark_mode(self.state.dark_mode);
            }
            _ => {}
        }
    }

    pub fn show_section(&mut self, section: Section) {
        self.state.section = section;
        self.display.set_section(section);
    }

    pub fn toggle_settings(&mut self) {
        self.state.settings_open = !self.state.settings_open;
        self.display
            .set_overlay_open(Overlay::Settings, self.state.settings_open);
    }

    pub fn toggle_auth(&mut self) {
        self.state.auth_open = !self.state.auth_open;
        self.display.set_overlay_open(Overlay::Auth, self.state.auth_open);
    }

    pub fn login(&mut self, email: &str, password: &str) {
        self.sign_in(AuthAction::Login, email, password);
    }

    pub fn register(&mut self, email: &str, password: &str) {
        self.sign_in(AuthAction::Register, email, password);
    }

    pub fn logout(&mut self) {
        let notice = self.auth.logout();
        self.display.set_auth_label(self.auth.label());
        self.display.notify(notice);
    }

    pub async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Search(city) => self.search(&city).await,
            Command::Here => self.search_current_location().await,
            Command::FavAdd => self.add_favorite(),
            Command::FavRemove(index) => self.remove_favorite(index),
            Command::FavView(index) => self.view_favorite(index).await,
            Command::Recent(index) => self.search_recent(index).await,
            Command::Dark => self.toggle_dark_mode(),
            Command::Set { key, value } => self.save_setting(&key, &value),
            Command::Show(section) => self.show_section(section),
            Command::Settings => self.toggle_settings(),
            Command::Auth => self.toggle_auth(),
            Command::Login { email, password } => self.login(&email, &password),
            Command::Register { email, password } => self.register(&email, &password),
            Command::Logout => self.logout(),
            Command::Help => self.display.notify(Notice::info(HELP)),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// Each command finishes before the next line is read.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> std::io::Result<()> {
        let mut lines = input.lines();
        self.display.ready();

        while let Some(line) = lines.next_line().await? {
            match command::parse(&line) {
                Ok(Some(command)) => {
                    if self.execute(command).await == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => self.display.notify(Notice::error(format!(
                    "{e}. To look up a city with this name, type: search {}",
                    line.trim()
                ))),
            }
            self.display.ready();
        }

        tracing::debug!("Command loop finished");
        Ok(())
    }

    fn show_demo(&mut self) {
        let city = match self.demo_cities.choose(&mut self.rng) {
            Some(city) => city.clone(),
            None => {
                tracing::warn!("No demo cities configured, using {FALLBACK_DEMO_CITY}");
                FALLBACK_DEMO_CITY.to_string()
            }
        };
        self.use_mock_data(&city);
    }

    /// Show synthetic weather labeled `label` and remember it as a search.
    fn use_mock_data(&mut self, label: &str) {
        let now = now();
        let report = mock::report(&mut self.rng, label, now.date());
        tracing::info!(city = label, "Showing synthetic weather");
        self.show_report(report, now);
        self.history.record_search(&mut self.display, label);
    }

    fn show_report(&mut self, report: WeatherReport, now: NaiveDateTime) {
        render::render_report(&mut self.display, &report, self.state.units, now);
        self.state.report = Some(report);
    }

    fn rerender(&mut self) {
        if let Some(report) = &self.state.report {
            render::render_report(&mut self.display, report, self.state.units, now());
        }
        self.history
            .render_favorites(&mut self.display, self.state.units);
    }

    fn load_settings(&mut self) {
        self.state.dark_mode = self.prefs.dark_mode();
        self.display.set_dark_mode(self.state.dark_mode);
        self.load_units();
    }

    fn load_units(&mut self) {
        self.state.units = DisplayUnits {
            temperature: self.prefs.temperature_unit(),
            wind: self.prefs.wind_unit(),
        };
    }

    fn set_busy(&mut self, busy: bool) {
        self.state.busy = busy;
        self.display.set_controls_enabled(!busy);
    }

    fn sign_in(&mut self, action: AuthAction, email: &str, password: &str) {
        let (notice, signed_in) = self.auth.sign_in(action, email, password);
        self.display.notify(notice);
        if signed_in {
            self.display.set_auth_label(self.auth.label());
            self.state.auth_open = false;
            self.display.set_overlay_open(Overlay::Auth, false);
        }
    }

    /// Log a failed fetch and return the text for the user.
    fn fetch_failure(&self, context: &str, e: WeatherError) -> String {
        let (mapped, text) = error_mapping::describe_fetch_failure(e);
        if mapped.is_configuration_error() {
            tracing::error!(error = %mapped, "{context}; check the [weather] api_key setting");
        } else {
            tracing::warn!(error = %mapped, "{context}; falling back to synthetic data");
        }
        text
    }

    fn store_failure(&mut self, e: StoreError) {
        let err = error_mapping::from_store(e);
        tracing::error!(error = %err, "Failed to save preference");
        self.display.notify(Notice::error(err.user_message()));
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::display::{ListView, NoticeLevel, RecordingDisplay};
    use rand::SeedableRng;
    use weatherdash_store::{KeyValueStore, MemoryStore};
    use weatherdash_weather::{Coordinates, FixedLocation};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEMO: [&str; 5] = ["New York", "London", "Tokyo", "Paris", "Sydney"];

    struct Harness {
        controller: Controller<RecordingDisplay, FixedLocation>,
        display: RecordingDisplay,
        prefs: Preferences,
    }

    fn harness(base_url: &str, location: FixedLocation) -> Harness {
        harness_with_store(base_url, location, Arc::new(MemoryStore::new()))
    }

    fn harness_with_store(
        base_url: &str,
        location: FixedLocation,
        store: Arc<dyn KeyValueStore>,
    ) -> Harness {
        let demo = DEMO.iter().map(|s| s.to_string()).collect();
        harness_with_demo(base_url, location, store, demo)
    }

    fn harness_with_demo(
        base_url: &str,
        location: FixedLocation,
        store: Arc<dyn KeyValueStore>,
        demo_cities: Vec<String>,
    ) -> Harness {
        let client = WeatherClient::new(base_url, "test-key", Some(Duration::from_secs(5))).unwrap();
        let display = RecordingDisplay::new();
        let prefs = Preferences::new(store);
        let controller = Controller::new(
            client,
            location,
            display.clone(),
            prefs.clone(),
            demo_cities,
            StdRng::seed_from_u64(7),
        );
        Harness {
            controller,
            display,
            prefs,
        }
    }

    fn current_body(name: &str, temp: f64, humidity: f64) -> serde_json::Value {
        serde_json::json!({
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"description": "light rain", "icon": "10d"}],
            "main": {"temp": temp, "feels_like": temp, "pressure": 1013, "humidity": humidity},
            "visibility": 10000,
            "wind": {"speed": 3.1, "deg": 270},
            "sys": {"country": "GB"},
            "name": name
        })
    }

    async fn mount_current(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_forecast_failure(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(server)
            .await;
    }

    fn recent(display: &RecordingDisplay) -> Vec<String> {
        display
            .recent_searches()
            .map(|v| v.items().to_vec())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_empty_search_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.search("   ").await;

        assert_eq!(
            h.display.last_notice(),
            Some(Notice::info("Please enter a city name"))
        );
        assert!(h.display.controls_history().is_empty());
        assert!(h.display.current().is_none());
    }

    #[tokio::test]
    async fn test_search_renders_live_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London", 15.4, 80.0)))
            .mount(&server)
            .await;
        mount_forecast_failure(&server).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.search("  London ").await;

        let view = h.display.current().unwrap();
        assert_eq!(view.location, "London, GB");
        assert_eq!(view.temperature, "15");
        assert_eq!(view.dew_point, "11°");
        assert!(!view.synthetic);
        assert_eq!(h.display.forecast().len(), 5);
        assert_eq!(h.display.controls_history(), vec![false, true]);
        assert!(!h.controller.state().busy);
        assert_eq!(recent(&h.display), ["London"]);
        assert_eq!(h.prefs.recent_searches().cities(), ["London"]);
        assert!(h.display.notices().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_city_falls_back_to_mock() {
        let server = MockServer::start().await;
        mount_current(&server, 404, serde_json::json!({"cod": "404", "message": "city not found"})).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.search("Nowhereville").await;

        let notice = h.display.notices()[0].clone();
        assert_eq!(notice.message, "Error: City not found");
        assert_eq!(notice.level, NoticeLevel::Error);

        let current = h.controller.state().current().unwrap();
        assert_eq!(current.city, "Nowhereville");
        assert!((10..=40).contains(&current.temperature));
        let view = h.display.current().unwrap();
        assert_eq!(view.location, "Nowhereville, Demo");
        assert!(view.synthetic);
        for (name, field) in [
            ("date", &view.date),
            ("temperature", &view.temperature),
            ("description", &view.description),
            ("feels_like", &view.feels_like),
            ("humidity", &view.humidity),
            ("wind_speed", &view.wind_speed),
            ("visibility", &view.visibility),
            ("pressure", &view.pressure),
            ("dew_point", &view.dew_point),
            ("wind_direction", &view.wind_direction),
            ("precipitation_chance", &view.precipitation_chance),
            ("uv_index", &view.uv_index),
            ("air_quality", &view.air_quality),
            ("pm25", &view.pm25),
        ] {
            assert!(!field.is_empty(), "{name} is empty");
        }
        assert!(!view.temperature_unit.is_empty());

        let forecast = h.display.forecast();
        assert_eq!(forecast.len(), 5);
        for card in &forecast {
            assert!(!card.day.is_empty());
            assert!(!card.description.is_empty());
            assert!(!card.high.is_empty());
            assert!(!card.low.is_empty());
        }
        assert_eq!(recent(&h.display), ["Nowhereville"]);
        assert_eq!(h.display.controls_history(), vec![false, true]);
    }

    #[tokio::test]
    async fn test_invalid_key_message() {
        let server = MockServer::start().await;
        mount_current(&server, 401, serde_json::json!({"cod": 401})).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.search("London").await;

        assert_eq!(
            h.display.notices()[0].message,
            "Error: Invalid API key. Please check your OpenWeatherMap API key."
        );
        assert!(h.display.current().unwrap().synthetic);
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_notice() {
        let mut h = harness("http://127.0.0.1:1", FixedLocation::unavailable());
        h.controller.search("Berlin").await;

        let notice = h.display.notices()[0].clone();
        assert!(notice.message.starts_with("Error: "));
        assert_eq!(h.controller.state().current().unwrap().city, "Berlin");
        assert_eq!(h.display.controls_history(), vec![false, true]);
    }

    #[tokio::test]
    async fn test_first_run_shows_demo_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.init().await;

        let current = h.controller.state().current().unwrap().clone();
        assert!(DEMO.contains(&current.city.as_str()));
        assert_eq!(current.country, "Demo");
        assert_eq!(recent(&h.display), [current.city.clone()]);
        assert!(h.display.last_updated().is_some());
        assert_eq!(h.display.auth_label().as_deref(), Some("Login"));
        assert_eq!(
            h.display.favorites(),
            Some(ListView::Placeholder(render::NO_FAVORITES))
        );
    }

    #[tokio::test]
    async fn test_blank_demo_city_never_leaves_dashboard_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let mut first = harness_with_demo(
            &server.uri(),
            FixedLocation::unavailable(),
            store.clone(),
            vec![String::new(), "   ".to_string()],
        );
        first.controller.init().await;

        let shown = first.controller.state().current().unwrap().city.clone();
        assert_eq!(shown, FALLBACK_DEMO_CITY);
        assert_eq!(first.prefs.recent_searches().cities(), [FALLBACK_DEMO_CITY]);

        let mut second = harness_with_demo(
            &server.uri(),
            FixedLocation::unavailable(),
            store,
            vec![String::new(), " Paris ".to_string()],
        );
        // Provider down, so the remembered city comes back as sample data.
        second.controller.init().await;

        assert_eq!(second.controller.state().current().unwrap().city, FALLBACK_DEMO_CITY);
        assert!(second
            .display
            .notices()
            .iter()
            .all(|n| n.message != "Please enter a city name"));
    }

    #[tokio::test]
    async fn test_init_searches_most_recent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Rome"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Rome", 22.0, 60.0)))
            .expect(1)
            .mount(&server)
            .await;
        mount_forecast_failure(&server).await;

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("recentSearches", r#"["Rome","Oslo"]"#).unwrap();
        store.set("darkMode", "true").unwrap();

        let mut h = harness_with_store(&server.uri(), FixedLocation::unavailable(), store);
        h.controller.init().await;

        assert_eq!(h.display.current().unwrap().location, "Rome, GB");
        assert_eq!(recent(&h.display), ["Rome", "Oslo"]);
        assert!(h.display.dark_mode());
    }

    #[tokio::test]
    async fn test_location_error_is_notice_only() {
        let server = MockServer::start().await;
        let mut h = harness(&server.uri(), FixedLocation::unavailable());

        h.controller.search_current_location().await;

        assert_eq!(
            h.display.last_notice().unwrap().message,
            "Error getting location: Location service unavailable"
        );
        assert!(h.display.current().is_none());
        assert!(h.display.controls_history().is_empty());
    }

    #[tokio::test]
    async fn test_current_location_records_provider_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "48.85"))
            .and(query_param("lon", "2.35"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Paris", 18.0, 65.0)))
            .mount(&server)
            .await;
        mount_forecast_failure(&server).await;

        let location = FixedLocation::new(Some(Coordinates::new(48.85, 2.35)));
        let mut h = harness(&server.uri(), location);
        h.controller.search_current_location().await;

        assert_eq!(h.display.current().unwrap().location, "Paris, GB");
        assert_eq!(recent(&h.display), ["Paris"]);
    }

    #[tokio::test]
    async fn test_current_location_fetch_failure_uses_label() {
        let server = MockServer::start().await;
        mount_current(&server, 400, serde_json::json!({"cod": "400"})).await;

        let location = FixedLocation::new(Some(Coordinates::new(0.0, 0.0)));
        let mut h = harness(&server.uri(), location);
        h.controller.search_current_location().await;

        assert_eq!(
            h.display.notices()[0].message,
            "Error fetching location weather: Location not found"
        );
        assert_eq!(h.controller.state().current().unwrap().city, "Your Location");
        assert_eq!(recent(&h.display), ["Your Location"]);
    }

    #[tokio::test]
    async fn test_add_then_view_favorite() {
        let server = MockServer::start().await;
        mount_current(&server, 200, current_body("London", 15.4, 80.0)).await;
        mount_forecast_failure(&server).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.add_favorite();
        assert_eq!(
            h.display.last_notice().unwrap().message,
            "Please search for a city first"
        );

        h.controller.search("London").await;
        h.controller.add_favorite();
        assert_eq!(h.display.last_notice().unwrap().message, "Added to favorites!");
        assert_eq!(h.prefs.favorites().len(), 1);

        h.controller.show_section(Section::Favorites);
        h.controller.view_favorite(0).await;
        assert_eq!(h.display.section(), Section::Home);
        assert_eq!(h.display.conditions_renders(), 2);

        h.controller.view_favorite(3).await;
        assert_eq!(
            h.display.last_notice().unwrap().message,
            "No favorite at position 4"
        );
    }

    #[tokio::test]
    async fn test_unit_setting_rerenders() {
        let server = MockServer::start().await;
        mount_current(&server, 200, current_body("London", 15.0, 80.0)).await;
        mount_forecast_failure(&server).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        h.controller.search("London").await;
        h.controller.save_setting("tempUnit", "fahrenheit");

        assert_eq!(
            h.display.last_notice().unwrap().message,
            "Setting saved: tempUnit = fahrenheit"
        );
        let view = h.display.current().unwrap();
        assert_eq!(view.temperature, "59");
        assert_eq!(view.temperature_unit, "°F");
        assert_eq!(h.prefs.temperature_unit(), weatherdash_store::TemperatureUnit::Fahrenheit);
    }

    #[tokio::test]
    async fn test_dark_mode_and_panels() {
        let server = MockServer::start().await;
        let mut h = harness(&server.uri(), FixedLocation::unavailable());

        h.controller.toggle_dark_mode();
        assert!(h.display.dark_mode());
        assert!(h.prefs.dark_mode());

        h.controller.toggle_dark_mode();
        assert!(!h.prefs.dark_mode());

        h.controller.toggle_settings();
        assert!(h.display.overlay_open(Overlay::Settings));
        h.controller.toggle_settings();
        assert!(!h.display.overlay_open(Overlay::Settings));
    }

    #[tokio::test]
    async fn test_login_closes_auth_panel() {
        let server = MockServer::start().await;
        let mut h = harness(&server.uri(), FixedLocation::unavailable());

        h.controller.toggle_auth();
        h.controller.login("", "");
        assert_eq!(h.display.last_notice().unwrap().message, "Please fill all fields");
        assert!(h.display.overlay_open(Overlay::Auth));

        h.controller.login("ada@example.com", "pw");
        assert_eq!(h.display.auth_label().as_deref(), Some("ada"));
        assert!(!h.display.overlay_open(Overlay::Auth));

        h.controller.logout();
        assert_eq!(h.display.auth_label().as_deref(), Some("Login"));
        assert_eq!(
            h.display.last_notice().unwrap().message,
            "Logged out successfully"
        );
    }

    #[tokio::test]
    async fn test_keyword_city_error_suggests_search() {
        let server = MockServer::start().await;
        mount_current(&server, 200, current_body("Show Low", 20.0, 30.0)).await;
        mount_forecast_failure(&server).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        let input: &[u8] = b"Show Low\nsearch Show Low\n";
        h.controller.run(input).await.unwrap();

        let hint = h.display.notices()[0].clone();
        assert_eq!(hint.level, NoticeLevel::Error);
        assert!(hint.message.contains("Unknown section 'Low'"));
        assert!(hint.message.ends_with("type: search Show Low"));
        assert_eq!(h.display.current().unwrap().location, "Show Low, GB");
        assert_eq!(recent(&h.display), ["Show Low"]);
    }

    #[tokio::test]
    async fn test_run_reads_commands_until_quit() {
        let server = MockServer::start().await;
        mount_current(&server, 200, current_body("Lima", 18.0, 70.0)).await;
        mount_forecast_failure(&server).await;

        let mut h = harness(&server.uri(), FixedLocation::unavailable());
        let input: &[u8] = b"Lima\nfav add\nfav rm 9\nfav rm x\n\nquit\nsearch Oslo\n";
        h.controller.run(input).await.unwrap();

        assert_eq!(recent(&h.display), ["Lima"]);
        assert_eq!(h.prefs.favorites().len(), 1);
        assert_eq!(h.display.current().unwrap().location, "Lima, GB");
    }
}
