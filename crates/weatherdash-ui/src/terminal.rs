//! Plain-text display for interactive use.

use std::io::Write;

use crate::display::{
    CurrentConditionsView, DisplayPort, FavoriteCard, ForecastCard, ListView, Notice, NoticeLevel,
    Overlay, Section,
};

const INVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// Writes each update as a block of text to `out`.
pub struct TerminalDisplay<W: Write> {
    out: W,
    dark_mode: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            dark_mode: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&self, title: &str) -> String {
        if self.dark_mode {
            format!("{INVERSE} {title} {RESET}")
        } else {
            format!("== {title} ==")
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> DisplayPort for TerminalDisplay<W> {
    fn set_current_conditions(&mut self, view: &CurrentConditionsView) {
        let mut text = self.heading(&view.location);
        if view.synthetic {
            text.push_str("  (sample data)");
        }
        text.push_str(&format!(
            "\n{}\n{} {}{}  {}\n\
             Feels like {}  Humidity {}  Wind {} from {}\n\
             Visibility {}  Pressure {}  Dew point {}\n\
             Precipitation {}  UV index {}  Air quality {} (PM2.5 {})",
            view.date,
            view.icon.glyph(),
            view.temperature,
            view.temperature_unit,
            view.description,
            view.feels_like,
            view.humidity,
            view.wind_speed,
            view.wind_direction,
            view.visibility,
            view.pressure,
            view.dew_point,
            view.precipitation_chance,
            view.uv_index,
            view.air_quality,
            view.pm25,
        ));
        self.emit(&text);
    }

    fn set_forecast(&mut self, cards: &[ForecastCard]) {
        let mut text = self.heading("5-Day Forecast");
        for card in cards {
            text.push_str(&format!(
                "\n{:<4} {} {:>5} {:>5}  {}",
                card.day,
                card.icon.glyph(),
                card.high,
                card.low,
                card.description
            ));
        }
        self.emit(&text);
    }

    fn set_favorites(&mut self, favorites: &ListView<FavoriteCard>) {
        let mut text = self.heading("Favorites");
        match favorites {
            ListView::Placeholder(message) => {
                text.push('\n');
                text.push_str(message);
            }
            ListView::Items(cards) => {
                for card in cards {
                    text.push_str(&format!(
                        "\n{:>2}. {}, {}  {}",
                        card.position, card.city, card.country, card.temperature
                    ));
                }
            }
        }
        self.emit(&text);
    }

    fn set_recent_searches(&mut self, recent: &ListView<String>) {
        let line = match recent {
            ListView::Placeholder(message) => message.to_string(),
            ListView::Items(cities) => cities
                .iter()
                .enumerate()
                .map(|(i, city)| format!("[{}] {}", i + 1, city))
                .collect::<Vec<_>>()
                .join("  "),
        };
        self.emit(&format!("Recent: {line}"));
    }

    fn set_last_updated(&mut self, time: &str) {
        self.emit(&format!("Last updated: {time}"));
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.emit("Loading...");
        }
    }

    fn notify(&mut self, notice: Notice) {
        let prefix = match notice.level {
            NoticeLevel::Info => "",
            NoticeLevel::Success => "✓ ",
            NoticeLevel::Error => "! ",
        };
        self.emit(&format!("{prefix}{}", notice.message));
    }

    fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }

    fn set_section(&mut self, section: Section) {
        let heading = self.heading(section.title());
        self.emit(&heading);
    }

    fn set_auth_label(&mut self, label: &str) {
        self.emit(&format!("Account: {label}"));
    }

    fn set_overlay_open(&mut self, overlay: Overlay, open: bool) {
        let text = match (overlay, open) {
            (Overlay::Settings, true) => {
                "Settings: `dark`, `set tempUnit celsius|fahrenheit`, `set windUnit ms|kmh|mph`"
            }
            (Overlay::Auth, true) => "Account: `login <email> <password>` or `register <email> <password>`",
            (_, false) => return,
        };
        self.emit(text);
    }

    fn ready(&mut self) {
        if let Err(e) = write!(self.out, "> ").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write prompt");
        }
    }
}
