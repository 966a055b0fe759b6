use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;

use weatherdash_core::{App, ConfigError};
use weatherdash_store::{Preferences, SqliteStore};
use weatherdash_ui::{Controller, TerminalDisplay};
use weatherdash_weather::{Coordinates, FixedLocation, WeatherClient};

/// weatherdash - terminal weather dashboard
/// Current conditions, a five-day forecast, favorites and recent searches
#[derive(Parser, Debug)]
#[command(name = "weatherdash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show this city at startup instead of the last search
    #[arg(long, value_name = "CITY")]
    city: Option<String>,

    /// Exit after the startup screen instead of reading commands
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    weatherdash_core::init()?;

    let mut app = match App::new(cli.config.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            if let Some(config_err) = e.downcast_ref::<ConfigError>() {
                eprintln!("{}", config_err.user_message());
            }
            return Err(e);
        }
    };
    app.initialize()?;

    let config = app.shared_config();
    if !config.weather.is_configured() {
        eprintln!(
            "No OpenWeatherMap API key configured; set [weather] api_key or {}.",
            weatherdash_core::config::API_KEY_ENV
        );
    }

    let storage_path = config.storage_path();
    let store = SqliteStore::open(&storage_path).with_context(|| {
        format!("Failed to open preferences at {}", storage_path.display())
    })?;
    let prefs = Preferences::new(Arc::new(store));

    let client = WeatherClient::new(
        &config.weather.api_base_url,
        &config.weather.api_key,
        config.weather.request_timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to create weather client")?;

    let location = FixedLocation::new(config.location.as_ref().map(|loc| {
        tracing::info!(
            label = loc.label.as_deref().unwrap_or("unnamed"),
            "Using configured location"
        );
        Coordinates::new(loc.latitude, loc.longitude)
    }));

    let mut controller = Controller::new(
        client,
        location,
        TerminalDisplay::new(std::io::stdout()),
        prefs,
        config.ui.demo_cities.clone(),
        StdRng::from_entropy(),
    );

    match cli.city {
        Some(city) => {
            controller.restore();
            controller.search(&city).await;
        }
        None => controller.init().await,
    }

    if !cli.once {
        controller
            .run(BufReader::new(tokio::io::stdin()))
            .await
            .context("Failed to read commands")?;
    }

    app.shutdown()?;
    Ok(())
}
