/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The provider rejected the API key (HTTP 401)
    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    Unauthorized,
    /// Unknown city or coordinates; holds what was looked up ("City", "Location")
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Weather service unavailable (HTTP {0})")]
    Unavailable(u16),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// True when fixing this requires a configuration change
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}
