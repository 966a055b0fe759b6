//! Maps service-crate errors to `weatherdash_core::AppError` for logging and
//! user-facing hints.

use weatherdash_core::error::ReqwestErrorExt;
use weatherdash_core::{AppError, LocationError, NetworkError, StorageError, WeatherError};
use weatherdash_store::StoreError;
use weatherdash_weather::{LocationError as GeoError, WeatherError as FetchError};

pub fn from_weather(e: FetchError) -> AppError {
    match e {
        FetchError::Unauthorized => AppError::Weather(WeatherError::InvalidApiKey),
        FetchError::NotFound(subject) => {
            AppError::Weather(WeatherError::LocationNotFound(subject.to_string()))
        }
        FetchError::Unavailable(status) => AppError::Network(NetworkError::ServerError {
            status,
            message: format!("provider returned HTTP {status}"),
        }),
        FetchError::Network(e) => AppError::Network(e.into_network_error()),
        FetchError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
    }
}

pub fn from_location(e: GeoError) -> AppError {
    AppError::Location(match e {
        GeoError::PermissionDenied => LocationError::PermissionDenied,
        GeoError::ServiceUnavailable => LocationError::ServiceUnavailable,
        GeoError::Timeout => LocationError::Timeout,
    })
}

pub fn from_store(e: StoreError) -> AppError {
    AppError::Storage(match e {
        StoreError::Database(e) => StorageError::WriteFailed(e.to_string()),
        StoreError::Serialization(e) => StorageError::Malformed(e.to_string()),
    })
}

/// Map a failed fetch and pick the text shown after "Error: ".
///
/// Provider answers (bad key, unknown city or position) are shown as-is;
/// transport and decoding failures get the generic hint.
pub fn describe_fetch_failure(e: FetchError) -> (AppError, String) {
    let verbatim = match &e {
        FetchError::Unauthorized | FetchError::NotFound(_) => Some(e.to_string()),
        _ => None,
    };
    let mapped = from_weather(e);
    let text = verbatim.unwrap_or_else(|| mapped.user_message().to_string());
    (mapped, text)
}
