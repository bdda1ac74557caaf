use weatherly_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use weatherly_weather::WeatherError as LookupError;

/// Classify a lookup failure. `AppError` lives in another crate, so this is a
/// function rather than a `From` impl.
pub fn to_app_error(e: LookupError) -> AppError {
    match e {
        LookupError::Network(e) => AppError::Network(e.into_network_error()),
        LookupError::Api { status, message } => {
            AppError::Network(NetworkError::ServerError { status, message })
        }
        LookupError::NotFound(s) => AppError::Weather(WeatherError::LocationNotFound(s)),
        LookupError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        LookupError::Cache(s) => AppError::Weather(WeatherError::CacheError(s)),
        LookupError::Cancelled => AppError::Weather(WeatherError::ServiceUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_stays_not_found() {
        let err = to_app_error(LookupError::NotFound("Atlantis".into()));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn api_error_keeps_status() {
        let err = to_app_error(LookupError::Api {
            status: 502,
            message: "bad gateway".into(),
        });
        assert!(matches!(
            err,
            AppError::Network(NetworkError::ServerError { status: 502, .. })
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn parse_error_is_invalid_response() {
        let err = to_app_error(LookupError::Parse("missing daily".into()));
        assert!(matches!(err, AppError::Network(NetworkError::InvalidResponse(_))));
    }

    #[test]
    fn cache_error_maps_to_weather() {
        let err = to_app_error(LookupError::Cache("disk full".into()));
        assert_eq!(err.user_message(), "The last location could not be saved.");
    }
}
