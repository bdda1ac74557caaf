//! Forward geocoding: resolve a place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use serde::Deserialize;

use crate::types::{GeocodeResult, WeatherError};

/// Offset from an ASCII uppercase letter to its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    pub results: Option<Vec<GeocodingEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub country_code: Option<String>,
}

impl GeocodingResponse {
    /// First match, or `NotFound` when the result set is missing or empty.
    pub(crate) fn into_first(self, query: &str) -> Result<GeocodeResult, WeatherError> {
        let entry = self
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        Ok(GeocodeResult {
            latitude: entry.latitude,
            longitude: entry.longitude,
            // Open-Meteo resolves "auto" from the coordinates
            timezone: entry.timezone.unwrap_or_else(|| "auto".to_string()),
            name: entry.name,
            country_code: entry.country_code.unwrap_or_default(),
        })
    }
}

/// Convert a two-letter country code into its flag glyph.
///
/// Each letter becomes a regional indicator symbol; the pair renders as a flag.
pub fn country_flag(country_code: &str) -> String {
    country_code
        .to_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_flag_us() {
        assert_eq!(country_flag("US"), "\u{1F1FA}\u{1F1F8}");
        assert_eq!(country_flag("US"), "🇺🇸");
    }

    #[test]
    fn test_country_flag_fr() {
        assert_eq!(country_flag("FR"), "🇫🇷");
    }

    #[test]
    fn test_country_flag_is_deterministic() {
        assert_eq!(country_flag("DE"), country_flag("DE"));
        assert_ne!(country_flag("DE"), country_flag("ED"));
    }

    #[test]
    fn test_country_flag_uppercases() {
        assert_eq!(country_flag("in"), country_flag("IN"));
    }

    #[test]
    fn test_missing_results_is_not_found() {
        let response: GeocodingResponse =
            serde_json::from_value(serde_json::json!({ "generationtime_ms": 0.5 })).unwrap();
        let err = response.into_first("Atlantis").unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(ref q) if q == "Atlantis"));
    }

    #[test]
    fn test_empty_results_is_not_found() {
        let response: GeocodingResponse =
            serde_json::from_value(serde_json::json!({ "results": [] })).unwrap();
        assert!(response.into_first("x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_first_result_wins() {
        let response: GeocodingResponse = serde_json::from_value(serde_json::json!({
            "results": [
                {
                    "name": "Berlin",
                    "latitude": 52.52437,
                    "longitude": 13.41053,
                    "timezone": "Europe/Berlin",
                    "country_code": "DE",
                    "country": "Germany"
                },
                {
                    "name": "Berlin",
                    "latitude": 39.79,
                    "longitude": -74.93,
                    "timezone": "America/New_York",
                    "country_code": "US"
                }
            ]
        }))
        .unwrap();

        let result = response.into_first("Berlin").unwrap();
        assert_eq!(result.name, "Berlin");
        assert_eq!(result.country_code, "DE");
        assert_eq!(result.timezone, "Europe/Berlin");
        assert_eq!(result.latitude, 52.52437);
    }
}
