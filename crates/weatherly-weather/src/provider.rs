//! Open-Meteo client: geocode a place name, then fetch its daily forecast.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use weatherly_core::WeatherSettings;

use crate::geocode::GeocodingResponse;
use crate::types::{DailyForecast, GeocodeResult, Lookup, LookupOutcome, WeatherError};

/// Queries shorter than this (after trimming) never hit the network.
pub const MIN_QUERY_CHARS: usize = 2;

const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// True when `location` is too short to look up.
pub fn is_query_too_short(location: &str) -> bool {
    location.trim().chars().count() < MIN_QUERY_CHARS
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weathercode: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherProvider {
    pub fn new(settings: &WeatherSettings) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            geocoding_url: settings.geocoding_url.clone(),
            forecast_url: settings.forecast_url.clone(),
        })
    }

    /// Resolve a place name to its first geocoding match.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, name: &str) -> Result<GeocodeResult, WeatherError> {
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[("name", name)])
            .send()
            .await?;

        let body: GeocodingResponse = Self::handle_response(response).await?;
        let place = body.into_first(name)?;

        tracing::debug!(
            "Geocoded {} to {} ({:.4}, {:.4})",
            name,
            place.name,
            place.latitude,
            place.longitude
        );
        Ok(place)
    }

    /// Fetch the daily forecast for a geocoded place.
    #[instrument(skip(self, place), fields(place = %place.name), level = "debug")]
    pub async fn fetch_daily(&self, place: &GeocodeResult) -> Result<DailyForecast, WeatherError> {
        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("timezone", place.timezone.as_str()),
                ("daily", DAILY_FIELDS),
            ])
            .send()
            .await?;

        let body: ForecastResponse = Self::handle_response(response).await?;
        let daily = body
            .daily
            .ok_or_else(|| WeatherError::Parse("forecast response has no daily block".into()))?;

        DailyForecast::new(
            daily.time,
            daily.temperature_2m_max,
            daily.temperature_2m_min,
            daily.weathercode,
        )
    }

    /// Geocode `location`, then fetch its forecast.
    ///
    /// Short queries return `Skipped` without touching the network.
    pub async fn lookup(&self, location: &str) -> Result<LookupOutcome, WeatherError> {
        if is_query_too_short(location) {
            return Ok(LookupOutcome::Skipped);
        }

        let place = self.geocode(location.trim()).await?;
        let forecast = self.fetch_daily(&place).await?;

        tracing::info!(
            "Fetched {}-day forecast for {}",
            forecast.len(),
            place.name
        );

        Ok(LookupOutcome::Found(Lookup {
            display_name: place.display_name(),
            forecast,
        }))
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
