use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use weatherly_weather::{
    is_query_too_short, DailyForecast, LocationCache, LookupOutcome, WeatherProvider,
};

use crate::error_mapping::to_app_error;
use crate::services::{request_lookup, WeatherServiceMessage};

/// Controller for the weather view.
///
/// Owns the query, loading flag and latest result. Every lookup attempt gets
/// a generation number; only messages carrying the latest generation may
/// change state.
pub struct WeatherModel {
    location: String,
    loading: bool,
    display_location: String,
    forecast: Option<DailyForecast>,
    generation: u64,
    cancel_token: Option<CancellationToken>,
    provider: Arc<WeatherProvider>,
    cache: LocationCache,
    runtime: tokio::runtime::Handle,
    tx: UnboundedSender<WeatherServiceMessage>,
}

impl WeatherModel {
    pub fn new(
        provider: Arc<WeatherProvider>,
        cache: LocationCache,
        runtime: tokio::runtime::Handle,
        tx: UnboundedSender<WeatherServiceMessage>,
    ) -> Self {
        Self {
            location: String::new(),
            loading: false,
            display_location: String::new(),
            forecast: None,
            generation: 0,
            cancel_token: None,
            provider,
            cache,
            runtime,
            tx,
        }
    }

    /// Read the persisted location once and look it up if non-empty.
    pub fn restore_cached_location(&mut self) {
        if let Err(e) = self.cache.load() {
            tracing::warn!("Failed to load location cache: {}", e);
            return;
        }

        match self.cache.get().map(str::to_owned) {
            Some(location) if !location.is_empty() => {
                self.set_location(location);
            }
            _ => tracing::debug!("No cached location to restore"),
        }
    }

    /// Replace the query. Returns true when an attempt was started.
    ///
    /// Any in-flight attempt is cancelled first.
    pub fn set_location(&mut self, location: impl Into<String>) -> bool {
        let location = location.into();
        if location == self.location && self.generation > 0 {
            return false;
        }

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.generation += 1;
        self.location = location;

        if is_query_too_short(&self.location) {
            tracing::debug!("Query {:?} too short, clearing forecast", self.location);
            self.clear_forecast();
            self.loading = false;
            let location = self.location.clone();
            self.persist(&location);
            return true;
        }

        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());
        self.loading = true;

        tracing::info!(
            "Looking up {:?} (attempt #{})",
            self.location,
            self.generation
        );
        request_lookup(
            &self.tx,
            &self.runtime,
            self.provider.clone(),
            self.generation,
            token,
            self.location.clone(),
        );
        true
    }

    /// Apply a service message. Returns true when visible state changed.
    pub fn handle_message(&mut self, msg: WeatherServiceMessage) -> bool {
        match msg {
            WeatherServiceMessage::LookupDone {
                generation,
                location,
                result,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Discarding stale lookup #{} for {:?} (latest is #{})",
                        generation,
                        location,
                        self.generation
                    );
                    return false;
                }

                match result {
                    Ok(LookupOutcome::Found(lookup)) => {
                        self.display_location = lookup.display_name;
                        self.forecast = Some(lookup.forecast);
                    }
                    Ok(LookupOutcome::Skipped) => self.clear_forecast(),
                    Err(e) if e.is_cancelled() => return false,
                    Err(e) => {
                        let err = to_app_error(e);
                        if err.is_not_found() {
                            tracing::warn!("{} ({})", err, err.user_message());
                        } else {
                            tracing::error!("Lookup for {:?} failed: {}", location, err);
                        }
                        self.clear_forecast();
                    }
                }

                self.cancel_token = None;
                self.loading = false;
                self.persist(&location);
                true
            }
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Place name with flag from the latest successful lookup
    pub fn display_location(&self) -> &str {
        &self.display_location
    }

    pub fn forecast(&self) -> Option<&DailyForecast> {
        self.forecast.as_ref()
    }

    /// Generation of the most recent attempt
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn clear_forecast(&mut self) {
        self.forecast = None;
        self.display_location.clear();
    }

    fn persist(&mut self, location: &str) {
        self.cache.set(location);
        if let Err(e) = self.cache.save() {
            let err = to_app_error(e);
            tracing::warn!("{} ({})", err, err.user_message());
        }
    }
}

impl Drop for WeatherModel {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
