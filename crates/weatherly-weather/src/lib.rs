//! Weather lookup for Weatherly
//!
//! Resolves a place name via the Open-Meteo geocoding API, fetches its daily
//! forecast, and persists the last attempted location.

pub mod cache;
pub mod format;
pub mod geocode;
pub mod provider;
pub mod types;

pub use cache::LocationCache;
pub use format::format_day;
pub use geocode::country_flag;
pub use provider::{is_query_too_short, WeatherProvider, MIN_QUERY_CHARS};
pub use types::*;
