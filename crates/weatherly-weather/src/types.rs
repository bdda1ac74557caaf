use crate::geocode::country_flag;

/// Icon categories for WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Clear,
    MostlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    SevereThunderstorm,
    Unknown,
}

impl WeatherIcon {
    /// Convert WMO weather code to its icon category.
    /// Membership is exact; codes outside every group are `Unknown`.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MostlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 56 | 61 | 66 | 80 => Self::Drizzle,
            53 | 55 | 57 | 63 | 65 | 67 | 81 | 82 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 => Self::Thunderstorm,
            96 | 99 => Self::SevereThunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Display glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyClear => "🌤",
            Self::PartlyCloudy => "⛅️",
            Self::Overcast => "☁️",
            Self::Fog => "🌫",
            Self::Drizzle => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Thunderstorm => "🌩",
            Self::SevereThunderstorm => "⛈",
            Self::Unknown => "NOT FOUND",
        }
    }
}

/// First geocoding match for a place name
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA time zone identifier, e.g. "Europe/Paris"
    pub timezone: String,
    pub name: String,
    /// ISO 3166-1 alpha-2
    pub country_code: String,
}

impl GeocodeResult {
    /// Place name followed by the country flag, e.g. "Paris 🇫🇷"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, country_flag(&self.country_code))
    }
}

/// Multi-day forecast as parallel arrays; index 0 is today.
///
/// Only constructible through `new`, so the four sequences always have
/// equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    dates: Vec<String>,
    max_temps: Vec<f64>,
    min_temps: Vec<f64>,
    weather_codes: Vec<i32>,
}

impl DailyForecast {
    /// Build a forecast, rejecting sequences of unequal length.
    pub fn new(
        dates: Vec<String>,
        max_temps: Vec<f64>,
        min_temps: Vec<f64>,
        weather_codes: Vec<i32>,
    ) -> Result<Self, WeatherError> {
        let len = dates.len();
        if max_temps.len() != len || min_temps.len() != len || weather_codes.len() != len {
            return Err(WeatherError::Parse(format!(
                "daily arrays differ in length: time={}, max={}, min={}, codes={}",
                len,
                max_temps.len(),
                min_temps.len(),
                weather_codes.len()
            )));
        }

        Ok(Self {
            dates,
            max_temps,
            min_temps,
            weather_codes,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// True once there is at least one weather code to show
    pub fn has_codes(&self) -> bool {
        !self.weather_codes.is_empty()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn max_temps(&self) -> &[f64] {
        &self.max_temps
    }

    pub fn min_temps(&self) -> &[f64] {
        &self.min_temps
    }

    pub fn weather_codes(&self) -> &[i32] {
        &self.weather_codes
    }

    /// Per-day view across the four sequences
    pub fn days(&self) -> impl Iterator<Item = DayForecast<'_>> + '_ {
        (0..self.len()).map(move |i| DayForecast {
            date: &self.dates[i],
            max: self.max_temps[i],
            min: self.min_temps[i],
            code: self.weather_codes[i],
            is_today: i == 0,
        })
    }
}

/// One calendar day of a `DailyForecast`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayForecast<'a> {
    pub date: &'a str,
    /// °C
    pub max: f64,
    /// °C
    pub min: f64,
    pub code: i32,
    pub is_today: bool,
}

impl DayForecast<'_> {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_wmo_code(self.code)
    }
}

/// Result of a completed two-step lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub display_name: String,
    pub forecast: DailyForecast,
}

/// What a lookup attempt produced
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Query too short; no network calls were made
    Skipped,
    Found(Lookup),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Request cancelled")]
    Cancelled,
}

impl WeatherError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
