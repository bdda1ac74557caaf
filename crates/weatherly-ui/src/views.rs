//! Terminal rendering of the weather view. Presentational only: everything
//! here reads from `WeatherModel` and returns text.

use weatherly_core::UiSettings;
use weatherly_weather::{format_day, DailyForecast, DayForecast};

use crate::models::WeatherModel;

pub const LOADING_TEXT: &str = "loading....";

/// Render the whole view for the current model state.
pub fn render(model: &WeatherModel, ui: &UiSettings) -> String {
    let mut lines = vec![ui.title.clone(), render_input(model.location(), &ui.placeholder)];

    if model.is_loading() {
        lines.push(LOADING_TEXT.to_string());
    }

    if let Some(forecast) = model.forecast().filter(|f| f.has_codes()) {
        lines.extend(render_forecast(model.display_location(), forecast));
    }

    lines.join("\n")
}

/// The input line; shows the placeholder when the query is empty.
pub fn render_input(location: &str, placeholder: &str) -> String {
    if location.is_empty() {
        format!("> {}", placeholder)
    } else {
        format!("> {}", location)
    }
}

/// Heading plus one line per day.
pub fn render_forecast(display_location: &str, forecast: &DailyForecast) -> Vec<String> {
    let mut lines = Vec::with_capacity(forecast.len() + 1);
    lines.push(format!("weather {}", display_location));
    lines.extend(forecast.days().map(|day| render_day(&day)));
    lines
}

/// `<icon> <day> <min>° — <max>°`
pub fn render_day(day: &DayForecast<'_>) -> String {
    format!(
        "{} {:<5} {} — {}",
        day.icon().glyph(),
        format_day(day.date, day.is_today),
        format_min(day.min),
        format_max(day.max)
    )
}

/// Whole-degree minimum, rounded down.
pub fn format_min(celsius: f64) -> String {
    format!("{}°", celsius.floor() as i64)
}

/// Whole-degree maximum, rounded up.
pub fn format_max(celsius: f64) -> String {
    format!("{}°", celsius.ceil() as i64)
}
