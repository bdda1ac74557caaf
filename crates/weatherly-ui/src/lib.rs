pub mod error_mapping;
pub mod models;
pub mod services;
pub mod views;

pub use models::WeatherModel;
pub use services::WeatherServiceMessage;
