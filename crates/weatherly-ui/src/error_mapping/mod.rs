//! Maps service errors to weatherly_core::AppError for consistent diagnostics.

mod weather;

pub use weather::to_app_error;
