use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use weatherly_core::{Config, UiSettings};
use weatherly_ui::{views, WeatherModel};
use weatherly_weather::{LocationCache, WeatherProvider};

fn print_view(model: &WeatherModel, ui: &UiSettings) {
    println!("{}\n", views::render(model, ui));
}

/// Strip the line terminator and decode. Invalid UTF-8 is replaced, not fatal.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[tokio::main]
async fn main() -> Result<()> {
    weatherly_core::init()?;

    let (config, _) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let provider = Arc::new(WeatherProvider::new(&config.weather)?);
    let cache = LocationCache::new(&config.config_dir);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let mut model = WeatherModel::new(provider, cache, tokio::runtime::Handle::current(), tx);
    model.restore_cached_location();
    print_view(&model, &config.ui);

    // Each stdin line replaces the location, like editing the input box.
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    let mut stdin_open = true;

    // After EOF, stay until the last attempt has reported back.
    while stdin_open || model.is_loading() {
        tokio::select! {
            // Partial reads stay in `buf` until the newline arrives.
            read = stdin.read_until(b'\n', &mut buf), if stdin_open => match read {
                Ok(0) => {
                    tracing::debug!("stdin closed");
                    stdin_open = false;
                }
                Ok(_) => {
                    let line = decode_line(&buf);
                    buf.clear();
                    if model.set_location(line) {
                        print_view(&model, &config.ui);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },
            Some(msg) = rx.recv() => {
                if model.handle_message(msg) {
                    print_view(&model, &config.ui);
                }
            }
        }
    }

    tracing::info!("Weatherly shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"Paris\n"), "Paris");
        assert_eq!(decode_line(b"Paris\r\n"), "Paris");
        assert_eq!(decode_line(b"Paris"), "Paris");
        assert_eq!(decode_line(b"\n"), "");
    }

    #[test]
    fn test_decode_line_survives_invalid_utf8() {
        let line = decode_line(b"\xff\xfe\n");
        assert_eq!(line, "\u{FFFD}\u{FFFD}");

        let mixed = decode_line(b"Z\xfcrich\n");
        assert_eq!(mixed, "Z\u{FFFD}rich");
    }
}
