//! Weather backend: async place lookups.
//! All network work runs on the tokio runtime; results sent via mpsc.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use weatherly_weather::{LookupOutcome, WeatherError, WeatherProvider};

/// Messages sent from async operations back to the model
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// A lookup attempt finished (never sent for cancelled attempts)
    LookupDone {
        generation: u64,
        location: String,
        result: Result<LookupOutcome, WeatherError>,
    },
}

/// Request a geocode + forecast lookup for `location`.
///
/// The attempt races `token`: once cancelled, its in-flight requests are
/// dropped and no message is sent. Sends `LookupDone` otherwise.
pub fn request_lookup(
    tx: &UnboundedSender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    provider: Arc<WeatherProvider>,
    generation: u64,
    token: CancellationToken,
    location: String,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(WeatherError::Cancelled),
            result = provider.lookup(&location) => result,
        };

        if matches!(&result, Err(e) if e.is_cancelled()) {
            return;
        }

        let _ = tx.send(WeatherServiceMessage::LookupDone {
            generation,
            location,
            result,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherly_core::WeatherSettings;

    fn unreachable_provider() -> Arc<WeatherProvider> {
        // Port 9 (discard) on loopback: requests fail fast or hang, never succeed
        let settings = WeatherSettings {
            geocoding_url: "http://127.0.0.1:9/v1/search".into(),
            forecast_url: "http://127.0.0.1:9/v1/forecast".into(),
            ..WeatherSettings::default()
        };
        Arc::new(WeatherProvider::new(&settings).unwrap())
    }

    #[tokio::test]
    async fn cancelled_lookup_sends_nothing() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let token = CancellationToken::new();
        token.cancel();

        request_lookup(
            &tx,
            &tokio::runtime::Handle::current(),
            unreachable_provider(),
            1,
            token,
            "Paris".into(),
        );
        drop(tx);

        // Channel closes without a message once the task exits
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn short_query_reports_skipped() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        request_lookup(
            &tx,
            &tokio::runtime::Handle::current(),
            unreachable_provider(),
            7,
            CancellationToken::new(),
            "x".into(),
        );

        match rx.recv().await {
            Some(WeatherServiceMessage::LookupDone {
                generation,
                location,
                result,
            }) => {
                assert_eq!(generation, 7);
                assert_eq!(location, "x");
                assert!(matches!(result, Ok(LookupOutcome::Skipped)));
            }
            None => panic!("expected a LookupDone message"),
        }
    }
}
