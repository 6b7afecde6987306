use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::error::{AcbError, Result};

/// Pacing and identification used for every page request.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    /// Total attempts per page, including the first one.
    pub max_attempts: u32,
    /// Fixed pause between two attempts of the same page.
    pub retry_delay: Duration,
    /// Pause after every successful fetch.
    pub rate_limit: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: "BasketballStatsScraper/1.0".to_string(),
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
            rate_limit: Duration::from_secs(1),
        }
    }
}

/// Performs a single GET and returns the body of a successful response.
///
/// Implemented for [`reqwest::Client`]; anything else that can fetch a page
/// (a cache, a scripted double in tests) can stand in for it.
pub trait Transport: Sync {
    fn get_text(&self, url: &str, user_agent: &str) -> impl Future<Output = Result<String>> + Send;
}

impl Transport for reqwest::Client {
    async fn get_text(&self, url: &str, user_agent: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = reqwest::Client::get(self, url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| AcbError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcbError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| AcbError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    }
}

/// Fetch one game page, retrying with a fixed delay.
///
/// The rate-limit pause is taken once, after the successful attempt. When
/// every attempt fails the last error is wrapped in
/// [`AcbError::RetriesExhausted`].
#[instrument(skip(transport, settings))]
pub(crate) async fn fetch_game<T: Transport + ?Sized>(
    transport: &T,
    game_id: u32,
    url: &str,
    settings: &FetchSettings,
) -> Result<String> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match transport.get_text(url, &settings.user_agent).await {
            Ok(body) => {
                debug!(game_id, attempt, bytes = body.len(), "page fetched");
                sleep(settings.rate_limit).await;
                return Ok(body);
            }
            Err(e) if attempt < settings.max_attempts => {
                warn!(game_id, attempt, error = %e, "fetch failed, retrying");
                sleep(settings.retry_delay).await;
            }
            Err(e) => {
                return Err(AcbError::RetriesExhausted {
                    url: url.to_owned(),
                    attempts: attempt,
                    last: Box::new(e),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    /// Fails with 503 for the first `failures` calls, then serves `body`.
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl Transport for Flaky {
        async fn get_text(&self, url: &str, _user_agent: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(AcbError::UnexpectedStatus {
                    url: url.to_owned(),
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                })
            } else {
                Ok("<html>ok</html>".to_string())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_succeeds_on_third_attempt() {
        let transport = Flaky::new(2);
        let settings = FetchSettings::default();
        let start = Instant::now();

        let body = fetch_game(&transport, 1, "http://acb.test/1", &settings)
            .await
            .unwrap();

        assert_eq!(body, "<html>ok</html>");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
        // two retry pauses, then the rate-limit pause
        assert_eq!(
            start.elapsed(),
            settings.retry_delay * 2 + settings.rate_limit
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_gives_up_after_max_attempts() {
        let transport = Flaky::new(u32::MAX);
        let settings = FetchSettings::default();
        let start = Instant::now();

        let err = fetch_game(&transport, 9, "http://acb.test/9", &settings)
            .await
            .unwrap_err();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), settings.retry_delay * 2);
        match err {
            AcbError::RetriesExhausted { url, attempts, last } => {
                assert_eq!(url, "http://acb.test/9");
                assert_eq!(attempts, 3);
                assert!(matches!(*last, AcbError::UnexpectedStatus { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_applies_after_success() {
        let transport = Flaky::new(0);
        let settings = FetchSettings {
            rate_limit: Duration::from_millis(250),
            ..FetchSettings::default()
        };
        let start = Instant::now();

        fetch_game(&transport, 2, "http://acb.test/2", &settings)
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/partido/104224")
            .match_header("user-agent", "TestAgent/2.0")
            .with_status(200)
            .with_body("<html><body>box score</body></html>")
            .create_async()
            .await;

        let url = format!("{}/partido/104224", server.url());
        let body = reqwest::Client::new()
            .get_text(&url, "TestAgent/2.0")
            .await
            .unwrap();

        assert!(body.contains("box score"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reqwest_transport_rejects_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/partido/1")
            .with_status(503)
            .create_async()
            .await;

        let url = format!("{}/partido/1", server.url());
        let err = reqwest::Client::new()
            .get_text(&url, "TestAgent/2.0")
            .await
            .unwrap_err();

        match err {
            AcbError::UnexpectedStatus { status, .. } => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
