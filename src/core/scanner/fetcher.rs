// src/core/scanner/fetcher.rs

use std::error::Error as _;
use std::time::Duration;

use reqwest::header::HeaderMap;
use tracing::{error, info};
use url::Url;

use crate::core::models::FetchError;

/// User agent sent with every inspection request.
pub const USER_AGENT: &str = concat!("HeaderInspector/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the response headers for a URL.
///
/// The shell only talks to this seam, so tests can swap the network out.
pub trait HeaderSource {
    fn fetch_headers(&self, url: &Url) -> impl Future<Output = Result<HeaderMap, FetchError>>;
}

/// Fetches headers with a single time-bounded GET request. No retries.
pub struct HttpHeaderSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpHeaderSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::from_builder(reqwest::Client::builder(), timeout)
    }

    fn from_builder(builder: reqwest::ClientBuilder, timeout: Duration) -> Result<Self, FetchError> {
        let client = builder
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client.");
                FetchError::Request(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client, timeout })
    }
}

impl HeaderSource for HttpHeaderSource {
    async fn fetch_headers(&self, url: &Url) -> Result<HeaderMap, FetchError> {
        info!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "Fetching headers.");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(classify_error)?;
        info!(status = %response.status(), "Received HTTP response.");

        // Non-2xx answers are failures, like the status check of most HTTP clients.
        let response = response.error_for_status().map_err(classify_error)?;
        Ok(response.headers().clone())
    }
}

/// Maps a transport error onto the fetch error taxonomy.
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        error!(error = %e, "HTTP request timed out.");
        return FetchError::Timeout;
    }

    // reqwest keeps the interesting part (DNS, refused, TLS) in the source chain.
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    error!(error = %message, "HTTP request failed.");
    FetchError::Request(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Talks to the local test servers directly, whatever proxy the environment sets.
    fn direct_source(timeout: Duration) -> HttpHeaderSource {
        HttpHeaderSource::from_builder(reqwest::Client::builder().no_proxy(), timeout).unwrap()
    }

    /// Serves `response` verbatim to the first connection, after reading the request.
    async fn serve_once(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    #[tokio::test]
    async fn returns_response_headers() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nX-Frame-Options: DENY\r\nServer: test-server\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let source = direct_source(Duration::from_secs(5));

        let headers = source.fetch_headers(&url).await.unwrap();
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("server").unwrap(), "test-server");
    }

    #[tokio::test]
    async fn non_success_status_is_a_request_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let source = direct_source(Duration::from_secs(5));

        match source.fetch_headers(&url).await {
            Err(FetchError::Request(message)) => assert!(message.contains("404"), "{message}"),
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        let source = direct_source(Duration::from_millis(200));

        assert_eq!(source.fetch_headers(&url).await.unwrap_err(), FetchError::Timeout);
    }

    #[tokio::test]
    async fn refused_connection_is_a_request_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        let source = direct_source(Duration::from_secs(5));

        assert!(matches!(
            source.fetch_headers(&url).await,
            Err(FetchError::Request(_))
        ));
    }
}
