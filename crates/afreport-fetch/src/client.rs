//! HTTP client for the reporting API.

use futures::TryStreamExt;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;
use tracing::error;
use url::Url;

/// Configuration for the report client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from the request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("afreport/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while performing a request.
///
/// Failures are surfaced, not mitigated: there is no retry or backoff.
#[derive(Error, Debug)]
pub enum RequestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-200 status.
    #[error("unexpected HTTP status: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

/// Thin HTTP client over reqwest with explicit timeouts.
#[derive(Debug, Clone)]
pub struct ReportClient {
    client: Client,
    config: ClientConfig,
}

impl ReportClient {
    /// Creates a new report client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs a GET and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-200 status.
    pub async fn get_json(&self, url: &Url) -> Result<serde_json::Value, RequestError> {
        let response = self.client.get(url.clone()).send().await.map_err(|err| {
            error!(%url, error = %err, "request failed");
            err
        })?;
        let status = response.status();
        if status != StatusCode::OK {
            error!(%url, status = status.as_u16(), "data was not received");
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    /// Performs a GET and returns the body as a byte stream reader.
    ///
    /// The returned reader is only valid while being drained; callers must
    /// finish decoding before dropping it.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any non-200 status.
    pub async fn get_stream(
        &self,
        url: &Url,
    ) -> Result<impl AsyncRead + Unpin + Send + use<>, RequestError> {
        let response = self.client.get(url.clone()).send().await.map_err(|err| {
            error!(%url, error = %err, "request failed");
            err
        })?;
        let status = response.status();
        if status != StatusCode::OK {
            error!(%url, status = status.as_u16(), "data was not received");
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(StreamReader::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("afreport/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        assert!(ReportClient::with_defaults().is_ok());
    }

    #[tokio::test]
    async fn test_get_json_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/export/app/daily_report/v5"))
            .and(query_param("api_token", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = ReportClient::with_defaults().unwrap();
        let url = Url::parse(&format!(
            "{}/export/app/daily_report/v5?api_token=key",
            server.uri()
        ))
        .unwrap();
        let value = client.get_json(&url).await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_get_json_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = ReportClient::with_defaults().unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = client.get_json(&url).await.unwrap_err();
        assert!(matches!(err, RequestError::Status { status: 403 }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let client = ReportClient::with_defaults().unwrap();
        // Port 9 (discard) is not listening; the connection is refused.
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = client.get_json(&url).await.unwrap_err();
        assert!(matches!(err, RequestError::Http(_)));
    }

    #[tokio::test]
    async fn test_get_stream_yields_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n1,2\n"))
            .mount(&server)
            .await;

        let client = ReportClient::with_defaults().unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let mut reader = client.get_stream(&url).await.unwrap();
        let mut body = String::new();
        reader.read_to_string(&mut body).await.unwrap();
        assert_eq!(body, "a,b\n1,2\n");
    }
}
