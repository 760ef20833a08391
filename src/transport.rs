//! HTTP transport used by the client to reach the DeepL API.
//!
//! The client only needs one shape of request: a form-encoded POST with an
//! `Authorization` header. Keeping it behind [`HttpTransport`] lets tests count
//! or script remote calls without a network.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Default bound on a single remote call. There is no retry.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw HTTP outcome: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced an HTTP response (timeout, DNS, TLS, connection...).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `fields` as `application/x-www-form-urlencoded` to `url`.
    async fn post_form(
        &self,
        url: &str,
        authorization: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, TransportError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client as-is.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        authorization: &str,
        fields: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", authorization)
            .form(fields)
            .send()
            .await
            .map_err(|e| TransportError {
                timed_out: e.is_timeout(),
                message: format!("Failed to send request to DeepL API: {}", e),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| TransportError {
            timed_out: e.is_timeout(),
            message: format!("Failed to read DeepL API response body: {}", e),
        })?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_post_form_sends_auth_and_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .and(header("Authorization", "DeepL-Auth-Key secret"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("text=Hello+world"))
            .and(body_string_contains("target_lang=DE"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(DEFAULT_TIMEOUT).unwrap();
        let response = transport
            .post_form(
                &format!("{}/v2/translate", mock_server.uri()),
                "DeepL-Auth-Key secret",
                &fields(&[("text", "Hello world"), ("target_lang", "DE")]),
            )
            .await
            .expect("Should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn test_post_form_passes_error_status_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(456).set_body_string("quota"))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(DEFAULT_TIMEOUT).unwrap();
        let response = transport
            .post_form(&mock_server.uri(), "DeepL-Auth-Key x", &[])
            .await
            .expect("HTTP errors are still responses");

        assert_eq!(response.status, 456);
        assert_eq!(response.body, "quota");
    }

    #[tokio::test]
    async fn test_post_form_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_millis(50)).unwrap();
        let err = transport
            .post_form(&mock_server.uri(), "DeepL-Auth-Key x", &[])
            .await
            .unwrap_err();

        assert!(err.timed_out);
        assert!(err.message.contains("Failed to send request"));
    }

    #[tokio::test]
    async fn test_post_form_connection_refused() {
        // Port 9 (discard) is not expected to be listening locally
        let transport = ReqwestTransport::new(Duration::from_secs(1)).unwrap();
        let result = transport
            .post_form("http://127.0.0.1:9/v2/translate", "DeepL-Auth-Key x", &[])
            .await;

        assert!(result.is_err());
    }
}
