//! Thin GET client shared by the weather and news sources.
//!
//! Every request gets a 10 second connect timeout and a 10 second read
//! timeout. There are no retries: a failed attempt fails the call and the next
//! scheduled refresh is the retry.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::error::{NetworkError, ReqwestErrorExt};

pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const READ_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("DashB/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpJsonClient {
    client: Client,
}

impl HttpJsonClient {
    pub fn new() -> Result<Self, NetworkError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .read_timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                NetworkError::ConnectionFailed(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Non-2xx statuses, timeouts, connection failures and undecodable bodies
    /// all surface as [`NetworkError`].
    #[instrument(skip(self), fields(url = %url), level = "debug")]
    pub async fn get_json(&self, url: &Url) -> Result<Value, NetworkError> {
        let response = self.get_response(url).await?;
        let body = response
            .bytes()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        serde_json::from_slice(&body)
            .map_err(|e| NetworkError::InvalidResponse(format!("malformed JSON body: {}", e)))
    }

    /// GET `url` and hand back the response once the status is known to be a
    /// success. The body is left unread so callers can stream it.
    pub async fn get_response(&self, url: &Url) -> Result<Response, NetworkError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

/// Parse a configured endpoint, mapping failures into the network taxonomy so
/// callers can treat a bad address like any other unreachable source.
pub fn parse_url(raw: &str) -> Result<Url, NetworkError> {
    Url::parse(raw).map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_rejects_garbage() {
        assert!(matches!(parse_url("not a url"), Err(NetworkError::InvalidUrl(_))));
        assert!(parse_url("https://api.open-meteo.com/v1/forecast").is_ok());
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpJsonClient::new().is_ok());
    }
}
