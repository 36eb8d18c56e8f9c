//! Shared request/response plumbing for provider integrations.
//!
//! Providers build their own `RequestBuilder` (URL, auth, body); this module
//! sends it once, logs the exchange and hands back status and body text.
//! Status interpretation is left to each provider's error mapper.

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Stateless HTTP helpers.
pub struct HttpUtils;

impl HttpUtils {
    /// Sends `request` and reads the full body, whatever the status.
    ///
    /// `method` and `url` are only used for log lines. Transport timeouts
    /// become [`ProviderError::Timeout`], any other transport failure
    /// [`ProviderError::NetworkError`].
    pub async fn execute_request(
        request: RequestBuilder,
        provider: &str,
        method: &str,
        url: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{provider}] {method} {url}");

        let response = request
            .send()
            .await
            .map_err(|e| Self::transport_error(provider, &e))?;
        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("reading response body: {e}"),
            })?;

        log::debug!(
            "[{provider}] {method} {url} -> {status}: {}",
            truncate_for_log(&body)
        );
        Ok((status, body))
    }

    fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
        let provider = provider.to_string();
        let detail = e.to_string();
        if e.is_timeout() {
            ProviderError::Timeout { provider, detail }
        } else {
            ProviderError::NetworkError { provider, detail }
        }
    }

    /// Decodes a success body, logging the offending text on failure.
    pub fn parse_json<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider}] undecodable response ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Encodes a request body.
    pub fn to_json<B: Serialize + ?Sized>(body: &B, provider: &str) -> Result<String> {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: provider.to_string(),
            detail: e.to_string(),
        })
    }
}
