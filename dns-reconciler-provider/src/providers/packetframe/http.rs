//! Packetframe HTTP 请求方法

use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::PacketframeProvider;

const JSON_MEDIA_TYPE: &str = "application/json";

impl PacketframeProvider {
    /// 拼接 API 路径（相对于 base URL）
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "path".to_string(),
                detail: format!("{path}: {e}"),
            })
    }

    /// 发送请求，非 2xx 状态映射为统一错误
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        context: ErrorContext,
    ) -> Result<String> {
        let url = self.endpoint(path)?;

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(COOKIE, format!("apikey={}", self.api_key))
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(ACCEPT, JSON_MEDIA_TYPE);
        if let Some(body) = body {
            log::debug!("Request Body: {}", truncate_for_log(&body));
            request = request.body(body);
        }

        let (status, text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), url.as_str())
                .await?;

        if !(200..300).contains(&status) {
            let err = self.map_error(RawApiError::new(status, text), context);
            if err.is_expected() {
                log::warn!("{method} {url}: {err}");
            } else {
                log::error!("{method} {url}: {err}");
            }
            return Err(err);
        }

        Ok(text)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let text = self.send(Method::GET, path, None, context).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let body = HttpUtils::to_json(body, self.provider_name())?;
        let text = self.send(Method::POST, path, Some(body), context).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 DELETE 请求，响应体被忽略
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        self.send(Method::DELETE, path, None, context).await?;
        Ok(())
    }
}
