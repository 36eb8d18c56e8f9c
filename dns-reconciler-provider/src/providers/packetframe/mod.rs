//! Packetframe DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::{Client, Url};

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::types::RecordType;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::{PacketframeRecord, PacketframeZone, ZoneListResponse};

pub(crate) const PROVIDER_NAME: &str = "packetframe";
pub(crate) const PACKETFRAME_API_BASE: &str = "https://packetframe.com/api/";
pub(crate) const DEFAULT_NAMESERVERS: [&str; 2] = ["ns1.packetframe.com", "ns2.packetframe.com"];
/// Packetframe 未声明 TTL 时使用的默认值（秒）
pub(crate) const DEFAULT_TTL: u32 = 300;
/// Packetframe 单值字段可承载的记录类型
pub(crate) const SUPPORTED_RECORD_TYPES: &[RecordType] = &[
    RecordType::A,
    RecordType::Aaaa,
    RecordType::Ptr,
    RecordType::Txt,
    RecordType::Cname,
    RecordType::Mx,
];

/// Packetframe DNS Provider
pub struct PacketframeProvider {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
}

/// Packetframe Provider Builder
pub struct PacketframeProviderBuilder {
    api_key: String,
    base_url: Option<String>,
}

impl PacketframeProviderBuilder {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: None,
        }
    }

    /// Overrides the API base URL (e.g. to point at a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the provider. Performs no network I/O.
    pub fn build(self) -> Result<PacketframeProvider> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials {
                provider: PROVIDER_NAME.to_string(),
                raw_message: Some("missing Packetframe token".to_string()),
            });
        }

        let mut base = self
            .base_url
            .unwrap_or_else(|| PACKETFRAME_API_BASE.to_string());
        // Url::join 只在末尾带 `/` 时保留最后一段路径
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ProviderError::InvalidParameter {
            provider: PROVIDER_NAME.to_string(),
            param: "baseUrl".to_string(),
            detail: e.to_string(),
        })?;

        log::debug!(
            "[{PROVIDER_NAME}] client for {base_url} (apikey {})",
            mask_secret(&self.api_key)
        );

        Ok(PacketframeProvider {
            client: create_http_client(PROVIDER_NAME)?,
            base_url,
            api_key: self.api_key,
        })
    }
}

impl PacketframeProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: String) -> PacketframeProviderBuilder {
        PacketframeProviderBuilder::new(api_key)
    }
}
