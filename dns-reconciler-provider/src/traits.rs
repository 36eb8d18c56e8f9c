use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{ApiErrorReason, ProviderError, Result};
use crate::normalize::RecordNormalizer;
use crate::types::{ProviderMetadata, ProviderRecord, Record, Zone};

/// 原始 API 错误（内部使用）
///
/// A non-success HTTP response, before any provider-specific decoding.
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// 原始响应体
    pub body: String,
}

impl RawApiError {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// 域名（用于 `DomainNotFound` 等错误）
    pub domain: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：结构化状态错误（fallback）
    ///
    /// Decodes the `{"errors":[{"field","reason"}]}` body shared by the
    /// JSON APIs this crate talks to, or reports the bare status when the
    /// body is not in that shape.
    fn status_error(&self, raw: &RawApiError) -> ProviderError {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            errors: Vec<ApiErrorReason>,
        }

        match serde_json::from_str::<ErrorBody>(&raw.body) {
            Ok(body) => ProviderError::ApiError {
                provider: self.provider_name().to_string(),
                status: raw.status,
                reasons: body.errors,
            },
            Err(_) => ProviderError::BadStatus {
                provider: self.provider_name().to_string(),
                status: raw.status,
            },
        }
    }
}

/// DNS 提供商 Trait
///
/// The capability set every provider integration offers to the reconciler.
/// Each method issues at most one HTTP request and never retries.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    ///
    /// 此方法不需要实例，可以在创建 Provider 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Record normalizer carrying this provider's wire-encoding table.
    fn normalizer(&self) -> RecordNormalizer;

    /// TTL applied to desired records that do not declare one.
    fn default_ttl(&self) -> u32 {
        300
    }

    /// Nameservers the provider serves its zones from, if fixed.
    fn nameservers(&self) -> Vec<String> {
        Vec::new()
    }

    /// Lists every zone visible to the authenticated account, keyed by
    /// zone name (lower-case, no trailing dot).
    async fn fetch_zones(&self) -> Result<HashMap<String, Zone>>;

    /// Lists the records of one zone.
    ///
    /// Providers without a per-zone listing endpoint keep this default and
    /// report it explicitly instead of returning an empty list.
    async fn fetch_records(&self, zone_id: &str) -> Result<Vec<ProviderRecord>> {
        log::debug!("[{}] fetch_records({zone_id}) is not supported", self.id());
        Err(ProviderError::Unimplemented {
            provider: self.id().to_string(),
            operation: "fetch_records".to_string(),
        })
    }

    /// Creates a record from its canonical form and returns the record as
    /// the provider stored it, including the assigned id.
    ///
    /// Fails with [`ProviderError::UnsupportedRecordType`] when the record's
    /// type has no wire encoding for this provider.
    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<ProviderRecord>;

    /// Deletes a record by its provider-assigned id.
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mapper;

    impl ProviderErrorMapper for Mapper {
        fn provider_name(&self) -> &'static str {
            "test"
        }

        fn map_error(&self, raw: RawApiError, _context: ErrorContext) -> ProviderError {
            self.status_error(&raw)
        }
    }

    #[test]
    fn status_error_decodes_reason_pairs() {
        let raw = RawApiError::new(
            422,
            r#"{"errors":[{"field":"label","reason":"invalid"},{"reason":"try again"}]}"#,
        );
        match Mapper.status_error(&raw) {
            ProviderError::ApiError {
                status, reasons, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(reasons.len(), 2);
                assert_eq!(reasons[0].field, "label");
                assert_eq!(reasons[1].field, "");
                assert_eq!(reasons[1].reason, "try again");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_error_falls_back_to_bad_status() {
        let raw = RawApiError::new(502, "<html>gateway</html>");
        assert!(matches!(
            Mapper.status_error(&raw),
            ProviderError::BadStatus { status: 502, .. }
        ));
    }

    #[test]
    fn parse_error_shortcut() {
        let e = Mapper.parse_error("missing field `zone`");
        assert_eq!(e.to_string(), "[test] Parse error: missing field `zone`");
    }
}
