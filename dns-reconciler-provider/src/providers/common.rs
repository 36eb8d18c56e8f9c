//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::RecordType;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("failed to build HTTP client: {e}"),
        })
}

// ============ 记录类型转换 ============

/// 将字符串转换为 [`RecordType`]
pub fn parse_record_type(record_type: &str, provider: &str) -> Result<RecordType> {
    RecordType::parse(record_type).ok_or_else(|| ProviderError::UnsupportedRecordType {
        provider: provider.to_string(),
        record_type: record_type.to_string(),
    })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点并转为小写
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// 区域的完全限定名（带末尾点）
/// 如: "Example.com" -> "example.com."
pub fn zone_fqdn(zone_name: &str) -> String {
    format!("{}.", normalize_domain_name(zone_name))
}

/// 规范化记录标签
///
/// The apex (`@`, an empty label, or the zone name itself in any case, with
/// or without trailing dot) becomes the zone FQDN. Every other label is kept
/// as given, lower-cased.
pub fn normalize_label(label: &str, zone_name: &str) -> String {
    let label = label.trim();
    if label.is_empty()
        || label == "@"
        || normalize_domain_name(label) == normalize_domain_name(zone_name)
    {
        zone_fqdn(zone_name)
    } else {
        label.to_ascii_lowercase()
    }
}

/// 按 origin 语义补全域名
/// 如: "mail" + "example.com" -> "mail.example.com."
/// 如: "@" + "example.com" -> "example.com."
/// 如: "mail.other.net." + "example.com" -> "mail.other.net."
pub fn add_origin(name: &str, zone_name: &str) -> String {
    let name = name.trim();
    if name == "@" || name.is_empty() {
        zone_fqdn(zone_name)
    } else if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.{}", zone_fqdn(zone_name))
    }
}

/// 将已是绝对名称（可能缺少末尾点）的域名补上末尾点
/// 如: "target.example.com" -> "target.example.com."
pub fn ensure_trailing_dot(name: &str) -> String {
    let name = name.trim();
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown_types() {
        assert_eq!(parse_record_type("txt", "t").unwrap(), RecordType::Txt);
        let err = parse_record_type("LOC", "t").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UnsupportedRecordType { ref record_type, .. } if record_type == "LOC"
        ));
    }

    #[test]
    fn apex_marker_becomes_zone_fqdn() {
        assert_eq!(normalize_label("@", "example.com"), "example.com.");
        assert_eq!(normalize_label("", "example.com"), "example.com.");
        assert_eq!(normalize_label("Example.COM.", "example.com"), "example.com.");
        assert_eq!(normalize_label("example.com", "example.com."), "example.com.");
    }

    #[test]
    fn other_labels_are_kept_lowercased() {
        assert_eq!(normalize_label("WWW", "example.com"), "www");
        assert_eq!(normalize_label("a.b", "example.com"), "a.b");
        assert_eq!(
            normalize_label("www.example.com.", "example.com"),
            "www.example.com."
        );
    }

    #[test]
    fn add_origin_semantics() {
        assert_eq!(add_origin("mail", "example.com"), "mail.example.com.");
        assert_eq!(add_origin("@", "example.com"), "example.com.");
        assert_eq!(add_origin("mx.other.net.", "example.com"), "mx.other.net.");
    }

    #[test]
    fn trailing_dot_added_once() {
        assert_eq!(ensure_trailing_dot("a.example.com"), "a.example.com.");
        assert_eq!(ensure_trailing_dot("a.example.com."), "a.example.com.");
    }
}
