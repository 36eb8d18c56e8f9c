//! Packetframe API 类型定义

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::ProviderRecord;

use super::DEFAULT_TTL;

/// `GET zones/list` 响应
#[derive(Debug, Deserialize)]
pub struct ZoneListResponse {
    #[serde(default)]
    pub message: Vec<PacketframeZone>,
    #[serde(default)]
    pub success: bool,
}

/// Packetframe Zone 结构
#[derive(Debug, Deserialize)]
pub struct PacketframeZone {
    pub zone: String,
    #[serde(default)]
    pub records: Vec<PacketframeRecord>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub serial: Option<String>,
}

/// Packetframe DNS Record 结构（请求与响应共用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketframeRecord {
    #[serde(
        default,
        alias = "_id",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub id: Option<String>,
    pub label: String,
    /// 缺省时取 Packetframe 默认 TTL
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    #[serde(default)]
    pub proxied: bool,
}

impl From<PacketframeRecord> for ProviderRecord {
    fn from(r: PacketframeRecord) -> Self {
        Self {
            id: r.id,
            label: r.label,
            ttl: r.ttl,
            record_type: r.record_type,
            value: r.value,
            proxied: r.proxied,
        }
    }
}

impl From<&ProviderRecord> for PacketframeRecord {
    fn from(r: &ProviderRecord) -> Self {
        Self {
            id: r.id.clone(),
            label: r.label.clone(),
            ttl: r.ttl,
            record_type: r.record_type.clone(),
            value: r.value.clone(),
            proxied: r.proxied,
        }
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// 兼容字符串与数字两种 ID/serial 表示
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}
