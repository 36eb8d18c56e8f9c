//! Packetframe ZoneProvider trait 实现

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::normalize::RecordNormalizer;
use crate::providers::common::normalize_domain_name;
use crate::traits::{ErrorContext, ProviderErrorMapper, ZoneProvider};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderFeatures, ProviderMetadata, ProviderRecord,
    ProviderType, Record, Zone,
};

use super::{
    DEFAULT_NAMESERVERS, DEFAULT_TTL, PROVIDER_NAME, PacketframeProvider, PacketframeRecord,
    PacketframeZone, SUPPORTED_RECORD_TYPES, ZoneListResponse,
};

impl PacketframeProvider {
    /// 将 Packetframe zone 转换为 Zone
    /// Zone 没有独立 ID，API 路径直接使用规范化后的域名
    pub(crate) fn zone_from_wire(zone: PacketframeZone) -> Zone {
        let name = normalize_domain_name(&zone.zone);
        log::debug!(
            "[{PROVIDER_NAME}] zone {name}: {} records, serial {}",
            zone.records.len(),
            zone.serial.as_deref().unwrap_or("-")
        );
        Zone {
            id: name.clone(),
            name,
            records: zone.records.into_iter().map(ProviderRecord::from).collect(),
        }
    }
}

#[async_trait]
impl ZoneProvider for PacketframeProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Packetframe,
            name: "Packetframe".to_string(),
            description: "Packetframe anycast DNS".to_string(),
            credential_fields: vec![
                ProviderCredentialField {
                    key: "apikey".to_string(),
                    label: "API Key".to_string(),
                    field_type: FieldType::Password,
                    required: true,
                    help_text: Some("Sent as the apikey session cookie".to_string()),
                },
                ProviderCredentialField {
                    key: "baseUrl".to_string(),
                    label: "API Base URL".to_string(),
                    field_type: FieldType::Text,
                    required: false,
                    help_text: Some(format!("Defaults to {}", super::PACKETFRAME_API_BASE)),
                },
            ],
            supported_record_types: SUPPORTED_RECORD_TYPES.to_vec(),
            features: ProviderFeatures {
                proxy: true,
                per_zone_listing: false,
            },
        }
    }

    fn normalizer(&self) -> RecordNormalizer {
        RecordNormalizer::new(PROVIDER_NAME, SUPPORTED_RECORD_TYPES)
    }

    fn default_ttl(&self) -> u32 {
        DEFAULT_TTL
    }

    fn nameservers(&self) -> Vec<String> {
        DEFAULT_NAMESERVERS.iter().map(ToString::to_string).collect()
    }

    async fn fetch_zones(&self) -> Result<HashMap<String, Zone>> {
        let response: ZoneListResponse = self.get("zones/list", ErrorContext::default()).await?;

        if !response.success {
            return Err(ProviderError::Unknown {
                provider: self.provider_name().to_string(),
                raw_code: None,
                raw_message: "zone listing reported success=false".to_string(),
            });
        }

        let zones: HashMap<String, Zone> = response
            .message
            .into_iter()
            .map(Self::zone_from_wire)
            .map(|zone| (zone.name.clone(), zone))
            .collect();

        log::info!("[{PROVIDER_NAME}] fetched {} zones", zones.len());
        Ok(zones)
    }

    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<ProviderRecord> {
        let wire = self.normalizer().to_provider(record)?;
        let mut body = PacketframeRecord::from(&wire);
        body.id = None;

        let path = format!("zone/{}/add", urlencoding::encode(zone_id));
        let created: PacketframeRecord = self
            .post(
                &path,
                &body,
                ErrorContext {
                    record_id: None,
                    domain: Some(zone_id.to_string()),
                },
            )
            .await?;

        log::info!(
            "[{PROVIDER_NAME}] created {} {} in {zone_id} (id {})",
            created.record_type,
            created.label,
            created.id.as_deref().unwrap_or("-")
        );
        Ok(created.into())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        if record_id.is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "record_id".to_string(),
                detail: "record has no provider id".to_string(),
            });
        }

        let path = format!(
            "zone/{}/delete_record/{}",
            urlencoding::encode(zone_id),
            urlencoding::encode(record_id)
        );
        self.delete(
            &path,
            ErrorContext {
                record_id: Some(record_id.to_string()),
                domain: Some(zone_id.to_string()),
            },
        )
        .await?;

        log::info!("[{PROVIDER_NAME}] deleted record {record_id} in {zone_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_names_are_normalized() {
        let zone = PacketframeProvider::zone_from_wire(PacketframeZone {
            zone: "Example.COM.".to_string(),
            records: vec![],
            serial: None,
        });
        assert_eq!(zone.name, "example.com");
        assert_eq!(zone.id, "example.com");
    }

    #[test]
    fn metadata_lists_transmittable_types() {
        let meta = PacketframeProvider::metadata();
        assert_eq!(meta.id, ProviderType::Packetframe);
        assert_eq!(meta.supported_record_types.len(), 6);
        assert!(meta.credential_fields.iter().any(|f| f.key == "apikey" && f.required));
        assert!(!meta.features.per_zone_listing);
    }

    #[test]
    fn default_nameservers() {
        let p = PacketframeProvider::new("key".to_string()).unwrap();
        assert_eq!(
            p.nameservers(),
            vec!["ns1.packetframe.com", "ns2.packetframe.com"]
        );
        assert_eq!(p.default_ttl(), 300);
    }
}
