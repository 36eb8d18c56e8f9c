//! Record normalization between desired, canonical and wire forms.
//!
//! Every record is brought into the canonical [`Record`] shape before it is
//! compared, so that two records differing only in apex spelling, casing of
//! domain names or a missing trailing dot compare equal.

use std::collections::BTreeMap;

use crate::error::{ProviderError, Result};
use crate::providers::common::{
    add_origin, ensure_trailing_dot, normalize_label, parse_record_type, zone_fqdn,
};
use crate::types::{DesiredRecord, ProviderRecord, Record, RecordType, TargetEncoding};

/// Metadata key carrying the provider-side proxy flag.
pub const PROXIED_KEY: &str = "proxied";

/// Bidirectional mapping between a provider's wire records and [`Record`].
///
/// Holds the provider's table of record types it can transmit; anything
/// outside it is rejected with [`ProviderError::UnsupportedRecordType`].
#[derive(Debug, Clone, Copy)]
pub struct RecordNormalizer {
    provider: &'static str,
    supported: &'static [RecordType],
}

impl RecordNormalizer {
    pub const fn new(provider: &'static str, supported: &'static [RecordType]) -> Self {
        Self {
            provider,
            supported,
        }
    }

    /// Provider this normalizer encodes for.
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// Record types the provider can transmit.
    pub fn supported_types(&self) -> &'static [RecordType] {
        self.supported
    }

    pub fn supports(&self, record_type: RecordType) -> bool {
        self.supported.contains(&record_type)
    }

    /// Normalizes an operator-declared record for `zone_name`.
    ///
    /// Hostname targets are qualified with origin semantics: `@` is the
    /// zone, a trailing dot marks an absolute name, anything else is
    /// relative to the zone.
    pub fn from_desired(
        &self,
        desired: &DesiredRecord,
        zone_name: &str,
        default_ttl: u32,
    ) -> Result<Record> {
        let record_type = parse_record_type(&desired.record_type, self.provider)?;
        let value = match record_type.target_encoding() {
            TargetEncoding::Verbatim => desired.value.clone(),
            TargetEncoding::Hostname => add_origin(&desired.value, zone_name).to_ascii_lowercase(),
        };

        Ok(Record {
            id: None,
            label: normalize_label(&desired.label, zone_name),
            record_type,
            value,
            ttl: desired.ttl.unwrap_or(default_ttl),
            metadata: desired.metadata.clone(),
        })
    }

    /// Normalizes a record read back from the provider.
    ///
    /// The wire carries hostname targets as absolute names without the
    /// trailing dot, so only the dot is added.
    pub fn from_provider(&self, wire: &ProviderRecord, zone_name: &str) -> Result<Record> {
        let record_type = parse_record_type(&wire.record_type, self.provider)?;
        let value = match record_type.target_encoding() {
            TargetEncoding::Verbatim => wire.value.clone(),
            TargetEncoding::Hostname if wire.value.trim() == "@" => zone_fqdn(zone_name),
            TargetEncoding::Hostname => ensure_trailing_dot(&wire.value).to_ascii_lowercase(),
        };

        let mut metadata = BTreeMap::new();
        if wire.proxied {
            metadata.insert(PROXIED_KEY.to_string(), "true".to_string());
        }

        Ok(Record {
            id: wire.id.clone(),
            label: normalize_label(&wire.label, zone_name),
            record_type,
            value,
            ttl: wire.ttl,
            metadata,
        })
    }

    /// Encodes a canonical record into the provider's wire shape.
    pub fn to_provider(&self, record: &Record) -> Result<ProviderRecord> {
        if !self.supports(record.record_type) {
            return Err(ProviderError::UnsupportedRecordType {
                provider: self.provider.to_string(),
                record_type: record.record_type.to_string(),
            });
        }

        Ok(Self::wire_form(record))
    }

    /// Wire shape of a record without the transmit check. Used to describe
    /// records that only ever get deleted.
    pub fn wire_form(record: &Record) -> ProviderRecord {
        ProviderRecord {
            id: record.id.clone(),
            label: record.label.clone(),
            ttl: record.ttl,
            record_type: record.record_type.as_str().to_string(),
            value: record.value.clone(),
            proxied: record
                .metadata
                .get(PROXIED_KEY)
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        }
    }
}
