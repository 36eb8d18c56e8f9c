//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use dns_reconciler_provider::{
    ProviderError, ProviderMetadata, ProviderRecord, Record, RecordNormalizer, RecordType,
    Result, Zone, ZoneProvider,
};
use tokio::sync::RwLock;

pub const MOCK_PROVIDER: &str = "mock";
pub const TEST_ZONE_ID: &str = "zone-1";
pub const TEST_ZONE_NAME: &str = "example.com";

const MOCK_SUPPORTED: &[RecordType] = &[
    RecordType::A,
    RecordType::Aaaa,
    RecordType::Cname,
    RecordType::Mx,
    RecordType::Txt,
];

/// Canonical record without provider id.
pub fn record(label: &str, record_type: RecordType, value: &str, ttl: u32) -> Record {
    Record {
        id: None,
        label: label.to_string(),
        record_type,
        value: value.to_string(),
        ttl,
        metadata: BTreeMap::new(),
    }
}

/// The zone served by [`MockZoneProvider`], without records.
pub fn test_zone() -> Zone {
    Zone {
        id: TEST_ZONE_ID.to_string(),
        name: TEST_ZONE_NAME.to_string(),
        records: Vec::new(),
    }
}

// ===== MockZoneProvider =====

#[derive(Default)]
struct MockState {
    records: Vec<ProviderRecord>,
    calls: Vec<String>,
    next_id: u32,
    per_zone_listing: bool,
    fail_fetch_zones: bool,
    fail_creates: bool,
    fail_deletes: bool,
}

/// In-memory provider serving a single zone, with failure injection.
pub struct MockZoneProvider {
    state: RwLock<MockState>,
}

impl MockZoneProvider {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MockState::default()),
        }
    }

    /// Replaces the zone's records.
    pub async fn seed(&self, records: Vec<Record>) {
        self.state.write().await.records =
            records.iter().map(RecordNormalizer::wire_form).collect();
    }

    /// Replaces the zone's records with raw wire records.
    pub async fn seed_wire(&self, records: Vec<ProviderRecord>) {
        self.state.write().await.records = records;
    }

    /// 如果 true，fetch_records 返回记录；否则返回 Unimplemented
    pub async fn set_per_zone_listing(&self, enabled: bool) {
        self.state.write().await.per_zone_listing = enabled;
    }

    pub async fn fail_fetch_zones(&self, fail: bool) {
        self.state.write().await.fail_fetch_zones = fail;
    }

    pub async fn fail_creates(&self, fail: bool) {
        self.state.write().await.fail_creates = fail;
    }

    pub async fn fail_deletes(&self, fail: bool) {
        self.state.write().await.fail_deletes = fail;
    }

    /// Current records, in storage order.
    pub async fn records(&self) -> Vec<ProviderRecord> {
        self.state.read().await.records.clone()
    }

    /// Provider calls made so far, e.g. `"create www A 192.0.2.1"`.
    pub async fn calls(&self) -> Vec<String> {
        self.state.read().await.calls.clone()
    }

    fn injected(&self, operation: &str) -> ProviderError {
        ProviderError::NetworkError {
            provider: MOCK_PROVIDER.to_string(),
            detail: format!("injected {operation} failure"),
        }
    }
}

#[async_trait]
impl ZoneProvider for MockZoneProvider {
    fn id(&self) -> &'static str {
        MOCK_PROVIDER
    }

    fn metadata() -> ProviderMetadata {
        unimplemented!("mock provider has no metadata")
    }

    fn normalizer(&self) -> RecordNormalizer {
        RecordNormalizer::new(MOCK_PROVIDER, MOCK_SUPPORTED)
    }

    async fn fetch_zones(&self) -> Result<HashMap<String, Zone>> {
        let mut state = self.state.write().await;
        state.calls.push("fetch_zones".to_string());
        if state.fail_fetch_zones {
            return Err(self.injected("fetch_zones"));
        }

        let mut zone = test_zone();
        zone.records = state.records.clone();
        Ok(HashMap::from([(zone.name.clone(), zone)]))
    }

    async fn fetch_records(&self, zone_id: &str) -> Result<Vec<ProviderRecord>> {
        let mut state = self.state.write().await;
        state.calls.push(format!("fetch_records {zone_id}"));
        if !state.per_zone_listing {
            return Err(ProviderError::Unimplemented {
                provider: MOCK_PROVIDER.to_string(),
                operation: "fetch_records".to_string(),
            });
        }
        Ok(state.records.clone())
    }

    async fn create_record(&self, _zone_id: &str, record: &Record) -> Result<ProviderRecord> {
        let mut wire = self.normalizer().to_provider(record)?;
        let mut state = self.state.write().await;
        state.calls.push(format!(
            "create {} {} {}",
            record.label, record.record_type, record.value
        ));
        if state.fail_creates {
            return Err(self.injected("create"));
        }

        state.next_id += 1;
        wire.id = Some(format!("mock-{}", state.next_id));
        state.records.push(wire.clone());
        Ok(wire)
    }

    async fn delete_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.calls.push(format!("delete {record_id}"));
        if state.fail_deletes {
            return Err(self.injected("delete"));
        }

        let before = state.records.len();
        state
            .records
            .retain(|r| r.id.as_deref() != Some(record_id));
        if state.records.len() == before {
            return Err(ProviderError::RecordNotFound {
                provider: MOCK_PROVIDER.to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}
