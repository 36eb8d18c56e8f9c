//! Zone reconciliation session

use std::collections::HashMap;
use std::sync::Arc;

use dns_reconciler_provider::{ProviderError, ZoneProvider, normalize_domain_name};

use crate::corrections::{
    AppliedCorrection, ApplyPolicy, Correction, apply_corrections, build_corrections,
};
use crate::diff::{diff_records, ensure_unique};
use crate::error::{CoreError, CoreResult, Operation, RecordSide};
use crate::types::{Record, Zone, ZoneConfig};

/// Zone placeholder in errors from calls that span every zone.
const ALL_ZONES: &str = "*";

/// Reconciliation session against one provider account.
///
/// Holds the provider and a zone index that is fetched on first use (or by
/// [`Reconciler::refresh`]) and reused afterwards. The index is never
/// re-fetched behind the caller's back: after [`Reconciler::apply`], call
/// `refresh` to plan against the provider's new state. Every provider call
/// is awaited before the next one is issued.
pub struct Reconciler {
    provider: Arc<dyn ZoneProvider>,
    zones: Option<HashMap<String, Zone>>,
}

impl Reconciler {
    /// 创建会话，不发起任何网络请求
    #[must_use]
    pub fn new(provider: Arc<dyn ZoneProvider>) -> Self {
        Self {
            provider,
            zones: None,
        }
    }

    pub fn provider(&self) -> &Arc<dyn ZoneProvider> {
        &self.provider
    }

    /// Whether the zone index has been fetched.
    pub fn is_populated(&self) -> bool {
        self.zones.is_some()
    }

    /// Nameservers the provider serves zones from.
    pub fn nameservers(&self) -> Vec<String> {
        self.provider.nameservers()
    }

    /// (Re-)fetches the zone index.
    pub async fn refresh(&mut self) -> CoreResult<()> {
        let zones = self
            .provider
            .fetch_zones()
            .await
            .map_err(|source| CoreError::Operation {
                zone: ALL_ZONES.to_string(),
                operation: Operation::FetchZones,
                source,
            })?;
        log::debug!("[{}] zone index holds {} zones", self.provider.id(), zones.len());
        self.zones = Some(zones);
        Ok(())
    }

    /// Resolves a zone by name, fetching the index if it is not populated.
    pub async fn zone(&mut self, name: &str) -> CoreResult<&Zone> {
        if self.zones.is_none() {
            self.refresh().await?;
        }

        let key = normalize_domain_name(name);
        self.zones
            .as_ref()
            .and_then(|zones| zones.get(&key))
            .ok_or_else(|| CoreError::ZoneNotFound {
                provider: self.provider.id().to_string(),
                zone: key,
            })
    }

    /// Current records of a zone, normalized.
    pub async fn list_zone_records(&mut self, zone_name: &str) -> CoreResult<Vec<Record>> {
        let zone = self.zone(zone_name).await?.clone();
        self.existing_records(&zone).await
    }

    /// Computes the corrections that bring the zone in line with `config`.
    ///
    /// Nothing is sent to the provider beyond the reads needed for the plan.
    pub async fn plan_corrections(&mut self, config: &ZoneConfig) -> CoreResult<Vec<Correction>> {
        let zone = self.zone(&config.name).await?.clone();
        let existing = self.existing_records(&zone).await?;

        let normalizer = self.provider.normalizer();
        let default_ttl = self.provider.default_ttl();
        let desired = config
            .records
            .iter()
            .map(|d| normalizer.from_desired(d, &zone.name, default_ttl))
            .collect::<Result<Vec<_>, ProviderError>>()
            .map_err(|source| CoreError::Operation {
                zone: zone.name.clone(),
                operation: Operation::NormalizeRecords,
                source,
            })?;

        ensure_unique(&desired, RecordSide::Desired, &zone.name)?;
        ensure_unique(&existing, RecordSide::Existing, &zone.name)?;

        let changes = diff_records(&desired, &existing);
        let corrections = build_corrections(&zone, changes, &normalizer)?;

        log::info!(
            "[{}] {}: {} corrections ({} desired, {} existing)",
            self.provider.id(),
            zone.name,
            corrections.len(),
            desired.len(),
            existing.len()
        );
        Ok(corrections)
    }

    /// Executes planned corrections. The zone index is left as it was.
    pub async fn apply(
        &self,
        corrections: Vec<Correction>,
        policy: ApplyPolicy,
    ) -> Vec<AppliedCorrection> {
        apply_corrections(self.provider.as_ref(), corrections, policy).await
    }

    async fn existing_records(&self, zone: &Zone) -> CoreResult<Vec<Record>> {
        let wire = match self.provider.fetch_records(&zone.id).await {
            Ok(records) => records,
            Err(ProviderError::Unimplemented { .. }) => {
                log::debug!(
                    "[{}] {}: no per-zone listing, using records from the zone index",
                    self.provider.id(),
                    zone.name
                );
                zone.records.clone()
            }
            Err(source) => {
                return Err(CoreError::Operation {
                    zone: zone.name.clone(),
                    operation: Operation::FetchRecords,
                    source,
                });
            }
        };

        let normalizer = self.provider.normalizer();
        wire.iter()
            .map(|w| normalizer.from_provider(w, &zone.name))
            .collect::<Result<Vec<_>, ProviderError>>()
            .map_err(|source| CoreError::Operation {
                zone: zone.name.clone(),
                operation: Operation::NormalizeRecords,
                source,
            })
    }
}
