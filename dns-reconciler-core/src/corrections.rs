//! Planned changes to a zone and their execution.
//!
//! A [`Correction`] is an immutable command value: the zone it targets, what
//! to do, and a human-readable description embedding the record's wire JSON.
//! Building corrections never touches the provider; [`execute`] performs the
//! provider calls of exactly one correction.
//!
//! A modify is not atomic. It is issued as create-then-delete so the label
//! never has zero records; if the delete fails the old record stays live next
//! to the new one and [`CoreError::PartialModify`] reports it.

use serde::Serialize;

use dns_reconciler_provider::{ProviderError, ZoneProvider};

use crate::diff::Changeset;
use crate::error::{CoreError, CoreResult, Operation};
use crate::types::{ProviderRecord, Record, RecordNormalizer, Zone};

/// What a correction does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CorrectionKind {
    Create { record: Record },
    Delete { record: Record },
    /// Create `new`, then delete `old`.
    Modify { old: Record, new: Record },
}

/// One planned, independently executable change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub zone_id: String,
    pub zone_name: String,
    pub kind: CorrectionKind,
    /// e.g. `CREATE A www: {"label":"www","ttl":300,"type":"A","value":"192.0.2.1","proxied":false}`
    pub description: String,
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// Behaviour of [`apply_corrections`] after a failed correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplyPolicy {
    /// Stop at the first failure. Later corrections are not attempted.
    #[default]
    StopOnError,
    /// Attempt every correction and report each outcome.
    ContinueOnError,
}

/// A correction after execution, with the error it produced, if any.
#[derive(Debug)]
pub struct AppliedCorrection {
    pub correction: Correction,
    pub error: Option<CoreError>,
}

impl AppliedCorrection {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Turns a changeset into corrections for `zone`.
///
/// Every record that will be sent to the provider is encoded up front, so a
/// type the provider cannot transmit fails here rather than mid-apply.
/// Creates and deletes sharing `(label, type)` are paired in input order into
/// modifies; a stale record without provider id is never paired, so the
/// create still goes out and only its delete fails. Modifies and creates
/// follow desired order; unpaired deletes come last in existing order.
pub fn build_corrections(
    zone: &Zone,
    changeset: Changeset,
    normalizer: &RecordNormalizer,
) -> CoreResult<Vec<Correction>> {
    let mut corrections = Vec::with_capacity(changeset.len());
    let mut deletes: Vec<Option<Record>> = changeset.deletes.into_iter().map(Some).collect();

    for new in changeset.creates {
        let wire = normalizer
            .to_provider(&new)
            .map_err(|source| encode_error(zone, source))?;
        let paired = deletes
            .iter_mut()
            .find(|slot| {
                slot.as_ref().is_some_and(|old| {
                    has_provider_id(old)
                        && old.label == new.label
                        && old.record_type == new.record_type
                })
            })
            .and_then(Option::take);

        let (kind, description) = match paired {
            Some(old) => {
                let old_json = wire_json(zone, &RecordNormalizer::wire_form(&old), normalizer)?;
                let description = format!(
                    "MODIFY {} {}: {old_json} -> {}",
                    new.record_type,
                    new.label,
                    wire_json(zone, &wire, normalizer)?
                );
                (CorrectionKind::Modify { old, new }, description)
            }
            None => {
                let description = format!(
                    "CREATE {} {}: {}",
                    new.record_type,
                    new.label,
                    wire_json(zone, &wire, normalizer)?
                );
                (CorrectionKind::Create { record: new }, description)
            }
        };
        corrections.push(correction(zone, kind, description));
    }

    for old in deletes.into_iter().flatten() {
        let description = format!(
            "DELETE {} {}: {}",
            old.record_type,
            old.label,
            wire_json(zone, &RecordNormalizer::wire_form(&old), normalizer)?
        );
        corrections.push(correction(
            zone,
            CorrectionKind::Delete { record: old },
            description,
        ));
    }

    Ok(corrections)
}

fn correction(zone: &Zone, kind: CorrectionKind, description: String) -> Correction {
    Correction {
        zone_id: zone.id.clone(),
        zone_name: zone.name.clone(),
        kind,
        description,
    }
}

fn encode_error(zone: &Zone, source: ProviderError) -> CoreError {
    CoreError::Operation {
        zone: zone.name.clone(),
        operation: Operation::EncodeRecord,
        source,
    }
}

fn wire_json(
    zone: &Zone,
    wire: &ProviderRecord,
    normalizer: &RecordNormalizer,
) -> CoreResult<String> {
    serde_json::to_string(wire).map_err(|e| {
        encode_error(
            zone,
            ProviderError::SerializationError {
                provider: normalizer.provider().to_string(),
                detail: e.to_string(),
            },
        )
    })
}

fn has_provider_id(record: &Record) -> bool {
    record.id.as_deref().is_some_and(|id| !id.is_empty())
}

/// Performs the provider calls of one correction.
///
/// Returns the record as stored by the provider for creates and modifies.
pub async fn execute(
    provider: &dyn ZoneProvider,
    correction: &Correction,
) -> CoreResult<Option<ProviderRecord>> {
    log::info!("[{}] {}", correction.zone_name, correction.description);

    match &correction.kind {
        CorrectionKind::Create { record } => {
            let created = create(provider, correction, record).await?;
            Ok(Some(created))
        }
        CorrectionKind::Delete { record } => {
            let record_id = provider_id(provider, correction, record)?;
            delete(provider, correction, record_id).await?;
            Ok(None)
        }
        CorrectionKind::Modify { old, new } => {
            let stale_record_id = provider_id(provider, correction, old)?;
            let created = create(provider, correction, new).await?;

            if let Err(source) = provider
                .delete_record(&correction.zone_id, stale_record_id)
                .await
            {
                let mut created_record = new.clone();
                created_record.id.clone_from(&created.id);
                return Err(CoreError::PartialModify {
                    zone: correction.zone_name.clone(),
                    created: created_record,
                    stale_record_id: stale_record_id.to_string(),
                    source,
                });
            }
            Ok(Some(created))
        }
    }
}

async fn create(
    provider: &dyn ZoneProvider,
    correction: &Correction,
    record: &Record,
) -> CoreResult<ProviderRecord> {
    provider
        .create_record(&correction.zone_id, record)
        .await
        .map_err(|source| CoreError::Operation {
            zone: correction.zone_name.clone(),
            operation: Operation::CreateRecord,
            source,
        })
}

async fn delete(
    provider: &dyn ZoneProvider,
    correction: &Correction,
    record_id: &str,
) -> CoreResult<()> {
    provider
        .delete_record(&correction.zone_id, record_id)
        .await
        .map_err(|source| CoreError::Operation {
            zone: correction.zone_name.clone(),
            operation: Operation::DeleteRecord,
            source,
        })
}

fn provider_id<'a>(
    provider: &dyn ZoneProvider,
    correction: &Correction,
    record: &'a Record,
) -> CoreResult<&'a str> {
    record
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::Operation {
            zone: correction.zone_name.clone(),
            operation: Operation::DeleteRecord,
            source: ProviderError::InvalidParameter {
                provider: provider.id().to_string(),
                param: "record_id".to_string(),
                detail: format!("record {record} has no provider id"),
            },
        })
}

/// Executes corrections one after another.
///
/// Nothing is rolled back: corrections that succeeded before a failure stay
/// applied.
pub async fn apply_corrections(
    provider: &dyn ZoneProvider,
    corrections: Vec<Correction>,
    policy: ApplyPolicy,
) -> Vec<AppliedCorrection> {
    let mut applied = Vec::with_capacity(corrections.len());

    for correction in corrections {
        let error = execute(provider, &correction).await.err();
        let failed = error.is_some();

        if let Some(e) = &error {
            if e.is_expected() {
                log::warn!("[{}] {e}", correction.zone_name);
            } else {
                log::error!("[{}] {e}", correction.zone_name);
            }
        }

        applied.push(AppliedCorrection { correction, error });
        if failed && policy == ApplyPolicy::StopOnError {
            break;
        }
    }

    applied
}
