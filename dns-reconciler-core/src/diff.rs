//! Set difference between desired and existing records of one zone.
//!
//! Records are compared by exact equality of [`RecordKey`]. A record present
//! on both sides produces nothing; an attribute change (e.g. a new TTL) shows
//! up as one delete plus one create, which the correction builder may pair
//! back into a modify.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, RecordSide};
use crate::types::{Record, RecordType};

/// Comparison identity of a record. `id` and metadata never take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub label: String,
    pub record_type: RecordType,
    pub value: String,
    pub ttl: u32,
}

impl RecordKey {
    pub fn of(record: &Record) -> Self {
        Self {
            label: record.label.clone(),
            record_type: record.record_type,
            value: record.value.clone(),
            ttl: record.ttl,
        }
    }
}

/// Records to create and records to delete, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    /// Desired records missing from the provider.
    pub creates: Vec<Record>,
    /// Existing records not declared.
    pub deletes: Vec<Record>,
}

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.deletes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.creates.len() + self.deletes.len()
    }
}

/// Computes `desired \ existing` and `existing \ desired`.
///
/// Both inputs must already be normalized for the same zone.
pub fn diff_records(desired: &[Record], existing: &[Record]) -> Changeset {
    let desired_keys: HashSet<RecordKey> = desired.iter().map(RecordKey::of).collect();
    let existing_keys: HashSet<RecordKey> = existing.iter().map(RecordKey::of).collect();

    Changeset {
        creates: desired
            .iter()
            .filter(|r| !existing_keys.contains(&RecordKey::of(r)))
            .cloned()
            .collect(),
        deletes: existing
            .iter()
            .filter(|r| !desired_keys.contains(&RecordKey::of(r)))
            .cloned()
            .collect(),
    }
}

/// Rejects a record list in which `(label, type, value)` repeats.
pub fn ensure_unique(records: &[Record], side: RecordSide, zone: &str) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert((r.label.as_str(), r.record_type, r.value.as_str())) {
            return Err(CoreError::DuplicateRecord {
                zone: zone.to_string(),
                side,
                label: r.label.clone(),
                record_type: r.record_type.to_string(),
                value: r.value.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn rec(label: &str, record_type: RecordType, value: &str, ttl: u32) -> Record {
        Record {
            id: None,
            label: label.to_string(),
            record_type,
            value: value.to_string(),
            ttl,
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn identical_sets_produce_nothing() {
        let records = vec![
            rec("www", RecordType::A, "192.0.2.1", 300),
            rec("example.com.", RecordType::Txt, "v=spf1 -all", 300),
        ];
        let changes = diff_records(&records, &records);
        assert!(changes.is_empty());
        assert_eq!(changes.len(), 0);
    }

    #[test]
    fn set_difference_in_input_order() {
        let desired = vec![
            rec("c", RecordType::A, "192.0.2.3", 300),
            rec("a", RecordType::A, "192.0.2.1", 300),
            rec("keep", RecordType::A, "192.0.2.9", 300),
        ];
        let existing = vec![
            rec("z", RecordType::A, "192.0.2.26", 300),
            rec("keep", RecordType::A, "192.0.2.9", 300),
            rec("y", RecordType::A, "192.0.2.25", 300),
        ];
        let changes = diff_records(&desired, &existing);
        let creates: Vec<_> = changes.creates.iter().map(|r| r.label.as_str()).collect();
        let deletes: Vec<_> = changes.deletes.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(creates, ["c", "a"]);
        assert_eq!(deletes, ["z", "y"]);
    }

    #[test]
    fn ttl_change_is_delete_plus_create() {
        let desired = vec![rec("www", RecordType::A, "192.0.2.1", 600)];
        let existing = vec![rec("www", RecordType::A, "192.0.2.1", 300)];
        let changes = diff_records(&desired, &existing);
        assert_eq!(changes.creates[0].ttl, 600);
        assert_eq!(changes.deletes[0].ttl, 300);
    }

    #[test]
    fn id_and_metadata_do_not_affect_identity() {
        let desired = vec![rec("www", RecordType::A, "192.0.2.1", 300)];
        let mut existing = rec("www", RecordType::A, "192.0.2.1", 300);
        existing.id = Some("r1".to_string());
        existing
            .metadata
            .insert("proxied".to_string(), "true".to_string());
        assert!(diff_records(&desired, &[existing]).is_empty());
    }

    #[test]
    fn empty_desired_deletes_everything() {
        let existing = vec![
            rec("a", RecordType::A, "192.0.2.1", 300),
            rec("b", RecordType::Aaaa, "2001:db8::1", 300),
        ];
        let changes = diff_records(&[], &existing);
        assert!(changes.creates.is_empty());
        assert_eq!(changes.deletes, existing);
    }

    #[test]
    fn duplicate_triple_is_rejected() {
        let records = vec![
            rec("www", RecordType::A, "192.0.2.1", 300),
            rec("www", RecordType::A, "192.0.2.1", 600),
        ];
        let err = ensure_unique(&records, RecordSide::Existing, "example.com").unwrap_err();
        assert!(matches!(
            err,
            CoreError::DuplicateRecord { side: RecordSide::Existing, ref label, .. } if label == "www"
        ));
    }

    #[test]
    fn same_label_different_values_are_unique() {
        let records = vec![
            rec("www", RecordType::A, "192.0.2.1", 300),
            rec("www", RecordType::A, "192.0.2.2", 300),
            rec("www", RecordType::Aaaa, "2001:db8::1", 300),
        ];
        assert!(ensure_unique(&records, RecordSide::Desired, "example.com").is_ok());
    }
}
