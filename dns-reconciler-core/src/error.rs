//! Unified error type definition

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::Record;

// Re-export library error type
pub use dns_reconciler_provider::{CredentialValidationError, ProviderError};

/// Which side of a reconciliation a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSide {
    /// Declared in the zone configuration.
    Desired,
    /// Read back from the provider.
    Existing,
}

impl fmt::Display for RecordSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Desired => "desired",
            Self::Existing => "existing",
        })
    }
}

/// Step of a reconciliation a wrapped failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    FetchZones,
    FetchRecords,
    /// Bringing desired or existing records into canonical form.
    NormalizeRecords,
    /// Encoding a planned record into the provider's wire form.
    EncodeRecord,
    CreateRecord,
    DeleteRecord,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FetchZones => "fetching zones",
            Self::FetchRecords => "fetching records",
            Self::NormalizeRecords => "normalizing records",
            Self::EncodeRecord => "encoding record",
            Self::CreateRecord => "creating record",
            Self::DeleteRecord => "deleting record",
        })
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Credentials file could not be loaded or decoded
    #[error("Config error: {0}")]
    Config(String),

    /// Credential validation errors (structured, supports field level errors)
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// The zone is not part of the provider account
    #[error("Zone '{zone}' not found in {provider} account")]
    ZoneNotFound { provider: String, zone: String },

    /// (label, type, value) appears twice on one side of a zone
    #[error("Duplicate {side} record in zone {zone}: {label} {record_type} {value}")]
    DuplicateRecord {
        zone: String,
        side: RecordSide,
        label: String,
        record_type: String,
        value: String,
    },

    /// A provider call or record conversion failed while reconciling a zone
    #[error("Failed {operation} for zone {zone}: {source}")]
    Operation {
        zone: String,
        operation: Operation,
        source: ProviderError,
    },

    /// The create half of a modify succeeded but the delete half did not;
    /// the stale record is still live next to the new one.
    #[error(
        "Partial modify in zone {zone}: created {created} but could not delete stale record {stale_record_id}: {source}"
    )]
    PartialModify {
        zone: String,
        created: Record,
        stale_record_id: String,
        source: ProviderError,
    },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_)
            | Self::CredentialValidation(_)
            | Self::ZoneNotFound { .. }
            | Self::DuplicateRecord { .. } => true,
            Self::Operation { source, .. } => source.is_expected(),
            Self::Provider(e) => e.is_expected(),
            Self::PartialModify { .. } => false,
        }
    }

    /// The underlying provider error, if any.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Operation { source, .. } | Self::PartialModify { source, .. } => Some(source),
            Self::Provider(e) => Some(e),
            _ => None,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_error_keeps_provider_prefix() {
        let err = CoreError::Operation {
            zone: "example.com".to_string(),
            operation: Operation::FetchZones,
            source: ProviderError::BadStatus {
                provider: "packetframe".to_string(),
                status: 500,
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed fetching zones for zone example.com: [packetframe] bad status code: 500 not 200. Failed to decode response"
        );
        assert!(!err.is_expected());
    }

    #[test]
    fn duplicate_record_is_expected() {
        let err = CoreError::DuplicateRecord {
            zone: "example.com".to_string(),
            side: RecordSide::Desired,
            label: "www".to_string(),
            record_type: "A".to_string(),
            value: "192.0.2.1".to_string(),
        };
        assert!(err.is_expected());
        assert_eq!(
            err.to_string(),
            "Duplicate desired record in zone example.com: www A 192.0.2.1"
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let err = CoreError::ZoneNotFound {
            provider: "packetframe".to_string(),
            zone: "example.org".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "ZoneNotFound");
        assert_eq!(json["details"]["zone"], "example.org");
    }
}
