//! Record model, re-exported from the provider library.

pub use dns_reconciler_provider::{
    DesiredRecord, ProviderCredentials, ProviderRecord, ProviderType, Record, RecordNormalizer,
    RecordType, Zone, ZoneConfig,
};
