//! # dns-reconciler-provider
//!
//! Provider-side half of the DNS zone reconciler: the [`ZoneProvider`]
//! abstraction, the canonical record model and the record normalizer, plus
//! the concrete provider integrations.
//!
//! ## Supported Providers
//!
//! | Provider | Auth Method | Per-zone listing |
//! |----------|-------------|------------------|
//! | [Packetframe](https://packetframe.com/) | `apikey` session cookie | no (records come with the zone list) |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_reconciler_provider::{create_provider, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Packetframe {
//!         api_key: "your-key".to_string(),
//!         base_url: None,
//!     })?;
//!
//!     let zones = provider.fetch_zones().await?;
//!     let normalizer = provider.normalizer();
//!     for (name, zone) in &zones {
//!         for wire in &zone.records {
//!             let record = normalizer.from_provider(wire, name)?;
//!             println!("{record}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Every request is sent exactly once; nothing is retried:
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::ApiError`]: non-success status with decoded `field: reason` pairs
//! - [`ProviderError::BadStatus`]: non-success status with an undecodable body
//! - [`ProviderError::NetworkError`]: transport failure
//! - [`ProviderError::Unimplemented`]: the provider lacks this capability

mod error;
mod factory;
mod http_client;
mod normalize;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiErrorReason, ProviderError, Result};

// Re-export factory functions
pub use factory::{create_provider, get_all_provider_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::ZoneProvider;

pub use normalize::{PROXIED_KEY, RecordNormalizer};

// Re-export types
pub use types::{
    CredentialValidationError, DesiredRecord, FieldType, ProviderCredentialField,
    ProviderCredentials, ProviderFeatures, ProviderMetadata, ProviderRecord, ProviderType, Record,
    RecordType, TargetEncoding, Zone, ZoneConfig,
};

pub use providers::common::{normalize_domain_name, zone_fqdn};
pub use providers::{PacketframeProvider, PacketframeProviderBuilder};
