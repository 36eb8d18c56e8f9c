//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::PacketframeProvider;
use crate::traits::ZoneProvider;
use crate::types::{ProviderCredentials, ProviderMetadata};

/// Creates a [`ZoneProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// No network I/O happens here; bad credentials surface on the first call.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_reconciler_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Packetframe {
///     api_key: "your-key".to_string(),
///     base_url: None,
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn ZoneProvider>> {
    match credentials {
        ProviderCredentials::Packetframe { api_key, base_url } => {
            let mut builder = PacketframeProvider::builder(api_key);
            if let Some(url) = base_url {
                builder = builder.base_url(url);
            }
            Ok(Arc::new(builder.build()?))
        }
    }
}

/// Returns metadata for every supported provider.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![PacketframeProvider::metadata()]
}
