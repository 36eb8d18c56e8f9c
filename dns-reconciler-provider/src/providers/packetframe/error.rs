//! Packetframe error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{PROVIDER_NAME, PacketframeProvider};

/// Packetframe reports failures through the HTTP status plus an optional
/// `{"errors":[{"field","reason"}]}` body.
impl ProviderErrorMapper for PacketframeProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.status {
            401 | 403 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: non_empty(&raw.body),
            },
            404 if context.record_id.is_some() => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: context.record_id.unwrap_or_default(),
                raw_message: non_empty(&raw.body),
            },
            404 if context.domain.is_some() => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_default(),
                raw_message: non_empty(&raw.body),
            },
            _ => self.status_error(&raw),
        }
    }
}

fn non_empty(body: &str) -> Option<String> {
    let body = body.trim();
    (!body.is_empty()).then(|| truncate_for_log(body))
}
