use serde::{Deserialize, Serialize};

/// One `{field, reason}` pair decoded from a provider's structured error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorReason {
    /// Request field the provider complained about. May be empty.
    #[serde(default)]
    pub field: String,
    /// Human-readable reason.
    #[serde(default)]
    pub reason: String,
}

/// Failure of a single provider call.
///
/// Every variant names the provider it came from (`provider`). Errors are
/// handed back as the transport or the API reported them; nothing here is
/// retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Request never got an HTTP answer (refused connection, DNS failure, TLS).
    NetworkError {
        provider: String,
        detail: String,
    },

    /// The HTTP request hit the transport's timeout.
    Timeout {
        provider: String,
        detail: String,
    },

    /// The credentials are missing, invalid or were rejected by the API.
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The API answered with a non-success status and a decodable error body.
    ///
    /// Displayed as a multi-line message, one `- field: reason` line per pair.
    ApiError {
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Decoded `{field, reason}` pairs.
        reasons: Vec<ApiErrorReason>,
    },

    /// The API answered with a non-success status and the error body could not be decoded.
    BadStatus {
        provider: String,
        /// HTTP status code.
        status: u16,
    },

    /// No record with this id in the zone.
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g. a record without provider id passed to a delete).
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// The record type has no wire encoding for this provider.
    UnsupportedRecordType {
        provider: String,
        record_type: String,
    },

    /// Zone unknown to the account.
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// The provider integration does not support this operation.
    Unimplemented {
        provider: String,
        /// Operation name (e.g. `"fetch_records"`).
        operation: String,
    },

    /// A success response whose body did not decode.
    ParseError {
        provider: String,
        detail: String,
    },

    /// A request body could not be encoded.
    SerializationError {
        provider: String,
        detail: String,
    },

    /// The API reported failure in a shape not covered above.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::ApiError { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::UnsupportedRecordType { .. }
                | Self::DomainNotFound { .. }
                | Self::Unimplemented { .. }
        )
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::BadStatus { provider, .. }
            | Self::RecordNotFound { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::UnsupportedRecordType { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::Unimplemented { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::ApiError {
                provider,
                status,
                reasons,
            } => {
                write!(f, "[{provider}] bad status code: {status} not 200")?;
                for r in reasons {
                    if r.field.is_empty() {
                        write!(f, "\n- {}", r.reason)?;
                    } else {
                        write!(f, "\n- {}: {}", r.field, r.reason)?;
                    }
                }
                Ok(())
            }
            Self::BadStatus { provider, status } => {
                write!(
                    f,
                    "[{provider}] bad status code: {status} not 200. Failed to decode response"
                )
            }
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_id}' not found")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::UnsupportedRecordType {
                provider,
                record_type,
            } => {
                write!(f, "[{provider}] Unsupported record type: {record_type}")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::Unimplemented {
                provider,
                operation,
            } => {
                write!(f, "[{provider}] Operation not implemented: {operation}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

pub type Result<T> = std::result::Result<T, ProviderError>;
