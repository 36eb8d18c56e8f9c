use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Packetframe DNS.
    Packetframe,
}

impl ProviderType {
    /// All provider types known to this crate.
    pub const ALL: [Self; 1] = [Self::Packetframe];

    /// Looks up a provider type by its name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Lower-case identifier, as used in credential files and log prefixes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Packetframe => "packetframe",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ DNS Record Types ============

/// DNS record type.
///
/// A closed set: adding a type means adding a variant here, which the
/// compiler then forces into [`RecordType::target_encoding`] and every
/// provider's supported-type table.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Pointer (reverse lookup) record.
    Ptr,
}

/// How a record type's target value is carried and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetEncoding {
    /// The value is opaque data, carried and compared as-is.
    Verbatim,
    /// The value is a domain name; it is made origin-absolute (trailing dot)
    /// and compared case-insensitively.
    Hostname,
}

impl RecordType {
    /// Every record type, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Srv,
        Self::Caa,
        Self::Ptr,
    ];

    /// Uppercase wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
        }
    }

    /// Parses a type name, ignoring ASCII case. Returns `None` for unknown types.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Encoding rule for the target value of this type.
    pub fn target_encoding(self) -> TargetEncoding {
        match self {
            Self::A | Self::Aaaa | Self::Txt | Self::Caa | Self::Ptr => TargetEncoding::Verbatim,
            Self::Cname | Self::Mx | Self::Ns | Self::Srv => TargetEncoding::Hostname,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Zone / Record Types ============

/// A zone as known to a provider, with the records it returned alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-specific zone identifier.
    pub id: String,
    /// Zone name without trailing dot (e.g. `"example.com"`).
    pub name: String,
    /// Records embedded in the zone listing, if the provider returns them there.
    #[serde(default)]
    pub records: Vec<ProviderRecord>,
}

/// A record in the provider's wire shape.
///
/// Field order matches the JSON sent to the provider, which is also what
/// correction descriptions embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Provider-assigned identifier; absent on records not yet created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record label, in whatever relative/absolute form the provider uses.
    pub label: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Record type name as sent on the wire.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Target value.
    pub value: String,
    /// Provider-side proxy flag.
    #[serde(default)]
    pub proxied: bool,
}

/// A record in canonical form: normalized label, typed record type,
/// normalized target value.
///
/// The comparison identity is `(label, record_type, value, ttl)`; `id` and
/// `metadata` never take part in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier, known only for records read back from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Normalized label. The apex is the zone FQDN with trailing dot.
    pub label: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Normalized target value.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Type- or provider-specific extras (e.g. `proxied = "true"`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} (ttl={})",
            self.label, self.record_type, self.value, self.ttl
        )
    }
}

/// An operator-declared record, as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredRecord {
    /// Zone-relative label, or `@` for the apex.
    pub label: String,
    /// Record type name.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Target value.
    #[serde(alias = "target")]
    pub value: String,
    /// TTL in seconds; the provider default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Type-specific metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl DesiredRecord {
    /// Shorthand for a record with an explicit TTL and no metadata.
    pub fn new(
        label: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            label: label.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl: Some(ttl),
            metadata: BTreeMap::new(),
        }
    }
}

/// The desired state of one zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Zone name (e.g. `"example.com"`).
    pub name: String,
    /// Desired records.
    #[serde(default)]
    pub records: Vec<DesiredRecord>,
}

// ============ Provider Metadata Types ============

/// The input type of a credential field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Secret input, masked in logs.
    Password,
}

/// Definition of a single credential field accepted by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Key in the flat credential map (e.g., `"apikey"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Provider-specific feature support flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeatures {
    /// Whether records carry a provider-side proxy flag.
    pub proxy: bool,
    /// Whether the provider exposes a per-zone record listing endpoint.
    pub per_zone_listing: bool,
}

/// Static metadata describing a DNS provider.
///
/// Obtain via [`ZoneProvider::metadata()`](crate::ZoneProvider::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Credential fields understood by this provider.
    pub credential_fields: Vec<ProviderCredentialField>,
    /// Record types this provider can transmit.
    pub supported_record_types: Vec<RecordType>,
    /// Feature flags for this provider.
    pub features: ProviderFeatures,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        provider: ProviderType,
        field: String,
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        provider: ProviderType,
        field: String,
        label: String,
    },
    /// A credential field has an invalid format.
    InvalidFormat {
        provider: ProviderType,
        field: String,
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField {
                provider, label, ..
            } => write!(f, "[{provider}] Missing required field: {label}"),
            Self::EmptyField {
                provider, label, ..
            } => write!(f, "[{provider}] Field must not be empty: {label}"),
            Self::InvalidFormat {
                provider,
                label,
                reason,
                ..
            } => write!(f, "[{provider}] {label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported DNS providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Packetframe credentials.
    #[serde(rename = "packetframe")]
    Packetframe {
        /// Packetframe API key, sent as the `apikey` session cookie.
        api_key: String,
        /// Alternative API base URL (defaults to the public endpoint).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a flat string map, validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        provider: ProviderType,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            ProviderType::Packetframe => Ok(Self::Packetframe {
                api_key: Self::get_required_field(provider, map, "apikey", "API Key")?,
                base_url: Self::get_optional_field(map, "baseUrl"),
            }),
        }
    }

    /// Obtain a required field from the map and verify that it is not empty
    fn get_required_field(
        provider: ProviderType,
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider,
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    fn get_optional_field(map: &HashMap<String, String>, key: &str) -> Option<String> {
        map.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Convert credentials to a flat string map.
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            Self::Packetframe { api_key, base_url } => {
                let mut map: HashMap<String, String> =
                    [("apikey".to_string(), api_key.clone())].into();
                if let Some(url) = base_url {
                    map.insert("baseUrl".to_string(), url.clone());
                }
                map
            }
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Packetframe { .. } => ProviderType::Packetframe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_packetframe_roundtrip() {
        let map: HashMap<String, String> = [
            ("apikey".to_string(), "secret".to_string()),
            ("baseUrl".to_string(), "http://127.0.0.1:9000/api/".to_string()),
        ]
        .into();
        let creds = ProviderCredentials::from_map(ProviderType::Packetframe, &map).unwrap();
        assert_eq!(creds.provider_type(), ProviderType::Packetframe);
        assert_eq!(creds.to_map(), map);
    }

    #[test]
    fn credentials_missing_field() {
        let map = HashMap::new();
        let err = ProviderCredentials::from_map(ProviderType::Packetframe, &map).unwrap_err();
        assert!(matches!(
            err,
            CredentialValidationError::MissingField { ref field, .. } if field == "apikey"
        ));
        assert_eq!(err.to_string(), "[packetframe] Missing required field: API Key");
    }

    #[test]
    fn credentials_empty_field() {
        let map: HashMap<String, String> = [("apikey".to_string(), "  ".to_string())].into();
        let err = ProviderCredentials::from_map(ProviderType::Packetframe, &map).unwrap_err();
        assert!(matches!(err, CredentialValidationError::EmptyField { .. }));
    }

    #[test]
    fn credentials_blank_base_url_is_ignored() {
        let map: HashMap<String, String> = [
            ("apikey".to_string(), "k".to_string()),
            ("baseUrl".to_string(), String::new()),
        ]
        .into();
        let creds = ProviderCredentials::from_map(ProviderType::Packetframe, &map).unwrap();
        assert!(matches!(
            creds,
            ProviderCredentials::Packetframe { base_url: None, .. }
        ));
    }

    #[test]
    fn provider_type_from_name_ignores_case() {
        assert_eq!(
            ProviderType::from_name("PACKETFRAME"),
            Some(ProviderType::Packetframe)
        );
        assert_eq!(ProviderType::from_name("bind"), None);
    }

    #[test]
    fn record_type_parse_and_display() {
        for t in RecordType::ALL {
            assert_eq!(RecordType::parse(t.as_str()), Some(t));
            assert_eq!(RecordType::parse(&t.as_str().to_lowercase()), Some(t));
        }
        assert_eq!(RecordType::parse("LOC"), None);
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
    }

    #[test]
    fn record_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RecordType::Aaaa).unwrap(), "\"AAAA\"");
        let t: RecordType = serde_json::from_str("\"CNAME\"").unwrap();
        assert_eq!(t, RecordType::Cname);
    }

    #[test]
    fn target_encoding_table() {
        assert_eq!(RecordType::A.target_encoding(), TargetEncoding::Verbatim);
        assert_eq!(RecordType::Txt.target_encoding(), TargetEncoding::Verbatim);
        assert_eq!(RecordType::Ptr.target_encoding(), TargetEncoding::Verbatim);
        assert_eq!(RecordType::Cname.target_encoding(), TargetEncoding::Hostname);
        assert_eq!(RecordType::Mx.target_encoding(), TargetEncoding::Hostname);
        assert_eq!(RecordType::Ns.target_encoding(), TargetEncoding::Hostname);
        assert_eq!(RecordType::Srv.target_encoding(), TargetEncoding::Hostname);
    }

    #[test]
    fn provider_record_json_shape() {
        let rec = ProviderRecord {
            id: None,
            label: "www".to_string(),
            ttl: 300,
            record_type: "A".to_string(),
            value: "1.2.3.4".to_string(),
            proxied: false,
        };
        assert_eq!(
            serde_json::to_string(&rec).unwrap(),
            r#"{"label":"www","ttl":300,"type":"A","value":"1.2.3.4","proxied":false}"#
        );
    }

    #[test]
    fn desired_record_accepts_target_alias_and_missing_ttl() {
        let rec: DesiredRecord =
            serde_json::from_str(r#"{"label":"@","type":"MX","target":"mail"}"#).unwrap();
        assert_eq!(rec.value, "mail");
        assert_eq!(rec.ttl, None);
        assert!(rec.metadata.is_empty());
    }
}
