//! Provider credentials configuration
//!
//! Credentials live in a JSON file mapping a profile name to a flat map of
//! string settings:
//!
//! ```json
//! {
//!   // comments and trailing commas are allowed
//!   "packetframe": { "apikey": "$PACKETFRAME_TOKEN", },
//!   "pf-staging": { "TYPE": "packetframe", "apikey": "...", "baseUrl": "http://127.0.0.1:9000/api/" }
//! }
//! ```

mod jsonc;
mod loader;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{ProviderCredentials, ProviderType};

pub use loader::{load_provider_configs, load_provider_configs_with};

/// Profile key naming the provider type when the profile name does not.
pub const TYPE_KEY: &str = "TYPE";

/// Profile name → flat settings map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfigs(HashMap<String, HashMap<String, String>>);

impl ProviderConfigs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, profile: &str) -> Option<&HashMap<String, String>> {
        self.0.get(profile)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, HashMap<String, String>> {
        self.0
    }

    /// Provider type of a profile: its `TYPE` key, or else the profile name.
    pub fn provider_type(&self, profile: &str) -> CoreResult<ProviderType> {
        let settings = self.settings(profile)?;
        let name = settings
            .get(TYPE_KEY)
            .map_or(profile, String::as_str);
        ProviderType::from_name(name).ok_or_else(|| {
            CoreError::Config(format!(
                "profile '{profile}': unknown provider type '{name}'"
            ))
        })
    }

    /// Typed credentials for a profile.
    pub fn credentials(&self, profile: &str) -> CoreResult<ProviderCredentials> {
        let provider_type = self.provider_type(profile)?;
        ProviderCredentials::from_map(provider_type, self.settings(profile)?)
            .map_err(CoreError::CredentialValidation)
    }

    fn settings(&self, profile: &str) -> CoreResult<&HashMap<String, String>> {
        self.0
            .get(profile)
            .ok_or_else(|| CoreError::Config(format!("no credentials profile named '{profile}'")))
    }

    /// Replaces every `$NAME` value with `lookup(NAME)`, empty when unset.
    fn substitute_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for settings in self.0.values_mut() {
            for value in settings.values_mut() {
                if let Some(var) = value.strip_prefix('$') {
                    *value = lookup(var).unwrap_or_default();
                }
            }
        }
    }
}

impl From<HashMap<String, HashMap<String, String>>> for ProviderConfigs {
    fn from(map: HashMap<String, HashMap<String, String>>) -> Self {
        Self(map)
    }
}
