use std::time::Duration;

use serde::Deserialize;

use crate::config::settings::SettingsConfig;
use crate::sas::SigningKey;
use crate::utils::constants::{
    DEFAULT_DOMAIN_SUFFIX, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_TOKEN_EXPIRY_SECS,
};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    pub servicebus: ServiceBusConfig,
}

/// ================================
/// Service Bus target and credentials
/// ================================
///
/// `base_url` follows `http{s}://{namespace}.servicebus.windows.net`,
/// `endpoint` is the queue or topic name and `shared_key_name` the
/// shared access policy that issued `signing_key`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceBusConfig {
    pub base_url: String,
    pub namespace: String,
    pub endpoint: String,
    pub shared_key_name: String,
    pub signing_key: SigningKey,
    /// lifetime of every freshly minted SAS token
    #[serde(default = "default_token_expiry_seconds")]
    pub token_expiry_seconds: u64,
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServiceBusConfig {
    /// `{namespace}.{domain_suffix}/{endpoint}`, the `sr` the token is scoped to.
    pub fn resource_uri(&self) -> String {
        format!("{}.{}/{}", self.namespace, self.domain_suffix, self.endpoint)
    }

    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.base_url.trim_end_matches('/'), self.endpoint)
    }

    pub fn token_expiry(&self) -> Duration {
        Duration::from_secs(self.token_expiry_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_token_expiry_seconds() -> u64 {
    DEFAULT_TOKEN_EXPIRY_SECS
}

fn default_domain_suffix() -> String {
    DEFAULT_DOMAIN_SUFFIX.to_string()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
