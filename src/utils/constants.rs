//! Shared constants and invariants

pub const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 3600;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_DOMAIN_SUFFIX: &str = "servicebus.windows.net";
pub const DEFAULT_CONFIG_PATH: &str = "servicebus-publisher.yaml";
