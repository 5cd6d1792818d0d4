use chrono::{DateTime, Utc};

pub const SAS_TOKEN_PREFIX: &str = "SharedAccessSignature";

/// A minted SAS token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SasToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl SasToken {
    pub fn new(value: String, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    /// Usable only while expiry is strictly after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn expires_at_unix(&self) -> i64 {
        self.expires_at.timestamp()
    }
}
