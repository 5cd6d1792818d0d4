use std::fmt;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum SigningError {
    /// The MAC primitive rejected the signing key. Not recoverable per call.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
    #[error("token expiry window of {0} seconds is out of range")]
    ExpiryOutOfRange(u64),
}

/// Keyed signature over a canonical string.
pub trait Signer: Send + Sync {
    fn sign(&self, message: &str, key: &[u8]) -> Result<Vec<u8>, SigningError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Signer;

impl Signer for HmacSha256Signer {
    fn sign(&self, message: &str, key: &[u8]) -> Result<Vec<u8>, SigningError> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|err| SigningError::InvalidKey(err.to_string()))?;
        mac.update(message.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Shared access key. Never printed, not even in `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(***)")
    }
}
