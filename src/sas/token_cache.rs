use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::helpers::time::Clock;
use crate::observability::metrics::get_metrics;
use crate::sas::signer::{HmacSha256Signer, Signer, SigningError, SigningKey};
use crate::sas::token::{SasToken, SAS_TOKEN_PREFIX};

/// Inputs for minting one token. Built per call, never stored.
#[derive(Debug, Clone)]
pub struct SigningRequest<'a> {
    pub resource_uri: &'a str,
    pub signing_key: &'a SigningKey,
    pub expiry_window: Duration,
    pub policy_name: &'a str,
}

/// Holds the most recently minted token and hands it out until it expires.
///
/// The check-then-regenerate sequence runs under one mutex, so a single
/// generator can be shared by concurrent publishers.
pub struct SasTokenGenerator {
    current: Mutex<Option<SasToken>>,
    clock: Arc<dyn Clock>,
    signer: Arc<dyn Signer>,
}

impl SasTokenGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_signer(clock, Arc::new(HmacSha256Signer))
    }

    pub fn with_signer(clock: Arc<dyn Clock>, signer: Arc<dyn Signer>) -> Self {
        Self {
            current: Mutex::new(None),
            clock,
            signer,
        }
    }

    /// Return the cached token while it is still valid, otherwise mint and cache a new one.
    pub async fn generate(&self, request: &SigningRequest<'_>) -> Result<String, SigningError> {
        let mut current = self.current.lock().await;
        let now = self.clock.now();

        if let Some(token) = current.as_ref().filter(|token| token.is_valid_at(now)) {
            debug!("reusing sas token, expires at {}", token.expires_at);
            return Ok(token.value.clone());
        }

        let token = self.mint(request, now)?;
        debug!(
            "generated sas token for '{}' with policy '{}', expires at {}",
            request.resource_uri, request.policy_name, token.expires_at
        );

        let metrics = get_metrics().await;
        metrics.sas_token_generations.inc();
        metrics.sas_token_expiry_unix.set(token.expires_at_unix());

        let value = token.value.clone();
        *current = Some(token);
        Ok(value)
    }

    /// Snapshot of the cached token, if any.
    pub async fn current(&self) -> Option<SasToken> {
        self.current.lock().await.clone()
    }

    #[cfg(test)]
    pub(crate) async fn replace_current(&self, token: SasToken) {
        *self.current.lock().await = Some(token);
    }

    fn mint(&self, request: &SigningRequest<'_>, now: DateTime<Utc>) -> Result<SasToken, SigningError> {
        let window_secs = request.expiry_window.as_secs();
        let expires_at = TimeDelta::from_std(request.expiry_window)
            .ok()
            .and_then(|window| now.checked_add_signed(window))
            .ok_or(SigningError::ExpiryOutOfRange(window_secs))?;

        let uri = query_escape(request.resource_uri);
        let expiry = expires_at.timestamp().to_string();
        let string_to_sign = format!("{}\n{}", uri, expiry);

        let digest = self
            .signer
            .sign(&string_to_sign, request.signing_key.expose().as_bytes())?;
        let signature = query_escape(&BASE64_STANDARD.encode(digest));

        let value = format!(
            "{} sr={}&sig={}&se={}&skn={}",
            SAS_TOKEN_PREFIX, uri, signature, expiry, request.policy_name
        );
        Ok(SasToken::new(value, expires_at))
    }
}

/// Query-string escaping: unreserved characters pass, space becomes `+`, the rest is `%XX`.
pub fn query_escape(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}
