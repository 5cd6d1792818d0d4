// tests/common/mod.rs
pub use axum::Router;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use http::StatusCode;
use tokio::task::JoinHandle;

use crate::config::servicebus::ServiceBusConfig;
use crate::helpers::time::Clock;
use crate::sas::{HmacSha256Signer, Signer, SigningError, SigningKey};
use crate::transport::{HttpTransport, OutboundRequest, TransportError, TransportResponse};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn at_unix(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid unix timestamp")
}

/// Clock that only moves when a test moves it.
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + TimeDelta::seconds(secs);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Real HMAC signer that counts how often it was asked to sign.
#[derive(Default)]
pub struct CountingSigner {
    calls: AtomicUsize,
}

impl CountingSigner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Signer for CountingSigner {
    fn sign(&self, message: &str, key: &[u8]) -> Result<Vec<u8>, SigningError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        HmacSha256Signer.sign(message, key)
    }
}

pub struct FailingSigner;

impl Signer for FailingSigner {
    fn sign(&self, _message: &str, _key: &[u8]) -> Result<Vec<u8>, SigningError> {
        Err(SigningError::InvalidKey("mac primitive unavailable".to_owned()))
    }
}

pub enum FakeOutcome {
    Status(StatusCode),
    Fail(String),
}

/// Transport that records every request and answers with a fixed outcome.
pub struct FakeTransport {
    outcome: FakeOutcome,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl FakeTransport {
    pub fn responding(status: StatusCode) -> Self {
        Self { outcome: FakeOutcome::Status(status), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing(reason: &str) -> Self {
        Self { outcome: FakeOutcome::Fail(reason.to_owned()), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for FakeTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match &self.outcome {
            FakeOutcome::Status(status) => Ok(TransportResponse { status: *status, body: String::new() }),
            FakeOutcome::Fail(reason) => Err(TransportError::Unavailable(reason.clone())),
        }
    }
}

pub fn servicebus_config(base_url: &str) -> ServiceBusConfig {
    ServiceBusConfig {
        base_url: base_url.to_owned(),
        namespace: "my-namespace".to_owned(),
        endpoint: "my-queue".to_owned(),
        shared_key_name: "my-policy".to_owned(),
        signing_key: SigningKey::new("my-signing-key"),
        token_expiry_seconds: 3600,
        domain_suffix: "servicebus.windows.net".to_owned(),
        request_timeout_ms: 2000,
    }
}
