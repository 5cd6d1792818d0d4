//! # Service Bus Publisher Library
//!
//! Publishes messages to Azure Service Bus queues and topics over HTTP,
//! authenticating every request with a Shared Access Signature that is
//! minted once and reused until it expires.
//!
//! Modules:
//! - `sas` — HMAC-SHA256 signer, SAS token and the caching generator
//! - `publisher` — publish orchestration and its error type
//! - `transport` — outbound HTTP collaborator (reqwest by default)
//! - `config` — YAML configuration, env expansion and validation

pub mod config;
pub mod sas;
pub mod publisher;
pub mod transport;
pub mod tests;
pub mod observability;
pub mod helpers;
pub mod utils;


pub use crate::config::servicebus::{ServiceBusConfig, ServiceConfig};
pub use crate::publisher::{PublishError, Publisher};
pub use crate::sas::{SasTokenGenerator, SigningKey, SigningRequest};
