//! Outbound HTTP collaborator used by the publisher.

pub mod reqwest_transport;

use http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

pub use reqwest_transport::ReqwestTransport;

/// A fully built request: the transport only has to put it on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// The request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl std::future::Future<Output = Result<TransportResponse, TransportError>> + Send;
}
