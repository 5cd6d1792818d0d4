use http::StatusCode;
use thiserror::Error;

use crate::sas::SigningError;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Passed through exactly as the transport reported it.
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Failed to send message to service bus due to statusCode {}", .status.as_u16())]
    Rejected { status: StatusCode, body: String },
}

impl PublishError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::Signing(_) => "signing_error",
            PublishError::Serialize(_) => "serialize_error",
            PublishError::Transport(_) => "transport_error",
            PublishError::Rejected { .. } => "rejected",
        }
    }
}
