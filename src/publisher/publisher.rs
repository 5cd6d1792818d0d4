use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde::Serialize;
use tracing::{error, info};

use crate::config::servicebus::ServiceBusConfig;
use crate::helpers::time::{get_instant, SystemClock};
use crate::observability::metrics::get_metrics;
use crate::publisher::error::PublishError;
use crate::sas::{SasTokenGenerator, SigningRequest};
use crate::transport::{HttpTransport, OutboundRequest, ReqwestTransport, TransportError};

static SUCCESS_MSG: &'static str = "created";
static APPLICATION_JSON: &'static str = "application/json";

/// Sends messages to one Service Bus queue or topic, signing each request
/// with a SAS token that is reused until it expires.
pub struct Publisher<T: HttpTransport = ReqwestTransport> {
    transport: T,
    generator: SasTokenGenerator,
    config: ServiceBusConfig,
}

impl Publisher<ReqwestTransport> {
    /// Reqwest transport honouring `request_timeout_ms`.
    pub fn from_config(config: ServiceBusConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::with_timeout(config.request_timeout())?;
        Ok(Self::new(transport, config))
    }
}

impl<T: HttpTransport> Publisher<T> {
    pub fn new(transport: T, config: ServiceBusConfig) -> Self {
        Self::with_generator(transport, SasTokenGenerator::new(Arc::new(SystemClock)), config)
    }

    pub fn with_generator(transport: T, generator: SasTokenGenerator, config: ServiceBusConfig) -> Self {
        Self { transport, generator, config }
    }

    pub fn config(&self) -> &ServiceBusConfig {
        &self.config
    }

    pub fn generator(&self) -> &SasTokenGenerator {
        &self.generator
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Publish `message` as a JSON body.
    pub async fn publish<M>(&self, message: &M) -> Result<(), PublishError>
    where
        M: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_vec(message)?;
        self.publish_payload(body, Some(HeaderValue::from_static(APPLICATION_JSON))).await
    }

    /// Publish an already serialized payload as is.
    pub async fn publish_bytes(&self, payload: Vec<u8>) -> Result<(), PublishError> {
        self.publish_payload(payload, None).await
    }

    async fn publish_payload(&self, body: Vec<u8>, content_type: Option<HeaderValue>) -> Result<(), PublishError> {
        let endpoint = self.config.endpoint.as_str();
        let metrics = get_metrics().await;
        let start = get_instant();

        let outcome = self.deliver(body, content_type).await;

        metrics.publish_duration.with_label_values(&[endpoint]).observe(start.elapsed().as_secs_f64());
        match &outcome {
            Ok(()) => {
                metrics.publish_requests.with_label_values(&[endpoint, SUCCESS_MSG]).inc();
                info!("Successfully published message to endpoint {}", endpoint);
            }
            Err(err) => {
                metrics.publish_requests.with_label_values(&[endpoint, err.kind()]).inc();
                error!("Failed to publish message to endpoint {} due to error {}", endpoint, err);
            }
        }
        outcome
    }

    async fn deliver(&self, body: Vec<u8>, content_type: Option<HeaderValue>) -> Result<(), PublishError> {
        let resource_uri = self.config.resource_uri();
        let signing_request = SigningRequest {
            resource_uri: &resource_uri,
            signing_key: &self.config.signing_key,
            expiry_window: self.config.token_expiry(),
            policy_name: &self.config.shared_key_name,
        };
        let token = self.generator.generate(&signing_request).await?;

        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&token)
            .map_err(|err| TransportError::InvalidRequest(format!("authorization header: {}", err)))?;
        headers.insert(AUTHORIZATION, authorization);
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, content_type);
        }

        let request = OutboundRequest {
            method: Method::POST,
            url: self.config.messages_url(),
            headers,
            body,
        };

        let response = self.transport.send(request).await?;
        if response.status != StatusCode::CREATED {
            return Err(PublishError::Rejected {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }
}
