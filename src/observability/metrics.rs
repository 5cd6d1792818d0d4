use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

/// Encode every registered metric in the Prometheus text format.
pub async fn render_metrics() -> Result<String> {
    let metrics = get_metrics().await;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Publish metrics
    pub publish_requests: IntCounterVec,
    pub publish_duration: HistogramVec,

    // SAS token metrics
    pub sas_token_generations: IntCounter,
    pub sas_token_expiry_unix: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("servicebus_publisher".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Publish
            publish_requests: IntCounterVec::new(Opts::new("publish_requests_total", "Publish attempts by endpoint and outcome"),&["endpoint", "outcome"],).unwrap(),
            publish_duration: HistogramVec::new(HistogramOpts::new("publish_duration_seconds", "Publish duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),&["endpoint"],).unwrap(),

            // SAS
            sas_token_generations: IntCounter::new("sas_token_generations_total", "SAS tokens minted").unwrap(),
            sas_token_expiry_unix: IntGauge::new("sas_token_expiry_unix_seconds", "Expiry of the most recently minted SAS token").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.publish_requests.clone())).unwrap();
        reg.register(Box::new(metrics.publish_duration.clone())).unwrap();
        reg.register(Box::new(metrics.sas_token_generations.clone())).unwrap();
        reg.register(Box::new(metrics.sas_token_expiry_unix.clone())).unwrap();

        metrics
    }
}
