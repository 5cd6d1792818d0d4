use anyhow::{Context, Result};
use clap::Parser;
use servicebus_publisher::observability::metrics::render_metrics;
use servicebus_publisher::utils::config_loader;
use servicebus_publisher::utils::constants::DEFAULT_CONFIG_PATH;
use servicebus_publisher::utils::logging;
use servicebus_publisher::utils::logging::LogLevel;
use servicebus_publisher::Publisher;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
    /// Parse MESSAGE as JSON instead of sending it as a JSON string
    #[arg(long)]
    json: bool,
    /// Print Prometheus metrics to stdout after publishing
    #[arg(long)]
    print_metrics: bool,
    /// Message to publish; read from stdin when omitted
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level.to_owned())?;

    // -------------------------------
    // 2. Prepare message
    // -------------------------------

    let raw = match args.message {
        Some(message) => message,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer.trim_end().to_owned()
        }
    };
    let message = if args.json {
        serde_json::from_str::<Value>(&raw).context("message is not valid JSON")?
    } else {
        Value::String(raw)
    };

    // -------------------------------
    // 3. Publish
    // -------------------------------

    let publisher = Publisher::from_config(service_config.servicebus)?;
    info!("publishing to {}", publisher.config().messages_url());
    let outcome = publisher.publish(&message).await;

    // -------------------------------
    // 4. Metrics
    // -------------------------------

    if args.print_metrics {
        print!("{}", render_metrics().await?);
    }

    outcome?;
    Ok(())
}
