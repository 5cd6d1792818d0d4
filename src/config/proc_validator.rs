//! Configuration validation with aggregated errors.

use anyhow::{anyhow, Result};
use tracing::{error, info};

use crate::config::servicebus::{ServiceBusConfig, ServiceConfig};
use crate::config::settings::SettingsConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_service_config(cfg: &ServiceConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_servicebus(&cfg.servicebus, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(anyhow!(
            "config is not valid, total errors:{}, \n{}",
            errors.len(),
            errors.join("\n")
        ))
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}

/// SERVICEBUS VALIDATION
fn validate_servicebus(servicebus: &ServiceBusConfig, errors: &mut Vec<String>) {
    let base_url = servicebus.base_url.trim();
    if base_url.is_empty() {
        errors.push("servicebus.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!(
            "servicebus.base_url '{}' must start with http:// or https://",
            servicebus.base_url
        ));
    }

    let required = [
        ("namespace", &servicebus.namespace),
        ("endpoint", &servicebus.endpoint),
        ("shared_key_name", &servicebus.shared_key_name),
        ("domain_suffix", &servicebus.domain_suffix),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("servicebus.{} must not be empty", field));
        }
    }

    if servicebus.endpoint.contains('/') {
        errors.push(format!(
            "servicebus.endpoint '{}' must be a single queue or topic name",
            servicebus.endpoint
        ));
    }

    if servicebus.signing_key.is_empty() {
        errors.push("servicebus.signing_key must not be empty".to_string());
    }

    if servicebus.token_expiry_seconds == 0 {
        errors.push("servicebus.token_expiry_seconds must be greater than 0".to_string());
    }

    if servicebus.request_timeout_ms == 0 {
        errors.push("servicebus.request_timeout_ms must be greater than 0".to_string());
    }
}
