//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and socket addresses
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Missing optional dependencies are not errors; they degrade at runtime

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address '{}'", config.listener.bind_address),
        ));
    }

    if let Some(base) = config.data.api_base_url.as_deref() {
        if !base.trim().is_empty() {
            check_http_url(&mut errors, "data.api_base_url", base.trim());
        }
    }
    if let Some(origin) = config.data.app_origin.as_deref() {
        if !origin.trim().is_empty() {
            check_http_url(&mut errors, "data.app_origin", origin.trim());
        }
    }

    let prefix = &config.data.proxy_prefix;
    if !prefix.starts_with('/') || prefix.trim_matches('/').is_empty() {
        errors.push(ValidationError::new(
            "data.proxy_prefix",
            format!("must be an absolute, non-root path, got '{}'", prefix),
        ));
    }

    for allowed in &config.proxy.allowed_prefixes {
        if allowed.split('/').any(|seg| seg == "." || seg == "..") {
            errors.push(ValidationError::new(
                "proxy.allowed_prefixes",
                format!("'{}' contains dot segments", allowed),
            ));
        }
    }

    if let Some(to) = config.mail.forward_to.as_deref() {
        if !to.trim().is_empty() && !to.contains('@') {
            errors.push(ValidationError::new(
                "mail.forward_to",
                format!("'{}' is not an email address", to),
            ));
        }
    }
    check_http_url(&mut errors, "mail.endpoint", &config.mail.endpoint);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match Url::parse(value) {
        Ok(url) => match url.scheme() {
            "http" | "https" => {}
            scheme => errors.push(ValidationError::new(
                field,
                format!("unsupported URL scheme '{}'", scheme),
            )),
        },
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
