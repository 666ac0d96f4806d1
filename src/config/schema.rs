//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::mode::DataMode;
use crate::upstream::ApiBase;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Data-mode and upstream settings.
    pub data: DataConfig,

    /// Relay access policy.
    pub proxy: ProxyConfig,

    /// Waitlist notification email.
    pub mail: MailConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

impl AppConfig {
    /// Process-wide default mode.
    pub fn default_mode(&self) -> DataMode {
        DataMode::from_default_flag(self.data.default_mode.as_deref())
    }

    pub fn api_base(&self) -> Option<ApiBase> {
        ApiBase::resolve(self.data.api_base_url.as_deref())
    }

    /// Origin under which this application reaches its own endpoints.
    ///
    /// Falls back to the bind address, with unspecified hosts mapped to loopback.
    pub fn app_origin(&self) -> String {
        if let Some(origin) = self.data.app_origin.as_deref().map(str::trim) {
            if !origin.is_empty() {
                return origin.trim_end_matches('/').to_string();
            }
        }

        match self.listener.bind_address.parse::<SocketAddr>() {
            Ok(mut addr) => {
                if addr.ip().is_unspecified() {
                    let loopback = match addr.ip() {
                        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
                    };
                    addr.set_ip(loopback);
                }
                format!("http://{}", addr)
            }
            Err(_) => format!("http://{}", self.listener.bind_address),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Data source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Default data mode. Only `api` (any case) selects the backend.
    pub default_mode: Option<String>,

    /// Upstream backend base URL.
    pub api_base_url: Option<String>,

    /// Route api-mode calls through the same-origin relay.
    pub use_proxy: bool,

    /// Public origin of this application. Derived from the bind address if unset.
    pub app_origin: Option<String>,

    /// Path prefix of the relay.
    pub proxy_prefix: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_mode: None,
            api_base_url: None,
            use_proxy: false,
            app_origin: None,
            proxy_prefix: "/api/proxy".to_string(),
        }
    }
}

/// Relay access policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Sub-path prefixes the relay may forward. Empty allows all.
    pub allowed_prefixes: Vec<String>,
}

/// Notification email for mock-mode waitlist submissions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    /// Resend API key.
    pub api_key: Option<String>,

    /// Destination address for signup notifications.
    pub forward_to: Option<String>,

    /// Sender address.
    pub from: String,

    /// Email API endpoint.
    pub endpoint: String,
}

impl MailConfig {
    /// API key and destination, only when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let to = self.forward_to.as_deref().filter(|t| !t.trim().is_empty())?;
        Some((key, to))
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            forward_to: None,
            from: "OpenBoard <noreply@openboard.dev>".to_string(),
            endpoint: "https://api.resend.com/emails".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add security response headers.
    pub enable_headers: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_origin_from_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.app_origin(), "http://127.0.0.1:8080");

        let mut config = AppConfig::default();
        config.listener.bind_address = "[::]:3000".into();
        assert_eq!(config.app_origin(), "http://[::1]:3000");
    }

    #[test]
    fn test_explicit_app_origin_wins() {
        let mut config = AppConfig::default();
        config.data.app_origin = Some("https://openboard.dev/".into());
        assert_eq!(config.app_origin(), "https://openboard.dev");
    }

    #[test]
    fn test_mail_credentials_need_both() {
        let mut mail = MailConfig::default();
        assert!(mail.credentials().is_none());

        mail.api_key = Some("re_123".into());
        assert!(mail.credentials().is_none());

        mail.forward_to = Some("team@openboard.dev".into());
        assert_eq!(mail.credentials(), Some(("re_123", "team@openboard.dev")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [data]
            default_mode = "API"
            api_base_url = "https://backend.example.com/"
            use_proxy = true

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_mode(), DataMode::Api);
        assert_eq!(config.api_base().unwrap().as_str(), "https://backend.example.com");
        assert!(config.data.use_proxy);
        assert_eq!(config.data.proxy_prefix, "/api/proxy");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
