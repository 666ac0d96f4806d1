//! Endpoint resolution for facade and waitlist calls.
//!
//! In api mode a call either goes straight to `{base}/path` or, when proxying
//! is enabled, through this application's own relay at `{origin}{prefix}/path`.

use crate::config::AppConfig;
use crate::upstream::base::{ApiBase, Unconfigured};

#[derive(Debug, Clone)]
pub struct Endpoints {
    api_base: Option<ApiBase>,
    use_proxy: bool,
    app_origin: String,
    proxy_prefix: String,
}

impl Endpoints {
    pub fn new(
        api_base: Option<ApiBase>,
        use_proxy: bool,
        app_origin: impl Into<String>,
        proxy_prefix: impl Into<String>,
    ) -> Self {
        Self {
            api_base,
            use_proxy,
            app_origin: app_origin.into().trim_end_matches('/').to_string(),
            proxy_prefix: proxy_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_base(),
            config.data.use_proxy,
            config.app_origin(),
            config.data.proxy_prefix.clone(),
        )
    }

    pub fn uses_proxy(&self) -> bool {
        self.use_proxy
    }

    /// URL for an upstream path. Requires a configured base even when proxying,
    /// since the relay would refuse the call anyway.
    pub fn upstream(&self, path: &str) -> Result<String, Unconfigured> {
        let base = self.api_base.as_ref().ok_or(Unconfigured)?;
        if self.use_proxy {
            Ok(format!(
                "{}{}/{}",
                self.app_origin,
                self.proxy_prefix,
                path.trim_start_matches('/')
            ))
        } else {
            Ok(base.join(path))
        }
    }

    /// URL for one of this application's own endpoints.
    pub fn internal(&self, path: &str) -> String {
        format!("{}/{}", self.app_origin, path.trim_start_matches('/'))
    }
}
