//! Mode resolution.
//!
//! # Responsibilities
//! - Define the two data modes
//! - Normalize the process-wide default flag
//! - Layer a request-scoped override on top of the default
//!
//! # Design Decisions
//! - Overrides must match `mock` or `api` verbatim
//! - The default flag is compared case-insensitively against `api` only

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::cookie::read_override;

/// Where data is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Static in-memory fixtures.
    Mock,
    /// The configured upstream backend.
    Api,
}

/// Returned when a string is neither `mock` nor `api`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mode")]
pub struct InvalidMode;

impl DataMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            DataMode::Mock => "mock",
            DataMode::Api => "api",
        }
    }

    /// Parse an override value. Only the exact strings `mock` and `api` count.
    pub fn parse_override(value: &str) -> Option<Self> {
        match value {
            "mock" => Some(DataMode::Mock),
            "api" => Some(DataMode::Api),
            _ => None,
        }
    }

    /// Interpret the configured default. Anything other than `api`
    /// (case-insensitive) falls back to `mock`.
    pub fn from_default_flag(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("api") => DataMode::Api,
            _ => DataMode::Mock,
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataMode::parse_override(s).ok_or(InvalidMode)
    }
}

/// Source of the current data mode.
pub trait ModeProvider: Send + Sync {
    /// Resolve the mode. Never fails.
    fn resolve(&self) -> DataMode;

    /// The explicit override, if one is set.
    fn override_mode(&self) -> Option<DataMode> {
        None
    }
}

/// A fixed mode, used where no override layer exists.
impl ModeProvider for DataMode {
    fn resolve(&self) -> DataMode {
        *self
    }
}

/// Mode as seen by a single request: cookie override over process default.
///
/// Built once per request and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestMode {
    override_mode: Option<DataMode>,
    default: DataMode,
}

impl RequestMode {
    pub fn new(override_mode: Option<DataMode>, default: DataMode) -> Self {
        Self {
            override_mode,
            default,
        }
    }

    /// Read the override from the request's `Cookie` headers.
    pub fn from_headers(headers: &HeaderMap, default: DataMode) -> Self {
        let jar = CookieJar::from_headers(headers);
        Self::new(read_override(&jar), default)
    }

    pub fn is_overridden(&self) -> bool {
        self.override_mode.is_some()
    }
}

impl ModeProvider for RequestMode {
    fn resolve(&self) -> DataMode {
        self.override_mode.unwrap_or(self.default)
    }

    fn override_mode(&self) -> Option<DataMode> {
        self.override_mode
    }
}
