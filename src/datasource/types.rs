//! Data model shared by the facade, handlers and clients.

use serde::{Deserialize, Serialize};

/// A project listed on the discovery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display order is preserved.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Popularity counter.
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub maintainer: String,
}

/// The signed-in user's profile shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub name: String,
}

/// Upstream response envelope: `{ "data"?: T }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// Acknowledgement of an accepted waitlist submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
    /// Non-fatal problem, e.g. the notification email was not delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            ok: true,
            warning: None,
        }
    }

    pub fn with_warning(warning: impl Into<String>) -> Self {
        Self {
            ok: true,
            warning: Some(warning.into()),
        }
    }
}
