//! Client-side mode switch.
//!
//! Flips the server-side override through `POST /api/datamode` and keeps the
//! same override locally so later resolutions observe it.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::Deserialize;
use thiserror::Error;

use crate::mode::cookie::cookie_header_value;
use crate::mode::resolver::{DataMode, ModeProvider};

const UNSET: u8 = 0;
const MOCK: u8 = 1;
const API: u8 = 2;

fn encode(mode: DataMode) -> u8 {
    match mode {
        DataMode::Mock => MOCK,
        DataMode::Api => API,
    }
}

fn decode(raw: u8) -> Option<DataMode> {
    match raw {
        MOCK => Some(DataMode::Mock),
        API => Some(DataMode::Api),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("mode switch request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server rejected mode switch ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Deserialize)]
struct SwitchAck {
    ok: bool,
    mode: DataMode,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Holds a client's mode override. Last write wins.
pub struct ModeSwitch {
    client: reqwest::Client,
    endpoint: String,
    default: DataMode,
    current: AtomicU8,
}

impl ModeSwitch {
    pub fn new(client: reqwest::Client, app_origin: &str, default: DataMode) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/datamode", app_origin.trim_end_matches('/')),
            default,
            current: AtomicU8::new(UNSET),
        }
    }

    /// Store the override locally. The next `resolve` observes it.
    pub fn set_override(&self, next: DataMode) {
        self.current.store(encode(next), Ordering::Release);
    }

    pub fn clear_override(&self) {
        self.current.store(UNSET, Ordering::Release);
    }

    /// `Cookie` header to attach to requests, if an override is set.
    pub fn cookie_header(&self) -> Option<String> {
        self.override_mode().map(cookie_header_value)
    }

    /// Ask the server to set the override, then mirror it locally.
    pub async fn switch(&self, next: DataMode) -> Result<DataMode, SwitchError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "mode": next }))
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(SwitchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let ack = match serde_json::from_str::<SwitchAck>(&text) {
            Ok(ack) if ack.ok => ack,
            _ => {
                return Err(SwitchError::Rejected {
                    status: status.as_u16(),
                    message: format!("unexpected response: {}", text),
                })
            }
        };

        self.set_override(ack.mode);
        tracing::info!(mode = %ack.mode, "Data mode switched");
        Ok(ack.mode)
    }
}

impl ModeProvider for ModeSwitch {
    fn resolve(&self) -> DataMode {
        self.override_mode().unwrap_or(self.default)
    }

    fn override_mode(&self) -> Option<DataMode> {
        decode(self.current.load(Ordering::Acquire))
    }
}
