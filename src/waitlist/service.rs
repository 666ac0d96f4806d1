//! Mode-aware handling of a validated submission.

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use thiserror::Error;

use crate::datasource::Ack;
use crate::mode::DataMode;
use crate::observability::metrics;
use crate::upstream::{Endpoints, Unconfigured, UpstreamResponse};
use crate::waitlist::notify::Notifier;
use crate::waitlist::submission::{InvalidSubmission, WaitlistSubmission};

const WAITLIST_PATH: &str = "/waitlist";

/// What happened to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitlistOutcome {
    /// Accepted by the upstream backend.
    Forwarded,
    /// Recorded locally through the named notifier.
    Notified { channel: &'static str },
    /// Accepted, but the notifier failed.
    NotificationFailed { channel: &'static str },
}

impl WaitlistOutcome {
    pub fn ack(&self) -> Ack {
        match self {
            WaitlistOutcome::NotificationFailed { .. } => Ack::with_warning("notification not delivered"),
            _ => Ack::ok(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WaitlistOutcome::Forwarded => "forwarded",
            WaitlistOutcome::Notified { .. } => "notified",
            WaitlistOutcome::NotificationFailed { .. } => "notification_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum WaitlistError {
    #[error(transparent)]
    Invalid(#[from] InvalidSubmission),

    #[error("API base not configured")]
    Unconfigured,

    /// Upstream refused the submission; its answer is relayed as is.
    #[error("upstream returned {}", .0.status)]
    Upstream(UpstreamResponse),

    #[error("upstream request failed: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<Unconfigured> for WaitlistError {
    fn from(_: Unconfigured) -> Self {
        WaitlistError::Unconfigured
    }
}

/// The internal submission endpoint's logic.
pub struct WaitlistService {
    endpoints: Endpoints,
    client: reqwest::Client,
    notifier: Arc<dyn Notifier>,
}

impl WaitlistService {
    pub fn new(endpoints: Endpoints, client: reqwest::Client, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            endpoints,
            client,
            notifier,
        }
    }

    pub fn notifier_kind(&self) -> &'static str {
        self.notifier.kind()
    }

    /// Validate, then forward (api) or notify (mock).
    pub async fn submit(
        &self,
        mode: DataMode,
        submission: &WaitlistSubmission,
    ) -> Result<WaitlistOutcome, WaitlistError> {
        if let Err(e) = submission.validate() {
            metrics::record_waitlist("invalid");
            return Err(e.into());
        }

        let outcome = match mode {
            DataMode::Api => self.forward(submission).await?,
            DataMode::Mock => self.notify(submission).await,
        };

        metrics::record_waitlist(outcome.label());
        Ok(outcome)
    }

    async fn forward(&self, submission: &WaitlistSubmission) -> Result<WaitlistOutcome, WaitlistError> {
        let url = self.endpoints.upstream(WAITLIST_PATH)?;
        tracing::debug!(url = %url, "Forwarding waitlist submission");

        let res = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(WaitlistError::Network)?;

        let status = res.status();
        if status.is_success() {
            return Ok(WaitlistOutcome::Forwarded);
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        let body = res.bytes().await.map_err(WaitlistError::Network)?;

        tracing::warn!(status = %status, "Upstream rejected waitlist submission");
        Err(WaitlistError::Upstream(UpstreamResponse {
            status,
            content_type,
            body,
        }))
    }

    async fn notify(&self, submission: &WaitlistSubmission) -> WaitlistOutcome {
        let channel = self.notifier.kind();
        match self.notifier.notify(submission).await {
            Ok(()) => WaitlistOutcome::Notified { channel },
            Err(e) => {
                tracing::warn!(channel, error = %e, "Waitlist notification failed");
                WaitlistOutcome::NotificationFailed { channel }
            }
        }
    }
}
