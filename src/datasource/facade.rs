//! The single data entry point for pages, handlers and clients.

use axum::http::header::{CONTENT_TYPE, COOKIE};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::datasource::error::DataError;
use crate::datasource::fixtures;
use crate::datasource::types::{Ack, Envelope, Profile, Project};
use crate::mode::cookie::cookie_header_value;
use crate::mode::{DataMode, ModeProvider};
use crate::upstream::Endpoints;
use crate::waitlist::WaitlistSubmission;

const PROJECTS_PATH: &str = "/projects";
const PROFILE_PATH: &str = "/profile";
const WAITLIST_ENDPOINT: &str = "/api/waitlist";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Serves fixtures in mock mode and upstream data in api mode.
#[derive(Debug, Clone)]
pub struct DataSource {
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl DataSource {
    pub fn new(endpoints: Endpoints, client: reqwest::Client) -> Self {
        Self { endpoints, client }
    }

    pub fn from_config(config: &AppConfig, client: reqwest::Client) -> Self {
        Self::new(Endpoints::from_config(config), client)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// All projects. Mock mode returns the fixture set unfiltered, in order.
    pub async fn list_projects(&self, modes: &dyn ModeProvider) -> Result<Vec<Project>, DataError> {
        match modes.resolve() {
            DataMode::Mock => Ok(fixtures::mock_projects()),
            DataMode::Api => {
                let envelope: Envelope<Vec<Project>> = self.fetch(PROJECTS_PATH).await?;
                Ok(envelope.data.unwrap_or_default())
            }
        }
    }

    /// The current profile, or `None` when the backend has none.
    pub async fn get_profile(&self, modes: &dyn ModeProvider) -> Result<Option<Profile>, DataError> {
        match modes.resolve() {
            DataMode::Mock => Ok(Some(fixtures::mock_profile())),
            DataMode::Api => {
                let envelope: Envelope<Profile> = self.fetch(PROFILE_PATH).await?;
                Ok(envelope.data)
            }
        }
    }

    /// Submit to the internal waitlist endpoint, whatever the mode.
    ///
    /// The endpoint decides what the submission does; an explicit override is
    /// passed along so it resolves the same mode the caller sees.
    pub async fn submit_waitlist(
        &self,
        modes: &dyn ModeProvider,
        input: &WaitlistSubmission,
    ) -> Result<Ack, DataError> {
        input
            .validate()
            .map_err(|e| DataError::InvalidPayload(e.to_string()))?;

        let url = self.endpoints.internal(WAITLIST_ENDPOINT);
        let mut request = self.client.post(&url).json(input);
        if let Some(mode) = modes.override_mode() {
            request = request.header(COOKIE, cookie_header_value(mode));
        }

        let res = request.send().await.map_err(DataError::Network)?;
        let status = res.status();
        let content_type = res.headers().get(CONTENT_TYPE).cloned();
        let text = res.text().await.map_err(DataError::Network)?;

        if !status.is_success() {
            // Surface the endpoint's own message when it sent `{ "error": ... }`.
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(ErrorBody { error }) => DataError::Upstream {
                    status,
                    content_type: None,
                    body: error,
                },
                Err(_) => DataError::Upstream {
                    status,
                    content_type,
                    body: text,
                },
            });
        }
        serde_json::from_str(&text).map_err(DataError::MalformedResponse)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, DataError> {
        let url = self.endpoints.upstream(path)?;
        tracing::debug!(url = %url, "Fetching from upstream");

        let res = self.client.get(&url).send().await.map_err(DataError::Network)?;
        let status = res.status();

        if !status.is_success() {
            let content_type = res.headers().get(CONTENT_TYPE).cloned();
            let body = res.text().await.map_err(DataError::Network)?;
            tracing::warn!(url = %url, status = %status, "Upstream returned an error");
            return Err(DataError::Upstream {
                status,
                content_type,
                body,
            });
        }

        let bytes = res.bytes().await.map_err(DataError::Network)?;
        serde_json::from_slice(&bytes).map_err(DataError::MalformedResponse)
    }
}
