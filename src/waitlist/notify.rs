//! Mock-mode notification of waitlist signups.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::MailConfig;
use crate::waitlist::submission::WaitlistSubmission;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("email API rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Records or delivers a signup. Best-effort.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name for logs and metrics.
    fn kind(&self) -> &'static str;

    async fn notify(&self, submission: &WaitlistSubmission) -> Result<(), NotifyError>;
}

/// Writes one operational log record per submission.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn kind(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, submission: &WaitlistSubmission) -> Result<(), NotifyError> {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            role = submission.role.as_deref().unwrap_or_default(),
            about = submission.about.as_deref().unwrap_or_default(),
            "Waitlist submission recorded"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

/// Sends a notification through the Resend email API.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    to: String,
    from: String,
}

impl EmailNotifier {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        to: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            to: to.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn kind(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, submission: &WaitlistSubmission) -> Result<(), NotifyError> {
        let email = OutboundEmail {
            from: &self.from,
            to: [&self.to],
            subject: format!("New waitlist signup: {}", submission.name),
            html: render_html(submission),
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %self.to, "Waitlist notification sent");
        Ok(())
    }
}

/// Email when both credential and destination exist, log-only otherwise.
pub fn notifier_from_config(mail: &MailConfig, client: reqwest::Client) -> Arc<dyn Notifier> {
    match mail.credentials() {
        Some((api_key, to)) => Arc::new(EmailNotifier::new(
            client,
            mail.endpoint.clone(),
            api_key,
            to,
            mail.from.clone(),
        )),
        None => Arc::new(LogNotifier),
    }
}

fn render_html(submission: &WaitlistSubmission) -> String {
    format!(
        "<div><h2>Waitlist signup</h2>\
         <p><b>Name:</b> {}</p>\
         <p><b>Email:</b> {}</p>\
         <p><b>Role:</b> {}</p>\
         <p><b>About:</b> {}</p></div>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(submission.role.as_deref().unwrap_or_default()),
        escape_html(submission.about.as_deref().unwrap_or_default()),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn submission() -> WaitlistSubmission {
        let mut sub = WaitlistSubmission::new("Ana <script>", "ana@example.com");
        sub.role = Some("Maintainer".into());
        sub
    }

    #[test]
    fn test_selection_needs_key_and_destination() {
        let mut mail = MailConfig::default();
        assert_eq!(notifier_from_config(&mail, reqwest::Client::new()).kind(), "log");

        mail.api_key = Some("re_key".into());
        assert_eq!(notifier_from_config(&mail, reqwest::Client::new()).kind(), "log");

        mail.forward_to = Some("team@openboard.dev".into());
        assert_eq!(notifier_from_config(&mail, reqwest::Client::new()).kind(), "email");
    }

    #[test]
    fn test_html_is_escaped() {
        let html = render_html(&submission());
        assert!(html.contains("Ana &lt;script&gt;"));
        assert!(html.contains("<b>Role:</b> Maintainer"));
        assert!(html.contains("<b>About:</b> </p>"));
    }

    #[tokio::test]
    async fn test_email_notifier_posts_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "msg_1" })))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = EmailNotifier::new(
            reqwest::Client::new(),
            format!("{}/emails", server.uri()),
            "re_key",
            "team@openboard.dev",
            "OpenBoard <noreply@openboard.dev>",
        );
        notifier.notify(&submission()).await.unwrap();

        let received: Vec<Request> = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["to"], serde_json::json!(["team@openboard.dev"]));
        assert_eq!(body["subject"], "New waitlist signup: Ana <script>");
    }

    #[tokio::test]
    async fn test_email_rejection_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let notifier = EmailNotifier::new(reqwest::Client::new(), server.uri(), "x", "a@b.co", "c@d.co");
        let err = notifier.notify(&submission()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 401, .. }));
    }
}
